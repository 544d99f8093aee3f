/// Eclipse partner API client (candidate and job records from the agency CRM).
///
/// OAuth2 client-credentials: the bearer token is fetched lazily, cached, and
/// refreshed once when a request comes back 401.
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::candidate::{Compliance, NewCandidate};
use crate::models::job::{Job, JobSource, JobStatus};

#[derive(Debug, Error)]
pub enum EclipseError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("authentication failed (status {0})")]
    Auth(u16),

    #[error("Eclipse API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    grant_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Every list endpoint wraps its records in `{ "data": [...] }`.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EclipseCompliance {
    pub dbs: bool,
    pub right_to_work: bool,
    pub registration: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EclipseCandidate {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub experience: u32,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub compliance: EclipseCompliance,
}

impl EclipseCandidate {
    pub fn into_new_candidate(self) -> NewCandidate {
        NewCandidate {
            name: self.name,
            email: self.email,
            phone: self.phone,
            specialization: self.specialization,
            experience_years: self.experience,
            location: self.location,
            status: self
                .status
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            compliance: Compliance {
                dbs: self.compliance.dbs,
                right_to_work: self.compliance.right_to_work,
                registration: self.compliance.registration,
            },
            grade: None,
            assigned_agent: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EclipseJob {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type", default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub posted_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
}

impl EclipseJob {
    /// Unknown enum values fall back to the job defaults.
    pub fn into_job(self) -> Job {
        Job {
            id: Uuid::new_v4(),
            title: self.title,
            client: self.client,
            location: self.location,
            job_type: parse_or_default(self.job_type),
            specialization: self.specialization,
            salary: self.salary,
            description: self.description,
            requirements: self.requirements,
            status: self
                .status
                .and_then(|s| s.parse().ok())
                .unwrap_or(JobStatus::Open),
            urgency: parse_or_default(self.urgency),
            grade: None,
            source: JobSource::Eclipse,
            assigned_agent: None,
            posted_date: self.posted_date.unwrap_or_else(Utc::now),
        }
    }
}

fn parse_or_default<T: std::str::FromStr + Default>(value: Option<String>) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or_default()
}

pub struct EclipseClient {
    client: Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    token: RwLock<Option<String>>,
}

impl EclipseClient {
    pub fn new(base_url: String, client_id: String, client_secret: String) -> Result<Self, EclipseError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id,
            client_secret,
            token: RwLock::new(None),
        })
    }

    pub async fn get_candidates(&self) -> Result<Vec<EclipseCandidate>, EclipseError> {
        let envelope: DataEnvelope<EclipseCandidate> = self.get("/candidates").await?;
        Ok(envelope.data)
    }

    pub async fn get_jobs(&self) -> Result<Vec<EclipseJob>, EclipseError> {
        let envelope: DataEnvelope<EclipseJob> = self.get("/jobs").await?;
        Ok(envelope.data)
    }

    async fn authenticate(&self) -> Result<String, EclipseError> {
        let response = self
            .client
            .post(format!("{}/oauth/token", self.base_url))
            .json(&TokenRequest {
                client_id: &self.client_id,
                client_secret: &self.client_secret,
                grant_type: "client_credentials",
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EclipseError::Auth(response.status().as_u16()));
        }

        let token: TokenResponse = response.json().await?;
        *self.token.write().await = Some(token.access_token.clone());
        info!("Authenticated with Eclipse API");
        Ok(token.access_token)
    }

    async fn current_token(&self) -> Result<String, EclipseError> {
        if let Some(token) = self.token.read().await.clone() {
            return Ok(token);
        }
        self.authenticate().await
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, EclipseError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let token = self.current_token().await?;

        let mut response = self.client.get(&url).bearer_auth(&token).send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("Eclipse token rejected for {endpoint}, re-authenticating");
            let token = self.authenticate().await?;
            response = self.client.get(&url).bearer_auth(&token).send().await?;
        }

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EclipseError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!("Eclipse GET {endpoint} -> {status}");
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::CandidateStatus;
    use crate::models::job::{JobType, Urgency};

    #[test]
    fn test_candidate_envelope_parses_camel_case() {
        let envelope: DataEnvelope<EclipseCandidate> = serde_json::from_str(
            r#"{"data": [{
                "id": "2",
                "name": "Dr. Michael Chen",
                "email": "michael.chen@email.com",
                "phone": "+44 7700 900124",
                "specialization": "Emergency Medicine",
                "experience": 12,
                "location": "Manchester, UK",
                "lastActive": "2024-01-14T15:45:00Z",
                "status": "active",
                "compliance": {"dbs": true, "rightToWork": true, "registration": false}
            }]}"#,
        )
        .unwrap();

        let candidate = envelope.data[0].clone().into_new_candidate();
        assert_eq!(candidate.experience_years, 12);
        assert_eq!(candidate.status, CandidateStatus::Active);
        assert!(candidate.compliance.right_to_work);
        assert!(!candidate.compliance.registration);
    }

    #[test]
    fn test_job_conversion_marks_source_and_defaults() {
        let job: EclipseJob = serde_json::from_str(
            r#"{
                "id": "1",
                "title": "Consultant Cardiologist",
                "client": "Royal London Hospital",
                "location": "London, UK",
                "type": "permanent",
                "specialization": "Cardiology",
                "requirements": ["GMC Registration"],
                "postedDate": "2024-01-10T09:00:00Z",
                "status": "open",
                "urgency": "urgent-ish"
            }"#,
        )
        .unwrap();

        let job = job.into_job();
        assert_eq!(job.source, JobSource::Eclipse);
        assert_eq!(job.job_type, JobType::Permanent);
        assert_eq!(job.urgency, Urgency::Medium);
        assert!(job.assigned_agent.is_none());
        assert_eq!(job.posted_date.to_rfc3339(), "2024-01-10T09:00:00+00:00");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = EclipseClient::new(
            "https://api.eclipse.example/".into(),
            "id".into(),
            "secret".into(),
        )
        .unwrap();
        assert_eq!(client.base_url, "https://api.eclipse.example");
    }
}
