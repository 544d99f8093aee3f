use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Open,
    Filled,
    Closed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Permanent,
    #[default]
    Contract,
    Locum,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobSource {
    #[default]
    Manual,
    Email,
    Eclipse,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Open => "open",
            JobStatus::Filled => "filled",
            JobStatus::Closed => "closed",
        }
    }
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Permanent => "permanent",
            JobType::Contract => "contract",
            JobType::Locum => "locum",
        }
    }
}

impl JobSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobSource::Manual => "manual",
            JobSource::Email => "email",
            JobSource::Eclipse => "eclipse",
        }
    }
}

impl FromStr for Urgency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Urgency::Low),
            "medium" => Ok(Urgency::Medium),
            "high" => Ok(Urgency::High),
            other => Err(anyhow!("unknown urgency '{other}'")),
        }
    }
}

impl FromStr for JobStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(JobStatus::Open),
            "filled" => Ok(JobStatus::Filled),
            "closed" => Ok(JobStatus::Closed),
            other => Err(anyhow!("unknown job status '{other}'")),
        }
    }
}

impl FromStr for JobType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "permanent" => Ok(JobType::Permanent),
            "contract" => Ok(JobType::Contract),
            "locum" => Ok(JobType::Locum),
            other => Err(anyhow!("unknown job type '{other}'")),
        }
    }
}

impl FromStr for JobSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manual" => Ok(JobSource::Manual),
            "email" => Ok(JobSource::Email),
            "eclipse" => Ok(JobSource::Eclipse),
            other => Err(anyhow!("unknown job source '{other}'")),
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub client: String,
    pub location: String,
    pub job_type: JobType,
    pub specialization: String,
    pub salary: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub status: JobStatus,
    pub urgency: Urgency,
    pub grade: Option<String>,
    pub source: JobSource,
    /// Agent id looked up in the roster. Reference only.
    pub assigned_agent: Option<Uuid>,
    pub posted_date: DateTime<Utc>,
}

impl Job {
    pub fn is_open(&self) -> bool {
        self.status == JobStatus::Open
    }

    pub fn is_urgent_open(&self) -> bool {
        self.is_open() && self.urgency == Urgency::High
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub client: String,
    pub location: String,
    #[sqlx(rename = "type")]
    pub job_type: String,
    pub specialization: String,
    pub salary: Option<String>,
    pub description: Option<String>,
    pub requirements: Vec<String>,
    pub status: String,
    pub urgency: String,
    pub grade: Option<String>,
    pub source: String,
    pub assigned_agent_id: Option<Uuid>,
    pub posted_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<JobRow> for Job {
    type Error = anyhow::Error;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        Ok(Job {
            id: row.id,
            title: row.title,
            client: row.client,
            location: row.location,
            job_type: row.job_type.parse()?,
            specialization: row.specialization,
            salary: row.salary.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
            requirements: row.requirements,
            status: row.status.parse()?,
            urgency: row.urgency.parse()?,
            grade: row.grade,
            source: row.source.parse()?,
            assigned_agent: row.assigned_agent_id,
            posted_date: row.posted_date,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    pub title: String,
    pub client: String,
    pub location: String,
    #[serde(default)]
    pub job_type: JobType,
    pub specialization: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub urgency: Urgency,
    pub grade: Option<String>,
}

impl NewJob {
    pub fn into_job(self) -> Job {
        Job {
            id: Uuid::new_v4(),
            title: self.title,
            client: self.client,
            location: self.location,
            job_type: self.job_type,
            specialization: self.specialization,
            salary: self.salary,
            description: self.description,
            requirements: self.requirements,
            status: JobStatus::Open,
            urgency: self.urgency,
            grade: self.grade,
            source: JobSource::Manual,
            assigned_agent: None,
            posted_date: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub client: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<JobType>,
    pub specialization: Option<String>,
    pub salary: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub status: Option<JobStatus>,
    pub urgency: Option<Urgency>,
    pub grade: Option<String>,
    pub assigned_agent: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> JobRow {
        JobRow {
            id: Uuid::new_v4(),
            title: "Consultant Cardiologist".to_string(),
            client: "Royal London Hospital".to_string(),
            location: "London, UK".to_string(),
            job_type: "locum".to_string(),
            specialization: "Cardiology".to_string(),
            salary: None,
            description: Some("Busy cardiology department".to_string()),
            requirements: vec!["GMC Registration".to_string()],
            status: "open".to_string(),
            urgency: "HIGH".to_string(),
            grade: Some("Consultant".to_string()),
            source: "email".to_string(),
            assigned_agent_id: None,
            posted_date: Utc::now(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_converts_enum_columns() {
        let job = Job::try_from(row()).unwrap();
        assert_eq!(job.job_type, JobType::Locum);
        assert_eq!(job.urgency, Urgency::High);
        assert_eq!(job.source, JobSource::Email);
        assert_eq!(job.salary, "");
        assert!(job.is_urgent_open());
    }

    #[test]
    fn test_row_with_unknown_status_is_rejected() {
        let mut bad = row();
        bad.status = "archived".to_string();
        assert!(Job::try_from(bad).is_err());
    }

    #[test]
    fn test_urgency_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Urgency::High).unwrap(), r#""high""#);
        let parsed: JobType = serde_json::from_str(r#""permanent""#).unwrap();
        assert_eq!(parsed, JobType::Permanent);
    }
}
