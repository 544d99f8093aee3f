//! Email → Job. The LLM extractor is tried first; any failure falls back to a
//! deterministic parse of the subject and body.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::email_ingest::prompts;
use crate::llm_client::{prompts::json_system, CompletionParams, LlmClient, LlmError};
use crate::models::email::EmailJob;
use crate::models::job::{Job, JobSource, JobStatus, JobType, Urgency};

const EXTRACT_PARAMS: CompletionParams = CompletionParams {
    max_tokens: 800,
    temperature: 0.2,
};

const FALLBACK_DESCRIPTION_CHARS: usize = 200;

/// Fields pulled out of an email. Everything is optional; blanks count as missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtractedJob {
    pub title: Option<String>,
    pub specialization: Option<String>,
    pub grade: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub urgency: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub description: Option<String>,
}

#[async_trait]
pub trait JobExtractor: Send + Sync {
    async fn extract(&self, email: &EmailJob) -> Result<ExtractedJob, LlmError>;
}

pub struct LlmJobExtractor {
    llm: LlmClient,
}

impl LlmJobExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl JobExtractor for LlmJobExtractor {
    async fn extract(&self, email: &EmailJob) -> Result<ExtractedJob, LlmError> {
        let prompt = prompts::build_extract_job_prompt(&email.subject, &email.body);
        let system = json_system(prompts::EXTRACT_JOB_SYSTEM);
        self.llm.call_json(&prompt, &system, EXTRACT_PARAMS).await
    }
}

/// Subject minus one leading `urgent:`/`re:`/`fwd:`, the first 200 characters
/// of the body, and high urgency iff the subject mentions "urgent".
pub fn fallback_extract(email: &EmailJob) -> ExtractedJob {
    let mut description: String = email.body.chars().take(FALLBACK_DESCRIPTION_CHARS).collect();
    description.push_str("...");

    let urgency = if email.subject.to_lowercase().contains("urgent") {
        Urgency::High
    } else {
        Urgency::Medium
    };

    ExtractedJob {
        title: Some(strip_subject_prefix(&email.subject).to_string()),
        description: Some(description),
        urgency: Some(urgency.as_str().to_string()),
        ..ExtractedJob::default()
    }
}

fn strip_subject_prefix(subject: &str) -> &str {
    for prefix in ["urgent:", "re:", "fwd:"] {
        if subject.len() >= prefix.len()
            && subject.is_char_boundary(prefix.len())
            && subject[..prefix.len()].eq_ignore_ascii_case(prefix)
        {
            return subject[prefix.len()..].trim();
        }
    }
    subject.trim()
}

/// "recruitment@royallondon.nhs.uk" → "Royallondon NHS Trust". Non-NHS senders
/// get the generic "NHS Trust".
pub fn extract_client_name(from_email: &str) -> String {
    let Some((_, domain)) = from_email.split_once('@') else {
        return "NHS Trust".to_string();
    };
    if !domain.to_lowercase().contains("nhs") {
        return "NHS Trust".to_string();
    }

    let first_label = domain.split('.').next().unwrap_or_default();
    let spaced = first_label.replace(['-', '_'], " ");

    let mut name = String::with_capacity(spaced.len() + 10);
    let mut at_word_start = true;
    for ch in spaced.chars() {
        if at_word_start && ch.is_alphanumeric() {
            name.extend(ch.to_uppercase());
        } else {
            name.push(ch);
        }
        at_word_start = !ch.is_alphanumeric();
    }
    name.push_str(" NHS Trust");
    name
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Fills defaults around whatever was extracted. The job is open, sourced from
/// email, posted at the email's receipt time and not yet assigned.
pub fn build_job(email: &EmailJob, extracted: ExtractedJob) -> Job {
    Job {
        id: uuid::Uuid::new_v4(),
        title: non_blank(extracted.title).unwrap_or_else(|| "Untitled Position".to_string()),
        client: extract_client_name(&email.from_email),
        location: non_blank(extracted.location).unwrap_or_else(|| "UK".to_string()),
        job_type: non_blank(extracted.job_type)
            .and_then(|t| t.parse().ok())
            .unwrap_or(JobType::Contract),
        specialization: non_blank(extracted.specialization)
            .unwrap_or_else(|| "General".to_string()),
        salary: non_blank(extracted.salary).unwrap_or_else(|| "Competitive".to_string()),
        description: non_blank(extracted.description).unwrap_or_else(|| email.body.clone()),
        requirements: extracted.requirements.unwrap_or_default(),
        status: JobStatus::Open,
        urgency: non_blank(extracted.urgency)
            .and_then(|u| u.parse().ok())
            .unwrap_or(Urgency::Medium),
        grade: non_blank(extracted.grade),
        source: JobSource::Email,
        assigned_agent: None,
        posted_date: email.received_date,
    }
}

/// Extracts with `extractor`, falling back to the deterministic parse.
pub async fn parse_job_email(extractor: &dyn JobExtractor, email: &EmailJob) -> Job {
    let extracted = match extractor.extract(email).await {
        Ok(extracted) => extracted,
        Err(e) => {
            warn!("Job extraction failed for '{}' ({e}), using fallback parser", email.subject);
            fallback_extract(email)
        }
    };
    build_job(email, extracted)
}

#[cfg(test)]
pub(crate) mod stub {
    use super::*;

    /// Returns `job` for every email, or fails when `None`.
    pub struct FixedExtractor {
        pub job: Option<ExtractedJob>,
    }

    #[async_trait]
    impl JobExtractor for FixedExtractor {
        async fn extract(&self, _email: &EmailJob) -> Result<ExtractedJob, LlmError> {
            self.job.clone().ok_or(LlmError::EmptyContent)
        }
    }
}
