//! Draft generation. The LLM writes the email; if it fails, a fixed template
//! is used and the draft is marked as not AI-generated.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::{prompts::json_system, CompletionParams, LlmClient};
use crate::models::candidate::Candidate;
use crate::models::job::Job;
use crate::outreach::compliance::ComplianceDocument;
use crate::outreach::prompts::{self, fill};

const DRAFT_PARAMS: CompletionParams = CompletionParams {
    max_tokens: 600,
    temperature: 0.7,
};

const REPLY_PARAMS: CompletionParams = CompletionParams {
    max_tokens: 500,
    temperature: 0.5,
};

const DEFAULT_REPLY_CONFIDENCE: u32 = 75;
const FALLBACK_REPLY_CONFIDENCE: u32 = 60;
const TEAM_SIGNATURE: &str = "Your Recruitment Team";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DraftContent {
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedDraft {
    pub subject: String,
    pub body: String,
    pub ai_generated: bool,
}

impl GeneratedDraft {
    fn from_llm(content: DraftContent) -> Self {
        Self {
            subject: content.subject,
            body: content.body,
            ai_generated: true,
        }
    }

    fn from_template(content: DraftContent) -> Self {
        Self {
            subject: content.subject,
            body: content.body,
            ai_generated: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct ReplyContent {
    subject: String,
    body: String,
    confidence: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplySuggestion {
    pub subject: String,
    pub body: String,
    pub confidence: u32,
}

/// Asks the LLM for `{subject, body}`; blank fields count as a failure.
async fn draft_with_llm(llm: &LlmClient, prompt: &str) -> Option<DraftContent> {
    let system = json_system(prompts::OUTREACH_SYSTEM);
    match llm.call_json::<DraftContent>(prompt, &system, DRAFT_PARAMS).await {
        Ok(c) if !c.subject.trim().is_empty() && !c.body.trim().is_empty() => Some(c),
        Ok(_) => {
            warn!("LLM draft had an empty subject or body, using template");
            None
        }
        Err(e) => {
            warn!("LLM draft generation failed ({e}), using template");
            None
        }
    }
}

pub async fn job_opportunity(
    llm: &LlmClient,
    candidate: &Candidate,
    job: &Job,
    agent_name: &str,
) -> GeneratedDraft {
    let experience = candidate.experience_years.to_string();
    let requirements = job.requirements.join(", ");
    let prompt = fill(
        prompts::JOB_OPPORTUNITY_PROMPT,
        &[
            ("candidate_name", candidate.name.as_str()),
            ("candidate_specialization", candidate.specialization.as_str()),
            ("experience", experience.as_str()),
            ("job_title", job.title.as_str()),
            ("client", job.client.as_str()),
            ("location", job.location.as_str()),
            ("salary", job.salary.as_str()),
            ("requirements", requirements.as_str()),
            ("agent_name", agent_name),
        ],
    );

    match draft_with_llm(llm, &prompt).await {
        Some(content) => GeneratedDraft::from_llm(content),
        None => GeneratedDraft::from_template(job_opportunity_template(candidate, job, agent_name)),
    }
}

pub async fn compliance_request(
    llm: &LlmClient,
    candidate: &Candidate,
    missing: &[ComplianceDocument],
) -> GeneratedDraft {
    let names: Vec<&str> = missing.iter().map(|d| d.name).collect();
    let prompt = fill(
        prompts::COMPLIANCE_REQUEST_PROMPT,
        &[
            ("candidate_name", candidate.name.as_str()),
            ("missing_documents", names.join(", ").as_str()),
        ],
    );

    match draft_with_llm(llm, &prompt).await {
        Some(content) => GeneratedDraft::from_llm(content),
        None => GeneratedDraft::from_template(compliance_template(candidate, &names)),
    }
}

pub async fn interview_invitation(
    llm: &LlmClient,
    candidate: &Candidate,
    job: &Job,
    agent_name: &str,
) -> GeneratedDraft {
    let prompt = fill(
        prompts::INTERVIEW_INVITATION_PROMPT,
        &[
            ("candidate_name", candidate.name.as_str()),
            ("job_title", job.title.as_str()),
            ("client", job.client.as_str()),
            ("location", job.location.as_str()),
            ("agent_name", agent_name),
        ],
    );

    match draft_with_llm(llm, &prompt).await {
        Some(content) => GeneratedDraft::from_llm(content),
        None => GeneratedDraft::from_template(interview_template(candidate, job, agent_name)),
    }
}

pub async fn suggest_reply(llm: &LlmClient, original_body: &str, doctor_response: &str) -> ReplySuggestion {
    let prompt = fill(
        prompts::REPLY_PROMPT,
        &[
            ("original_body", original_body),
            ("doctor_response", doctor_response),
        ],
    );
    let system = json_system(prompts::OUTREACH_SYSTEM);

    match llm.call_json::<ReplyContent>(&prompt, &system, REPLY_PARAMS).await {
        Ok(reply) => ReplySuggestion {
            subject: reply.subject,
            body: reply.body,
            confidence: reply_confidence(reply.confidence),
        },
        Err(e) => {
            warn!("LLM reply suggestion failed ({e}), using template");
            fallback_reply()
        }
    }
}

/// Missing, zero or non-finite confidence becomes the default.
fn reply_confidence(raw: Option<f64>) -> u32 {
    match raw {
        Some(c) if c.is_finite() && c > 0.0 => c.round().min(100.0) as u32,
        _ => DEFAULT_REPLY_CONFIDENCE,
    }
}

pub fn job_opportunity_template(candidate: &Candidate, job: &Job, agent_name: &str) -> DraftContent {
    let requirements: Vec<String> = job.requirements.iter().map(|r| format!("• {r}")).collect();
    DraftContent {
        subject: format!(
            "Exciting {} Opportunity at {}",
            job.specialization, job.client
        ),
        body: format!(
            "Dear {name},

I hope this email finds you well. I'm reaching out because I believe you would be an excellent fit for a {spec} position we have available.

Position: {title}
Location: {location}
Salary: {salary}
Type: {job_type}

This role at {client} offers an exciting opportunity to work in a dynamic healthcare environment. Given your {years} years of experience in {candidate_spec}, I believe this position aligns perfectly with your expertise.

Key requirements include:
{requirements}

Would you be interested in learning more about this opportunity? I'd be happy to discuss the details and answer any questions you might have.

Best regards,
{agent_name}
Recruitment Consultant",
            name = candidate.name,
            spec = job.specialization,
            title = job.title,
            location = job.location,
            salary = job.salary,
            job_type = job.job_type.as_str(),
            client = job.client,
            years = candidate.experience_years,
            candidate_spec = candidate.specialization,
            requirements = requirements.join("\n"),
        ),
    }
}

pub fn compliance_template(candidate: &Candidate, missing: &[&str]) -> DraftContent {
    let missing: Vec<String> = missing.iter().map(|d| format!("• {d}")).collect();
    DraftContent {
        subject: "Compliance Documentation Required".to_string(),
        body: format!(
            "Dear {name},

Thank you for your interest in our opportunities. To proceed with your application, we need to collect some additional compliance documentation.

Missing documents:
{missing}

Please provide these documents at your earliest convenience. You can upload them through our secure portal or email them directly to me.

If you have any questions about the required documentation, please don't hesitate to reach out.

Best regards,
{TEAM_SIGNATURE}",
            name = candidate.name,
            missing = missing.join("\n"),
        ),
    }
}

pub fn interview_template(candidate: &Candidate, job: &Job, agent_name: &str) -> DraftContent {
    DraftContent {
        subject: format!("Interview Invitation: {} at {}", job.title, job.client),
        body: format!(
            "Dear {name},

I'm pleased to let you know that {client} would like to invite you to interview for the {title} position in {location}.

Could you let me know your availability over the coming week? Please have your GMC registration details and photo ID ready for the interview.

Best regards,
{agent_name}
Recruitment Consultant",
            name = candidate.name,
            client = job.client,
            title = job.title,
            location = job.location,
        ),
    }
}

pub fn fallback_reply() -> ReplySuggestion {
    ReplySuggestion {
        subject: "Re: Your Response".to_string(),
        body: format!(
            "Thank you for your response. I've noted your feedback and will follow up accordingly.

If you have any additional questions or need further assistance, please don't hesitate to reach out.

Best regards,
{TEAM_SIGNATURE}"
        ),
        confidence: FALLBACK_REPLY_CONFIDENCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::Urgency;
    use crate::test_support::{candidate, job};

    #[test]
    fn test_job_opportunity_template() {
        let c = candidate(None);
        let mut j = job("Consultant Cardiologist", "Cardiology", Urgency::High, None);
        j.requirements = vec!["GMC Registration".into(), "CCT in Cardiology".into()];

        let draft = job_opportunity_template(&c, &j, "Sarah Mitchell");
        assert_eq!(
            draft.subject,
            "Exciting Cardiology Opportunity at Royal London Hospital"
        );
        assert!(draft.body.starts_with("Dear Dr. Sarah Johnson,\n\n"));
        assert!(draft.body.contains("Type: locum\n"));
        assert!(draft.body.contains("Given your 8 years of experience in Cardiology"));
        assert!(draft.body.contains("• GMC Registration\n• CCT in Cardiology\n"));
        assert!(draft.body.ends_with("Sarah Mitchell\nRecruitment Consultant"));
    }

    #[test]
    fn test_compliance_template_lists_documents() {
        let draft = compliance_template(&candidate(None), &["DBS Check", "Updated CV"]);
        assert_eq!(draft.subject, "Compliance Documentation Required");
        assert!(draft.body.contains("Missing documents:\n• DBS Check\n• Updated CV\n"));
        assert!(draft.body.ends_with("Your Recruitment Team"));
    }

    #[test]
    fn test_reply_confidence() {
        assert_eq!(reply_confidence(None), 75);
        assert_eq!(reply_confidence(Some(0.0)), 75);
        assert_eq!(reply_confidence(Some(f64::NAN)), 75);
        assert_eq!(reply_confidence(Some(88.4)), 88);
        assert_eq!(reply_confidence(Some(140.0)), 100);
        assert_eq!(fallback_reply().confidence, 60);
    }

    #[test]
    fn test_interview_template_mentions_job() {
        let j = job("Emergency Medicine Registrar", "Emergency Medicine", Urgency::High, None);
        let draft = interview_template(&candidate(None), &j, "Tom Reeves");
        assert_eq!(
            draft.subject,
            "Interview Invitation: Emergency Medicine Registrar at Royal London Hospital"
        );
        assert!(draft.body.contains("Tom Reeves"));
    }
}
