use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftKind {
    JobOpportunity,
    ComplianceRequest,
    InterviewInvitation,
}

impl DraftKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftKind::JobOpportunity => "job_opportunity",
            DraftKind::ComplianceRequest => "compliance_request",
            DraftKind::InterviewInvitation => "interview_invitation",
        }
    }
}

impl FromStr for DraftKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "job_opportunity" => Ok(DraftKind::JobOpportunity),
            "compliance_request" => Ok(DraftKind::ComplianceRequest),
            "interview_invitation" => Ok(DraftKind::InterviewInvitation),
            other => Err(anyhow!("unknown draft kind '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    Draft,
    PendingApproval,
    Approved,
    /// Claimed by a send in progress.
    Sending,
    Sent,
    Rejected,
}

impl DraftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftStatus::Draft => "draft",
            DraftStatus::PendingApproval => "pending_approval",
            DraftStatus::Approved => "approved",
            DraftStatus::Sending => "sending",
            DraftStatus::Sent => "sent",
            DraftStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for DraftStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(DraftStatus::Draft),
            "pending_approval" => Ok(DraftStatus::PendingApproval),
            "approved" => Ok(DraftStatus::Approved),
            "sending" => Ok(DraftStatus::Sending),
            "sent" => Ok(DraftStatus::Sent),
            "rejected" => Ok(DraftStatus::Rejected),
            other => Err(anyhow!("unknown draft status '{other}'")),
        }
    }
}

/// Outreach email to a doctor, held for agent approval before it is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorEmail {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Option<Uuid>,
    pub kind: DraftKind,
    pub subject: String,
    pub body: String,
    pub status: DraftStatus,
    pub ai_generated: bool,
    pub agent_notes: Option<String>,
    pub message_id: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct DoctorEmailRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Option<Uuid>,
    pub kind: String,
    pub subject: String,
    pub body: String,
    pub status: String,
    pub ai_generated: bool,
    pub agent_notes: Option<String>,
    pub message_id: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DoctorEmailRow> for DoctorEmail {
    type Error = anyhow::Error;

    fn try_from(row: DoctorEmailRow) -> Result<Self, Self::Error> {
        Ok(DoctorEmail {
            id: row.id,
            candidate_id: row.candidate_id,
            job_id: row.job_id,
            kind: row.kind.parse()?,
            subject: row.subject,
            body: row.body,
            status: row.status.parse()?,
            ai_generated: row.ai_generated,
            agent_notes: row.agent_notes,
            message_id: row.message_id,
            sent_at: row.sent_at,
            created_at: row.created_at,
        })
    }
}

/// Agent edits to a pending draft.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftEdit {
    pub subject: Option<String>,
    pub body: Option<String>,
    pub agent_notes: Option<String>,
}
