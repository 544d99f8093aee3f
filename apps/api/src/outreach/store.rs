use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::outreach::{DoctorEmail, DoctorEmailRow, DraftEdit, DraftStatus};
use crate::outreach::send::SendLedger;

fn convert(row: Option<DoctorEmailRow>) -> Result<Option<DoctorEmail>, AppError> {
    Ok(row.map(DoctorEmail::try_from).transpose()?)
}

pub async fn insert_draft(pool: &PgPool, draft: &DoctorEmail) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO doctor_emails
            (id, candidate_id, job_id, kind, subject, body, status, ai_generated, agent_notes, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(draft.id)
    .bind(draft.candidate_id)
    .bind(draft.job_id)
    .bind(draft.kind.as_str())
    .bind(&draft.subject)
    .bind(&draft.body)
    .bind(draft.status.as_str())
    .bind(draft.ai_generated)
    .bind(&draft.agent_notes)
    .bind(draft.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_draft(pool: &PgPool, id: Uuid) -> Result<Option<DoctorEmail>, AppError> {
    let row = sqlx::query_as::<_, DoctorEmailRow>("SELECT * FROM doctor_emails WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    convert(row)
}

/// Oldest first, so agents work the queue in arrival order.
pub async fn list_by_status(pool: &PgPool, status: DraftStatus) -> Result<Vec<DoctorEmail>, AppError> {
    let rows = sqlx::query_as::<_, DoctorEmailRow>(
        "SELECT * FROM doctor_emails WHERE status = $1 ORDER BY created_at ASC",
    )
    .bind(status.as_str())
    .fetch_all(pool)
    .await?;
    Ok(rows
        .into_iter()
        .map(DoctorEmail::try_from)
        .collect::<anyhow::Result<Vec<_>>>()?)
}

/// Applies an edit only while the draft is still in `expected` status.
pub async fn update_content(
    pool: &PgPool,
    id: Uuid,
    expected: DraftStatus,
    edit: &DraftEdit,
) -> Result<Option<DoctorEmail>, AppError> {
    let row = sqlx::query_as::<_, DoctorEmailRow>(
        r#"
        UPDATE doctor_emails SET
            subject = COALESCE($3, subject),
            body = COALESCE($4, body),
            agent_notes = COALESCE($5, agent_notes),
            updated_at = NOW()
        WHERE id = $1 AND status = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(expected.as_str())
    .bind(&edit.subject)
    .bind(&edit.body)
    .bind(&edit.agent_notes)
    .fetch_optional(pool)
    .await?;
    convert(row)
}

/// Compare-and-set on status. `None` means the draft moved underneath us.
pub async fn transition(
    pool: &PgPool,
    id: Uuid,
    from: DraftStatus,
    to: DraftStatus,
    agent_notes: Option<&str>,
) -> Result<Option<DoctorEmail>, AppError> {
    let row = sqlx::query_as::<_, DoctorEmailRow>(
        r#"
        UPDATE doctor_emails SET
            status = $3,
            agent_notes = COALESCE($4, agent_notes),
            updated_at = NOW()
        WHERE id = $1 AND status = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(from.as_str())
    .bind(to.as_str())
    .bind(agent_notes)
    .fetch_optional(pool)
    .await?;
    convert(row)
}

/// Finishes a claimed send.
pub async fn mark_sent(
    pool: &PgPool,
    id: Uuid,
    message_id: &str,
    sent_at: DateTime<Utc>,
) -> Result<Option<DoctorEmail>, AppError> {
    let row = sqlx::query_as::<_, DoctorEmailRow>(
        r#"
        UPDATE doctor_emails SET
            status = 'sent',
            message_id = $2,
            sent_at = $3,
            updated_at = NOW()
        WHERE id = $1 AND status = 'sending'
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(message_id)
    .bind(sent_at)
    .fetch_optional(pool)
    .await?;
    convert(row)
}

/// Send bookkeeping on `doctor_emails.status`; each step is a compare-and-set.
pub struct PgSendLedger {
    pool: PgPool,
}

impl PgSendLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SendLedger for PgSendLedger {
    async fn claim(&self, draft_id: Uuid) -> Result<bool, AppError> {
        let claimed = transition(
            &self.pool,
            draft_id,
            DraftStatus::Approved,
            DraftStatus::Sending,
            None,
        )
        .await?;
        Ok(claimed.is_some())
    }

    async fn release(&self, draft_id: Uuid) -> Result<(), AppError> {
        transition(
            &self.pool,
            draft_id,
            DraftStatus::Sending,
            DraftStatus::Approved,
            None,
        )
        .await?;
        Ok(())
    }

    async fn complete(&self, draft_id: Uuid, message_id: &str) -> Result<(), AppError> {
        mark_sent(&self.pool, draft_id, message_id, Utc::now())
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::Conflict(format!("Draft {draft_id} is no longer being sent")))
    }
}
