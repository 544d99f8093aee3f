use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agents::store as agent_store;
use crate::candidates::store as candidate_store;
use crate::errors::AppError;
use crate::jobs::store as job_store;
use crate::models::job::Job;
use crate::models::outreach::{DoctorEmail, DraftEdit, DraftKind, DraftStatus};
use crate::outreach::compliance::{missing_documents, required_documents, ComplianceDocument};
use crate::outreach::drafts::{self, ReplySuggestion};
use crate::outreach::store::PgSendLedger;
use crate::outreach::{next_status, send, store, DraftAction};
use crate::state::AppState;

const DEFAULT_SENDER: &str = "Your Recruitment Team";

#[derive(Debug, Deserialize)]
pub struct GenerateDraftRequest {
    pub candidate_id: Uuid,
    pub job_id: Option<Uuid>,
    pub kind: DraftKind,
    /// Signs the email; defaults to the job's assigned agent.
    pub agent_id: Option<Uuid>,
    /// Keep the draft out of the approval queue until it is submitted.
    #[serde(default)]
    pub save_as_draft: bool,
}

#[derive(Debug, Serialize)]
pub struct GenerateDraftResponse {
    pub draft: DoctorEmail,
    /// Outstanding documents, for compliance requests.
    pub missing_documents: Vec<ComplianceDocument>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReviewRequest {
    pub agent_notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub doctor_response: String,
}

async fn load_draft(state: &AppState, id: Uuid) -> Result<DoctorEmail, AppError> {
    store::get_draft(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Draft {id} not found")))
}

fn moved(id: Uuid) -> AppError {
    AppError::Conflict(format!("Draft {id} changed status while being updated"))
}

async fn sender_name(state: &AppState, agent_id: Option<Uuid>, job: Option<&Job>) -> Result<String, AppError> {
    let Some(agent_id) = agent_id.or_else(|| job.and_then(|j| j.assigned_agent)) else {
        return Ok(DEFAULT_SENDER.to_string());
    };
    Ok(agent_store::get_agent(&state.db, agent_id)
        .await?
        .map(|a| a.name)
        .unwrap_or_else(|| DEFAULT_SENDER.to_string()))
}

fn initial_status(save_as_draft: bool) -> DraftStatus {
    if save_as_draft {
        DraftStatus::Draft
    } else {
        DraftStatus::PendingApproval
    }
}

/// POST /api/v1/outreach/drafts
/// Generates a draft and queues it for approval, or saves it with `save_as_draft`.
pub async fn handle_generate_draft(
    State(state): State<AppState>,
    Json(req): Json<GenerateDraftRequest>,
) -> Result<(StatusCode, Json<GenerateDraftResponse>), AppError> {
    let candidate = candidate_store::get_candidate(&state.db, req.candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {} not found", req.candidate_id)))?;

    let job = match req.job_id {
        Some(job_id) => Some(
            job_store::get_job(&state.db, job_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?,
        ),
        None => None,
    };

    let mut missing = Vec::new();
    let generated = match (req.kind, job.as_ref()) {
        (DraftKind::JobOpportunity, Some(job)) => {
            let sender = sender_name(&state, req.agent_id, Some(job)).await?;
            drafts::job_opportunity(&state.llm, &candidate, job, &sender).await
        }
        (DraftKind::InterviewInvitation, Some(job)) => {
            let sender = sender_name(&state, req.agent_id, Some(job)).await?;
            drafts::interview_invitation(&state.llm, &candidate, job, &sender).await
        }
        (DraftKind::JobOpportunity | DraftKind::InterviewInvitation, None) => {
            return Err(AppError::Validation(format!(
                "job_id is required for {} drafts",
                req.kind.as_str()
            )));
        }
        (DraftKind::ComplianceRequest, job) => {
            missing = missing_documents(&candidate, &required_documents(job));
            drafts::compliance_request(&state.llm, &candidate, &missing).await
        }
    };

    let draft = DoctorEmail {
        id: Uuid::new_v4(),
        candidate_id: candidate.id,
        job_id: job.as_ref().map(|j| j.id),
        kind: req.kind,
        subject: generated.subject,
        body: generated.body,
        status: initial_status(req.save_as_draft),
        ai_generated: generated.ai_generated,
        agent_notes: None,
        message_id: None,
        sent_at: None,
        created_at: Utc::now(),
    };
    store::insert_draft(&state.db, &draft).await?;
    tracing::info!(
        "Queued {} draft {} for {} (ai_generated={})",
        draft.kind.as_str(),
        draft.id,
        candidate.name,
        draft.ai_generated
    );

    Ok((
        StatusCode::CREATED,
        Json(GenerateDraftResponse {
            draft,
            missing_documents: missing,
        }),
    ))
}

/// GET /api/v1/outreach/pending
pub async fn handle_list_pending(
    State(state): State<AppState>,
) -> Result<Json<Vec<DoctorEmail>>, AppError> {
    Ok(Json(
        store::list_by_status(&state.db, DraftStatus::PendingApproval).await?,
    ))
}

/// PATCH /api/v1/outreach/:id
pub async fn handle_edit_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(edit): Json<DraftEdit>,
) -> Result<Json<DoctorEmail>, AppError> {
    let draft = load_draft(&state, id).await?;
    let status = next_status(draft.status, DraftAction::Edit)?;
    store::update_content(&state.db, id, status, &edit)
        .await?
        .map(Json)
        .ok_or_else(|| moved(id))
}

async fn review(
    state: &AppState,
    id: Uuid,
    action: DraftAction,
    req: ReviewRequest,
) -> Result<Json<DoctorEmail>, AppError> {
    let draft = load_draft(state, id).await?;
    let to = next_status(draft.status, action)?;
    let updated = store::transition(&state.db, id, draft.status, to, req.agent_notes.as_deref())
        .await?
        .ok_or_else(|| moved(id))?;
    tracing::info!("Draft {id} {} -> {}", draft.status.as_str(), to.as_str());
    Ok(Json(updated))
}

/// POST /api/v1/outreach/:id/submit
/// Moves a saved draft into the approval queue.
pub async fn handle_submit_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    req: Option<Json<ReviewRequest>>,
) -> Result<Json<DoctorEmail>, AppError> {
    review(&state, id, DraftAction::Submit, req.map(|j| j.0).unwrap_or_default()).await
}

/// POST /api/v1/outreach/:id/approve
pub async fn handle_approve_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    req: Option<Json<ReviewRequest>>,
) -> Result<Json<DoctorEmail>, AppError> {
    review(&state, id, DraftAction::Approve, req.map(|j| j.0).unwrap_or_default()).await
}

/// POST /api/v1/outreach/:id/reject
pub async fn handle_reject_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    req: Option<Json<ReviewRequest>>,
) -> Result<Json<DoctorEmail>, AppError> {
    review(&state, id, DraftAction::Reject, req.map(|j| j.0).unwrap_or_default()).await
}

/// POST /api/v1/outreach/:id/send
/// Only approved drafts go out, and each at most once. The SendGrid message id
/// is stored on the draft.
pub async fn handle_send_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DoctorEmail>, AppError> {
    let draft = load_draft(&state, id).await?;
    next_status(draft.status, DraftAction::Send)?;

    let candidate = candidate_store::get_candidate(&state.db, draft.candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {} not found", draft.candidate_id)))?;

    let ledger = PgSendLedger::new(state.db.clone());
    let message_id = send::deliver(
        &ledger,
        &state.mailer,
        id,
        &candidate.email,
        &draft.subject,
        &draft.body,
    )
    .await?;
    tracing::info!("Draft {id} sent to {} ({message_id})", candidate.email);

    load_draft(&state, id).await.map(Json)
}

/// POST /api/v1/outreach/:id/reply
/// Suggests a response to the doctor's reply to this email. Nothing is stored.
pub async fn handle_suggest_reply(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReplyRequest>,
) -> Result<Json<ReplySuggestion>, AppError> {
    if req.doctor_response.trim().is_empty() {
        return Err(AppError::Validation("doctor_response is required".into()));
    }
    let draft = load_draft(&state, id).await?;
    Ok(Json(
        drafts::suggest_reply(&state.llm, &draft.body, &req.doctor_response).await,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_drafts_queue_for_approval_unless_saved() {
        assert_eq!(initial_status(false), DraftStatus::PendingApproval);
        assert_eq!(initial_status(true), DraftStatus::Draft);
        assert_eq!(
            next_status(initial_status(true), DraftAction::Submit).unwrap(),
            DraftStatus::PendingApproval
        );
    }

    #[test]
    fn test_save_as_draft_defaults_off() {
        let req: GenerateDraftRequest = serde_json::from_str(&format!(
            r#"{{"candidate_id": "{}", "kind": "compliance_request"}}"#,
            Uuid::new_v4()
        ))
        .unwrap();
        assert!(!req.save_as_draft);
        assert!(req.job_id.is_none());
    }
}
