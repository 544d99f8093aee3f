use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{info, warn};

use crate::candidates::store as candidate_store;
use crate::errors::AppError;
use crate::integrations::{unseen_jobs, IntegrationStatus};
use crate::jobs::store as job_store;
use crate::mailer::validate_email;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub candidates_imported: usize,
    pub candidates_skipped: usize,
    pub jobs_imported: usize,
    pub jobs_skipped: usize,
}

/// GET /api/v1/integrations
pub async fn handle_integration_status(State(state): State<AppState>) -> Json<IntegrationStatus> {
    Json(IntegrationStatus {
        openai: !state.config.openai_api_key.trim().is_empty(),
        sendgrid: state.mailer.is_configured(),
        eclipse: state.eclipse.is_some(),
    })
}

/// POST /api/v1/eclipse/sync
/// Pulls candidates and jobs from Eclipse. Known emails and known
/// title/client pairs are skipped.
pub async fn handle_eclipse_sync(State(state): State<AppState>) -> Result<Json<SyncResponse>, AppError> {
    let eclipse = state
        .eclipse
        .as_ref()
        .ok_or_else(|| AppError::UnprocessableEntity("Eclipse integration is not configured".into()))?;

    let remote_candidates = eclipse.get_candidates().await?;
    let remote_jobs = eclipse.get_jobs().await?;
    info!(
        "Fetched {} candidates and {} jobs from Eclipse",
        remote_candidates.len(),
        remote_jobs.len()
    );

    let existing_jobs = job_store::list_jobs(&state.db).await?;
    let fetched_jobs = remote_jobs.len();
    let jobs = unseen_jobs(
        &existing_jobs,
        remote_jobs.into_iter().map(|j| j.into_job()).collect(),
    );

    let mut tx = state.db.begin().await?;

    let mut candidates_imported = 0;
    let mut candidates_skipped = 0;
    for remote in remote_candidates {
        let eclipse_id = remote.id.clone();
        let candidate = remote.into_new_candidate().into_candidate();
        if candidate.name.trim().is_empty() || !validate_email(&candidate.email) {
            warn!("Skipping Eclipse candidate {eclipse_id}: missing name or invalid email");
            candidates_skipped += 1;
            continue;
        }
        if candidate_store::insert_candidate(&mut tx, &candidate).await? {
            candidates_imported += 1;
        } else {
            candidates_skipped += 1;
        }
    }

    for job in &jobs {
        job_store::insert_job(&mut tx, job).await?;
    }

    tx.commit().await?;

    let response = SyncResponse {
        candidates_imported,
        candidates_skipped,
        jobs_imported: jobs.len(),
        jobs_skipped: fetched_jobs - jobs.len(),
    };
    info!("Eclipse sync complete: {response:?}");
    Ok(Json(response))
}
