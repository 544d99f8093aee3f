use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::candidates::store as candidate_store;
use crate::errors::AppError;
use crate::jobs::store as job_store;
use crate::matching::{find_matching_candidates, store};
use crate::models::matching::{CandidateMatch, CandidateMatchRow};
use crate::state::AppState;

/// POST /api/v1/jobs/:id/matches
/// Re-runs matching for one job and replaces its stored matches.
pub async fn handle_match_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CandidateMatch>>, AppError> {
    let job = job_store::get_job(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    let candidates = candidate_store::list_candidates(&state.db).await?;

    let matches = find_matching_candidates(&job, &candidates, state.matcher.as_ref()).await;

    let mut tx = state.db.begin().await?;
    store::replace_job_matches(&mut tx, id, &matches).await?;
    tx.commit().await?;

    tracing::info!("Stored {} matches for job '{}'", matches.len(), job.title);
    Ok(Json(matches))
}

/// GET /api/v1/matches
pub async fn handle_list_matches(
    State(state): State<AppState>,
) -> Result<Json<Vec<CandidateMatchRow>>, AppError> {
    Ok(Json(store::list_matches(&state.db, None).await?))
}
