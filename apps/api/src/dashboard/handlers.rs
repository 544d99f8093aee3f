use axum::{extract::State, Json};

use crate::agents::store as agent_store;
use crate::candidates::store as candidate_store;
use crate::dashboard::{summarize, DashboardStats, TOP_MATCHES};
use crate::errors::AppError;
use crate::jobs::store as job_store;
use crate::matching::store as match_store;
use crate::state::AppState;

/// GET /api/v1/dashboard
pub async fn handle_dashboard(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    let agents = agent_store::list_active_agents(&state.db).await?;
    let jobs = job_store::list_jobs(&state.db).await?;
    let candidates = candidate_store::list_candidates(&state.db).await?;
    let total_matches = match_store::count_matches(&state.db).await?;
    let top_matches = match_store::list_matches(&state.db, Some(TOP_MATCHES)).await?;

    Ok(Json(summarize(&agents, &jobs, &candidates, total_matches, top_matches)))
}
