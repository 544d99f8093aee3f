use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::agents::store as agent_store;
use crate::candidates::store as candidate_store;
use crate::errors::AppError;
use crate::jobs::store as job_store;
use crate::state::AppState;
use crate::workload::calculator::{calculate_agent_workload, WorkloadResult};
use crate::workload::rebalance::{suggest_rebalancing, RebalanceSuggestion};
use crate::workload::team::team_workload_distribution;

#[derive(Serialize)]
pub struct AgentWorkloadResponse {
    pub agent_id: Uuid,
    pub agent_name: String,
    #[serde(flatten)]
    pub workload: WorkloadResult,
}

/// GET /api/v1/agents/:id/workload
pub async fn handle_agent_workload(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AgentWorkloadResponse>, AppError> {
    let agent = agent_store::get_agent(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Agent {id} not found")))?;
    let jobs = job_store::list_jobs(&state.db).await?;
    let candidates = candidate_store::list_candidates(&state.db).await?;

    let workload = calculate_agent_workload(&agent, &jobs, &candidates);
    Ok(Json(AgentWorkloadResponse {
        agent_id: agent.id,
        agent_name: agent.name,
        workload,
    }))
}

/// GET /api/v1/workload/team
/// Active agents only.
pub async fn handle_team_workload(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let agents = agent_store::list_active_agents(&state.db).await?;
    let jobs = job_store::list_jobs(&state.db).await?;
    let candidates = candidate_store::list_candidates(&state.db).await?;

    let team = team_workload_distribution(&agents, &jobs, &candidates);
    // The distribution borrows the roster, so serialize before it goes out of scope.
    let body = serde_json::to_value(&team).map_err(anyhow::Error::from)?;
    Ok(Json(body))
}

/// GET /api/v1/workload/rebalancing
pub async fn handle_rebalancing(
    State(state): State<AppState>,
) -> Result<Json<Vec<RebalanceSuggestion>>, AppError> {
    let agents = agent_store::list_active_agents(&state.db).await?;
    let jobs = job_store::list_jobs(&state.db).await?;
    let candidates = candidate_store::list_candidates(&state.db).await?;

    Ok(Json(suggest_rebalancing(&agents, &jobs, &candidates)))
}
