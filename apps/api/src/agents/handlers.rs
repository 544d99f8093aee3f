use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::agents::{store, validate_roster_entry};
use crate::errors::AppError;
use crate::mailer::validate_email;
use crate::models::agent::{Agent, AgentUpdate, NewAgent};
use crate::state::AppState;

/// GET /api/v1/agents
pub async fn handle_list_agents(State(state): State<AppState>) -> Result<Json<Vec<Agent>>, AppError> {
    Ok(Json(store::list_agents(&state.db).await?))
}

/// POST /api/v1/agents
pub async fn handle_create_agent(
    State(state): State<AppState>,
    Json(req): Json<NewAgent>,
) -> Result<(StatusCode, Json<Agent>), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    if !validate_email(&req.email) {
        return Err(AppError::Validation(format!("invalid email '{}'", req.email)));
    }
    validate_roster_entry(req.is_active, &req.capacity, &req.preferences)?;

    let agent = store::insert_agent(&state.db, &req).await?;
    tracing::info!("Created agent {} ({})", agent.name, agent.id);
    Ok((StatusCode::CREATED, Json(agent)))
}

/// GET /api/v1/agents/:id
pub async fn handle_get_agent(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Agent>, AppError> {
    store::get_agent(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Agent {id} not found")))
}

/// PATCH /api/v1/agents/:id
pub async fn handle_update_agent(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AgentUpdate>,
) -> Result<Json<Agent>, AppError> {
    let existing = store::get_agent(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Agent {id} not found")))?;

    // Validate the record as it will look after the patch.
    validate_roster_entry(
        req.is_active.unwrap_or(existing.is_active),
        req.capacity.as_ref().unwrap_or(&existing.capacity),
        req.preferences.as_ref().unwrap_or(&existing.preferences),
    )?;
    if let Some(email) = &req.email {
        if !validate_email(email) {
            return Err(AppError::Validation(format!("invalid email '{email}'")));
        }
    }

    store::update_agent(&state.db, id, &req)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Agent {id} not found")))
}
