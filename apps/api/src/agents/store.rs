use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::agent::{Agent, AgentRow, AgentUpdate, NewAgent};

/// Roster order is creation order; the assigner breaks ties by it.
pub async fn list_agents(pool: &PgPool) -> Result<Vec<Agent>, AppError> {
    let rows = sqlx::query_as::<_, AgentRow>(
        "SELECT * FROM recruitment_agents ORDER BY created_at ASC, id ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Agent::from).collect())
}

pub async fn list_active_agents(pool: &PgPool) -> Result<Vec<Agent>, AppError> {
    let rows = sqlx::query_as::<_, AgentRow>(
        "SELECT * FROM recruitment_agents WHERE is_active ORDER BY created_at ASC, id ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Agent::from).collect())
}

pub async fn get_agent(pool: &PgPool, id: Uuid) -> Result<Option<Agent>, AppError> {
    let row = sqlx::query_as::<_, AgentRow>("SELECT * FROM recruitment_agents WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Agent::from))
}

pub async fn insert_agent(pool: &PgPool, agent: &NewAgent) -> Result<Agent, AppError> {
    let row = sqlx::query_as::<_, AgentRow>(
        r#"
        INSERT INTO recruitment_agents
            (id, name, email, specializations, grades, locations, is_active, capacity, metrics, preferences)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&agent.name)
    .bind(&agent.email)
    .bind(&agent.specializations)
    .bind(&agent.grades)
    .bind(&agent.locations)
    .bind(agent.is_active)
    .bind(Json(agent.capacity))
    .bind(Json(&agent.metrics))
    .bind(Json(&agent.preferences))
    .fetch_one(pool)
    .await?;
    Ok(row.into())
}

/// Absent fields keep their stored value.
pub async fn update_agent(pool: &PgPool, id: Uuid, update: &AgentUpdate) -> Result<Option<Agent>, AppError> {
    let row = sqlx::query_as::<_, AgentRow>(
        r#"
        UPDATE recruitment_agents SET
            name = COALESCE($2, name),
            email = COALESCE($3, email),
            specializations = COALESCE($4, specializations),
            grades = COALESCE($5, grades),
            locations = COALESCE($6, locations),
            is_active = COALESCE($7, is_active),
            capacity = COALESCE($8, capacity),
            metrics = COALESCE($9, metrics),
            preferences = COALESCE($10, preferences),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&update.name)
    .bind(&update.email)
    .bind(&update.specializations)
    .bind(&update.grades)
    .bind(&update.locations)
    .bind(update.is_active)
    .bind(update.capacity.map(Json))
    .bind(update.metrics.as_ref().map(Json))
    .bind(update.preferences.as_ref().map(Json))
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Agent::from))
}
