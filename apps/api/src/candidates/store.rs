use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::{Candidate, CandidateRow, CandidateUpdate};

/// Every candidate, most recently active first.
pub async fn list_candidates(pool: &PgPool) -> Result<Vec<Candidate>, AppError> {
    let rows = sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates ORDER BY last_active DESC")
        .fetch_all(pool)
        .await?;
    Ok(rows
        .into_iter()
        .map(Candidate::try_from)
        .collect::<anyhow::Result<Vec<_>>>()?)
}

pub async fn get_candidate(pool: &PgPool, id: Uuid) -> Result<Option<Candidate>, AppError> {
    let row = sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Candidate::try_from).transpose()?)
}

/// Inserts unless a candidate with the same email exists. Returns whether a
/// row was written.
pub async fn insert_candidate(conn: &mut PgConnection, candidate: &Candidate) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO candidates
            (id, name, email, phone, specialization, experience_years, location, cv_summary,
             status, compliance, grade, assigned_agent_id, last_active)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        ON CONFLICT (email) DO NOTHING
        "#,
    )
    .bind(candidate.id)
    .bind(&candidate.name)
    .bind(&candidate.email)
    .bind(&candidate.phone)
    .bind(&candidate.specialization)
    .bind(candidate.experience_years as i32)
    .bind(&candidate.location)
    .bind(&candidate.cv_summary)
    .bind(candidate.status.as_str())
    .bind(Json(candidate.compliance))
    .bind(&candidate.grade)
    .bind(candidate.assigned_agent)
    .bind(candidate.last_active)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Absent fields keep their stored value.
pub async fn update_candidate(
    pool: &PgPool,
    id: Uuid,
    update: &CandidateUpdate,
) -> Result<Option<Candidate>, AppError> {
    let row = sqlx::query_as::<_, CandidateRow>(
        r#"
        UPDATE candidates SET
            name = COALESCE($2, name),
            email = COALESCE($3, email),
            phone = COALESCE($4, phone),
            specialization = COALESCE($5, specialization),
            experience_years = COALESCE($6, experience_years),
            location = COALESCE($7, location),
            cv_summary = COALESCE($8, cv_summary),
            status = COALESCE($9, status),
            compliance = COALESCE($10, compliance),
            grade = COALESCE($11, grade),
            assigned_agent_id = COALESCE($12, assigned_agent_id),
            last_active = NOW(),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&update.name)
    .bind(&update.email)
    .bind(&update.phone)
    .bind(&update.specialization)
    .bind(update.experience_years.map(|v| v as i32))
    .bind(&update.location)
    .bind(&update.cv_summary)
    .bind(update.status.map(|s| s.as_str()))
    .bind(update.compliance.map(Json))
    .bind(&update.grade)
    .bind(update.assigned_agent)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Candidate::try_from).transpose()?)
}
