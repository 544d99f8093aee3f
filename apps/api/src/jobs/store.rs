use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{Job, JobRow, JobUpdate};

fn into_jobs(rows: Vec<JobRow>) -> Result<Vec<Job>, AppError> {
    Ok(rows
        .into_iter()
        .map(Job::try_from)
        .collect::<anyhow::Result<Vec<_>>>()?)
}

/// Every job, newest first.
pub async fn list_jobs(pool: &PgPool) -> Result<Vec<Job>, AppError> {
    let rows = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY posted_date DESC")
        .fetch_all(pool)
        .await?;
    into_jobs(rows)
}

pub async fn get_job(pool: &PgPool, id: Uuid) -> Result<Option<Job>, AppError> {
    let row = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Job::try_from).transpose()?)
}

pub async fn insert_job(conn: &mut PgConnection, job: &Job) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO jobs
            (id, title, client, location, type, specialization, salary, description,
             requirements, status, urgency, grade, source, assigned_agent_id, posted_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        "#,
    )
    .bind(job.id)
    .bind(&job.title)
    .bind(&job.client)
    .bind(&job.location)
    .bind(job.job_type.as_str())
    .bind(&job.specialization)
    .bind(&job.salary)
    .bind(&job.description)
    .bind(&job.requirements)
    .bind(job.status.as_str())
    .bind(job.urgency.as_str())
    .bind(&job.grade)
    .bind(job.source.as_str())
    .bind(job.assigned_agent)
    .bind(job.posted_date)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Absent fields keep their stored value.
pub async fn update_job(pool: &PgPool, id: Uuid, update: &JobUpdate) -> Result<Option<Job>, AppError> {
    let row = sqlx::query_as::<_, JobRow>(
        r#"
        UPDATE jobs SET
            title = COALESCE($2, title),
            client = COALESCE($3, client),
            location = COALESCE($4, location),
            type = COALESCE($5, type),
            specialization = COALESCE($6, specialization),
            salary = COALESCE($7, salary),
            description = COALESCE($8, description),
            requirements = COALESCE($9, requirements),
            status = COALESCE($10, status),
            urgency = COALESCE($11, urgency),
            grade = COALESCE($12, grade),
            assigned_agent_id = COALESCE($13, assigned_agent_id),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&update.title)
    .bind(&update.client)
    .bind(&update.location)
    .bind(update.job_type.map(|t| t.as_str()))
    .bind(&update.specialization)
    .bind(&update.salary)
    .bind(&update.description)
    .bind(&update.requirements)
    .bind(update.status.map(|s| s.as_str()))
    .bind(update.urgency.map(|u| u.as_str()))
    .bind(&update.grade)
    .bind(update.assigned_agent)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Job::try_from).transpose()?)
}

/// Sets the agent only while the job is still open and unassigned. Returns
/// false when another writer got there first.
pub async fn assign_agent(pool: &PgPool, job_id: Uuid, agent_id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query(
        "UPDATE jobs SET assigned_agent_id = $2, updated_at = NOW() WHERE id = $1 AND assigned_agent_id IS NULL AND status = 'open'",
    )
    .bind(job_id)
    .bind(agent_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() == 1)
}
