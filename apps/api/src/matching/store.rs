use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::matching::{CandidateMatch, CandidateMatchRow};

/// Replaces every stored match for `job_id` with `matches`.
pub async fn replace_job_matches(
    conn: &mut PgConnection,
    job_id: Uuid,
    matches: &[CandidateMatch],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM candidate_matches WHERE job_id = $1")
        .bind(job_id)
        .execute(&mut *conn)
        .await?;

    for m in matches {
        sqlx::query(
            r#"
            INSERT INTO candidate_matches
                (id, candidate_id, job_id, score, reasoning, matched_skills, gaps, priority, assigned_agent_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(m.candidate_id)
        .bind(m.job_id)
        .bind(m.score as i32)
        .bind(&m.reasoning)
        .bind(&m.matched_skills)
        .bind(&m.gaps)
        .bind(m.priority.as_str())
        .bind(m.assigned_agent)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

/// All matches, best first. `limit` of `None` returns everything.
pub async fn list_matches(pool: &PgPool, limit: Option<i64>) -> Result<Vec<CandidateMatchRow>, AppError> {
    let rows = sqlx::query_as::<_, CandidateMatchRow>(
        "SELECT * FROM candidate_matches ORDER BY score DESC, created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn count_matches(pool: &PgPool) -> Result<i64, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM candidate_matches")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
