use sqlx::{PgConnection, PgPool};

use crate::errors::AppError;
use crate::models::email::EmailJob;

pub async fn list_emails(pool: &PgPool) -> Result<Vec<EmailJob>, AppError> {
    let rows = sqlx::query_as::<_, EmailJob>(
        r#"
        SELECT id, subject, from_email, to_email, body, received_date, processed, job_id
        FROM email_jobs
        ORDER BY received_date DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Whether a message from the same sender with the same subject is stored.
pub async fn is_ingested(pool: &PgPool, email: &EmailJob) -> Result<bool, AppError> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM email_jobs WHERE from_email = $1 AND subject = $2)",
    )
    .bind(&email.from_email)
    .bind(&email.subject)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

/// Stores `email` unless the same sender and subject is already stored.
/// Returns whether this call stored it; a concurrent insert of the same pair
/// blocks here until the other transaction ends.
pub async fn claim_email(conn: &mut PgConnection, email: &EmailJob) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO email_jobs (id, subject, from_email, to_email, body, received_date, processed, job_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (from_email, subject) DO NOTHING
        "#,
    )
    .bind(email.id)
    .bind(&email.subject)
    .bind(&email.from_email)
    .bind(&email.to_email)
    .bind(&email.body)
    .bind(email.received_date)
    .bind(email.processed)
    .bind(email.job_id)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected() == 1)
}

#[cfg(test)]
mod tests {
    const SCHEMA: &str = include_str!("../../migrations/0001_init.sql");

    #[test]
    fn test_claim_relies_on_unique_sender_subject() {
        assert!(SCHEMA.contains(
            "CREATE UNIQUE INDEX email_jobs_sender_subject_idx ON email_jobs (from_email, subject);"
        ));
        assert!(SCHEMA.contains("REFERENCES jobs (id) ON DELETE SET NULL DEFERRABLE INITIALLY DEFERRED"));
    }
}
