use std::collections::HashSet;

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::warn;

use crate::agents::store as agent_store;
use crate::candidates::store as candidate_store;
use crate::email_ingest::pipeline::{process_emails, Notification};
use crate::email_ingest::store;
use crate::errors::AppError;
use crate::jobs::store as job_store;
use crate::matching::store as match_store;
use crate::models::email::EmailJob;
use crate::models::job::Job;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProcessEmailsResponse {
    pub fetched: usize,
    pub already_ingested: usize,
    pub jobs: Vec<Job>,
    pub matches_found: usize,
    pub notifications: Vec<Notification>,
}

/// GET /api/v1/emails
pub async fn handle_list_emails(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmailJob>>, AppError> {
    Ok(Json(store::list_emails(&state.db).await?))
}

/// POST /api/v1/emails/process
/// Fetches the mailbox, processes new emails and persists the cycle in one
/// transaction.
pub async fn handle_process_emails(
    State(state): State<AppState>,
) -> Result<Json<ProcessEmailsResponse>, AppError> {
    let fetched = state.mailbox.fetch_new_emails().await?;
    let fetched_count = fetched.len();

    let mut fresh = Vec::with_capacity(fetched.len());
    for email in fetched {
        if !store::is_ingested(&state.db, &email).await? {
            fresh.push(email);
        }
    }
    let already_ingested = fetched_count - fresh.len();

    let agents = agent_store::list_agents(&state.db).await?;
    let jobs = job_store::list_jobs(&state.db).await?;
    let candidates = candidate_store::list_candidates(&state.db).await?;

    let mut outcome = process_emails(
        fresh,
        &agents,
        jobs,
        &candidates,
        state.extractor.as_ref(),
        state.matcher.as_ref(),
    )
    .await;

    // Emails are claimed first; email_jobs.job_id is checked at commit, so the
    // jobs can follow. A lost claim means another cycle stored that email.
    let mut tx = state.db.begin().await?;
    let mut claimed = HashSet::with_capacity(outcome.emails.len());
    for email in &outcome.emails {
        if store::claim_email(&mut tx, email).await? {
            claimed.insert(email.id);
        } else {
            warn!(
                "Skipping '{}' from {}: already ingested by another cycle",
                email.subject, email.from_email
            );
        }
    }
    let raced = outcome.emails.len() - claimed.len();
    outcome.retain_claimed(&claimed);

    for job in &outcome.jobs {
        job_store::insert_job(&mut tx, job).await?;
        let job_matches: Vec<_> = outcome
            .matches
            .iter()
            .filter(|m| m.job_id == job.id)
            .cloned()
            .collect();
        match_store::replace_job_matches(&mut tx, job.id, &job_matches).await?;
    }
    tx.commit().await?;

    Ok(Json(ProcessEmailsResponse {
        fetched: fetched_count,
        already_ingested: already_ingested + raced,
        matches_found: outcome.matches.len(),
        jobs: outcome.jobs,
        notifications: outcome.notifications,
    }))
}
