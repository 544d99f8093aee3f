//! Email processing cycle: extract → build job → assign → match → notify.
//!
//! Emails are handled strictly in order. Assignment is incremental: each new
//! job joins the working snapshot before the next email is assigned.

use std::collections::HashSet;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::assignment::batch::BatchAssigner;
use crate::email_ingest::parser::{parse_job_email, JobExtractor};
use crate::matching::{find_matching_candidates, CandidateMatcher};
use crate::models::agent::Agent;
use crate::models::candidate::Candidate;
use crate::models::email::EmailJob;
use crate::models::job::{Job, Urgency};
use crate::models::matching::{CandidateMatch, MatchPriority};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub agent_id: Uuid,
    pub job_id: Uuid,
    pub message: String,
    pub priority: Urgency,
}

#[derive(Debug, Default, Serialize)]
pub struct ProcessingOutcome {
    pub emails: Vec<EmailJob>,
    pub jobs: Vec<Job>,
    pub matches: Vec<CandidateMatch>,
    pub notifications: Vec<Notification>,
}

impl ProcessingOutcome {
    /// Keeps only the emails whose ids are in `claimed`, dropping the jobs,
    /// matches and notifications produced from the others.
    pub fn retain_claimed(&mut self, claimed: &HashSet<Uuid>) {
        self.emails.retain(|e| claimed.contains(&e.id));
        let kept_jobs: HashSet<Uuid> = self.emails.iter().filter_map(|e| e.job_id).collect();
        self.jobs.retain(|j| kept_jobs.contains(&j.id));
        self.matches.retain(|m| kept_jobs.contains(&m.job_id));
        self.notifications.retain(|n| kept_jobs.contains(&n.job_id));
    }
}

pub fn notification_message(job: &Job, matches: &[CandidateMatch]) -> String {
    let high = matches
        .iter()
        .filter(|m| m.priority == MatchPriority::High)
        .count();
    format!(
        "New {} priority job: {} with {} candidate matches ({} high priority)",
        job.urgency,
        job.title,
        matches.len(),
        high
    )
}

/// Runs one processing cycle over `emails`. `existing_jobs` seeds the
/// workload snapshot. Returned emails are marked processed and linked to
/// their job.
pub async fn process_emails(
    emails: Vec<EmailJob>,
    agents: &[Agent],
    existing_jobs: Vec<Job>,
    candidates: &[Candidate],
    extractor: &dyn JobExtractor,
    matcher: &dyn CandidateMatcher,
) -> ProcessingOutcome {
    let mut assigner = BatchAssigner::new(agents, existing_jobs, candidates);
    let mut outcome = ProcessingOutcome::default();

    for mut email in emails {
        let mut job = parse_job_email(extractor, &email).await;

        let assigned = assigner.assign(&mut job);
        match assigned {
            Some(agent) => info!("Job '{}' assigned to {}", job.title, agent.name),
            None => info!("Job '{}' left unassigned: no eligible agent", job.title),
        }

        let matches = find_matching_candidates(&job, candidates, matcher).await;

        if let Some(agent) = assigned {
            if !matches.is_empty() {
                outcome.notifications.push(Notification {
                    agent_id: agent.id,
                    job_id: job.id,
                    message: notification_message(&job, &matches),
                    priority: job.urgency,
                });
            }
        }

        email.processed = true;
        email.job_id = Some(job.id);

        outcome.matches.extend(matches);
        outcome.jobs.push(job);
        outcome.emails.push(email);
    }

    info!(
        "Processed {} emails: {} jobs, {} matches, {} notifications",
        outcome.emails.len(),
        outcome.jobs.len(),
        outcome.matches.len(),
        outcome.notifications.len()
    );
    outcome
}
