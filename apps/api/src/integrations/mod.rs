//! Integration status and the Eclipse partner import.

pub mod handlers;

use std::collections::HashSet;

use serde::Serialize;

use crate::models::job::Job;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntegrationStatus {
    pub openai: bool,
    pub sendgrid: bool,
    pub eclipse: bool,
}

fn job_key(job: &Job) -> (String, String) {
    (
        job.title.trim().to_lowercase(),
        job.client.trim().to_lowercase(),
    )
}

/// Drops incoming jobs whose title and client (case-insensitive) are already
/// stored, or repeated earlier in the same batch.
pub fn unseen_jobs(existing: &[Job], incoming: Vec<Job>) -> Vec<Job> {
    let mut seen: HashSet<(String, String)> = existing.iter().map(job_key).collect();
    incoming
        .into_iter()
        .filter(|job| seen.insert(job_key(job)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::Urgency;
    use crate::test_support::job;

    #[test]
    fn test_unseen_jobs_skips_known_title_and_client() {
        let existing = vec![job("Consultant Cardiologist", "Cardiology", Urgency::High, None)];
        let mut same_title_other_client = job("Consultant Cardiologist", "Cardiology", Urgency::High, None);
        same_title_other_client.client = "Leeds General Infirmary".into();
        let incoming = vec![
            job("consultant cardiologist ", "Cardiology", Urgency::Low, None),
            same_title_other_client.clone(),
            job("GP Locum", "General Practice", Urgency::Medium, None),
            job("GP Locum", "General Practice", Urgency::Medium, None),
        ];

        let kept = unseen_jobs(&existing, incoming);
        let titles: Vec<(&str, &str)> = kept.iter().map(|j| (j.title.as_str(), j.client.as_str())).collect();
        assert_eq!(
            titles,
            vec![
                ("Consultant Cardiologist", "Leeds General Infirmary"),
                ("GP Locum", "Royal London Hospital"),
            ]
        );
    }
}
