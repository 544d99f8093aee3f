//! Headline numbers for the recruiter dashboard.

pub mod handlers;

use serde::Serialize;

use crate::models::agent::Agent;
use crate::models::candidate::Candidate;
use crate::models::job::Job;
use crate::models::matching::CandidateMatchRow;
use crate::workload::team::{team_workload_distribution, TeamStats};

pub const TOP_MATCHES: i64 = 5;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub active_candidates: usize,
    pub open_jobs: usize,
    /// Candidates with at least one compliance flag unset.
    pub compliance_issues: usize,
    pub total_matches: i64,
    pub urgent_jobs: usize,
    pub top_matches: Vec<CandidateMatchRow>,
    pub team_stats: TeamStats,
}

/// `agents` should be the active roster, same as the team workload view.
pub fn summarize(
    agents: &[Agent],
    jobs: &[Job],
    candidates: &[Candidate],
    total_matches: i64,
    top_matches: Vec<CandidateMatchRow>,
) -> DashboardStats {
    DashboardStats {
        active_candidates: candidates.iter().filter(|c| c.is_active()).count(),
        open_jobs: jobs.iter().filter(|j| j.is_open()).count(),
        compliance_issues: candidates
            .iter()
            .filter(|c| !c.compliance.is_complete())
            .count(),
        total_matches,
        urgent_jobs: jobs.iter().filter(|j| j.is_urgent_open()).count(),
        top_matches,
        team_stats: team_workload_distribution(agents, jobs, candidates).team_stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::CandidateStatus;
    use crate::models::job::{JobStatus, Urgency};
    use crate::test_support::{agent, candidate, job};

    #[test]
    fn test_counts() {
        let emma = agent("Emma Thompson", &["Cardiology"], 10, 50, 2.0);

        let mut filled = job("Filled urgent post", "Cardiology", Urgency::High, None);
        filled.status = JobStatus::Filled;
        let jobs = vec![
            job("Consultant Cardiologist", "Cardiology", Urgency::High, Some(emma.id)),
            job("Cardiology SHO", "Cardiology", Urgency::Low, None),
            filled,
        ];

        let mut placed = candidate(None);
        placed.status = CandidateStatus::Placed;
        let mut no_dbs = candidate(Some(emma.id));
        no_dbs.compliance.dbs = false;
        let candidates = vec![candidate(None), no_dbs, placed];

        let stats = summarize(&[emma], &jobs, &candidates, 12, Vec::new());
        assert_eq!(stats.active_candidates, 2);
        assert_eq!(stats.open_jobs, 2);
        assert_eq!(stats.urgent_jobs, 1);
        assert_eq!(stats.compliance_issues, 1);
        assert_eq!(stats.total_matches, 12);
        assert_eq!(stats.team_stats.total_active_jobs, 1);
        assert_eq!(stats.team_stats.total_active_candidates, 1);
    }

    #[test]
    fn test_empty_dashboard() {
        let stats = summarize(&[], &[], &[], 0, Vec::new());
        assert_eq!(stats.open_jobs, 0);
        assert_eq!(stats.team_stats.average_workload, 0);
    }
}
