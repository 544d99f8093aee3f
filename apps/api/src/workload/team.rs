use serde::Serialize;

use crate::models::agent::Agent;
use crate::models::candidate::Candidate;
use crate::models::job::Job;
use crate::workload::calculator::{assigned_to, calculate_workload, WorkloadResult, WorkloadStatus};

/// One agent's row in the team view.
#[derive(Debug, Clone, Serialize)]
pub struct AgentWorkload<'a> {
    pub agent: &'a Agent,
    pub workload: WorkloadResult,
    pub active_jobs: usize,
    pub active_candidates: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamStats {
    pub average_workload: u32,
    pub overloaded_agents: usize,
    pub available_agents: usize,
    pub total_active_jobs: usize,
    pub total_active_candidates: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamWorkload<'a> {
    pub distribution: Vec<AgentWorkload<'a>>,
    pub team_stats: TeamStats,
}

/// Computes per-agent workload and team aggregates. `agents` is used as given;
/// callers wanting the active roster filter it first.
pub fn team_workload_distribution<'a>(
    agents: &'a [Agent],
    all_jobs: &[Job],
    all_candidates: &[Candidate],
) -> TeamWorkload<'a> {
    let distribution: Vec<AgentWorkload<'a>> = agents
        .iter()
        .map(|agent| {
            let (jobs, candidates) = assigned_to(agent, all_jobs, all_candidates);
            AgentWorkload {
                agent,
                workload: calculate_workload(agent, &jobs, &candidates),
                active_jobs: jobs.iter().filter(|j| j.is_open()).count(),
                active_candidates: candidates.iter().filter(|c| c.is_active()).count(),
            }
        })
        .collect();

    let team_stats = summarize(&distribution);
    TeamWorkload {
        distribution,
        team_stats,
    }
}

fn summarize(distribution: &[AgentWorkload<'_>]) -> TeamStats {
    let count_status = |status: WorkloadStatus| {
        distribution
            .iter()
            .filter(|d| d.workload.status == status)
            .count()
    };

    // An empty team averages to 0 rather than NaN.
    let average_workload = if distribution.is_empty() {
        0
    } else {
        let sum: u32 = distribution.iter().map(|d| d.workload.total_score).sum();
        (sum as f64 / distribution.len() as f64).round() as u32
    };

    TeamStats {
        average_workload,
        overloaded_agents: count_status(WorkloadStatus::Overloaded),
        available_agents: count_status(WorkloadStatus::Available),
        total_active_jobs: distribution.iter().map(|d| d.active_jobs).sum(),
        total_active_candidates: distribution.iter().map(|d| d.active_candidates).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::{JobStatus, Urgency};
    use crate::test_support::{agent, candidate, job};

    #[test]
    fn test_empty_team_has_zero_average() {
        let team = team_workload_distribution(&[], &[], &[]);
        assert!(team.distribution.is_empty());
        assert_eq!(
            team.team_stats,
            TeamStats {
                average_workload: 0,
                overloaded_agents: 0,
                available_agents: 0,
                total_active_jobs: 0,
                total_active_candidates: 0,
            }
        );
    }

    #[test]
    fn test_team_stats_aggregate_counts_and_statuses() {
        let busy = agent("Emma Thompson", &["Emergency Medicine"], 2, 2, 48.0);
        let idle = agent("James Wilson", &["General"], 10, 50, 0.0);
        let agents = vec![busy.clone(), idle.clone()];

        let mut jobs: Vec<Job> = (0..5)
            .map(|i| job(&format!("ED Registrar {i}"), "Emergency Medicine", Urgency::High, Some(busy.id)))
            .collect();
        jobs.push(job("Filled post", "Emergency Medicine", Urgency::Low, Some(idle.id)));
        jobs.last_mut().unwrap().status = JobStatus::Filled;
        jobs.push(job("GP locum", "General Practice", Urgency::Low, Some(idle.id)));

        let candidates = vec![
            candidate(Some(busy.id)),
            candidate(Some(busy.id)),
            candidate(Some(idle.id)),
        ];

        let team = team_workload_distribution(&agents, &jobs, &candidates);
        assert_eq!(team.distribution.len(), 2);
        assert_eq!(team.distribution[0].agent.id, busy.id);
        assert_eq!(team.distribution[0].workload.total_score, 90);
        assert_eq!(team.distribution[0].active_jobs, 5);
        assert_eq!(team.distribution[1].active_jobs, 1);

        // idle: 10% jobs × 0.25 + 2% candidates × 0.20 = 2.9 → 3
        assert_eq!(team.distribution[1].workload.total_score, 3);
        assert_eq!(team.team_stats.average_workload, 47);
        assert_eq!(team.team_stats.overloaded_agents, 1);
        assert_eq!(team.team_stats.available_agents, 1);
        assert_eq!(team.team_stats.total_active_jobs, 6);
        assert_eq!(team.team_stats.total_active_candidates, 3);
    }
}
