//! Rebalancing suggestions: move non-urgent open jobs from overloaded agents
//! to available ones.

use serde::Serialize;
use uuid::Uuid;

use crate::models::agent::{has_tag, Agent};
use crate::models::candidate::Candidate;
use crate::models::job::{Job, Urgency};
use crate::workload::calculator::WorkloadStatus;
use crate::workload::team::team_workload_distribution;

/// At most this many jobs are proposed for each overloaded agent.
pub const MAX_MOVES_PER_AGENT: usize = 2;

pub const GENERAL_SPECIALIZATION: &str = "General";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    RedistributeJob,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RebalanceSuggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub from: String,
    pub to: String,
    pub item: String,
    pub reason: String,
    pub job_id: Uuid,
    pub from_agent_id: Uuid,
    pub to_agent_id: Uuid,
}

/// Deterministic in list order: overloaded agents are visited in roster order,
/// their jobs in job-list order, and each job goes to the first available agent
/// that covers its specialization (or is tagged "General").
pub fn suggest_rebalancing(
    agents: &[Agent],
    all_jobs: &[Job],
    all_candidates: &[Candidate],
) -> Vec<RebalanceSuggestion> {
    let team = team_workload_distribution(agents, all_jobs, all_candidates);

    let available: Vec<&Agent> = team
        .distribution
        .iter()
        .filter(|d| d.workload.status == WorkloadStatus::Available)
        .map(|d| d.agent)
        .collect();

    let mut suggestions = Vec::new();

    for overloaded in team
        .distribution
        .iter()
        .filter(|d| d.workload.status == WorkloadStatus::Overloaded)
    {
        let movable = all_jobs
            .iter()
            .filter(|j| {
                j.assigned_agent == Some(overloaded.agent.id)
                    && j.is_open()
                    && j.urgency != Urgency::High
            })
            .take(MAX_MOVES_PER_AGENT);

        for job in movable {
            let target = available.iter().find(|a| {
                has_tag(&a.specializations, &job.specialization)
                    || has_tag(&a.specializations, GENERAL_SPECIALIZATION)
            });

            if let Some(target) = target {
                suggestions.push(RebalanceSuggestion {
                    kind: SuggestionKind::RedistributeJob,
                    from: overloaded.agent.name.clone(),
                    to: target.name.clone(),
                    item: job.title.clone(),
                    reason: format!(
                        "Rebalance workload - {} is overloaded ({}%)",
                        overloaded.agent.name, overloaded.workload.total_score
                    ),
                    job_id: job.id,
                    from_agent_id: overloaded.agent.id,
                    to_agent_id: target.id,
                });
            }
        }
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{agent, job};

    /// Three medium Cardiology jobs plus five urgent ones. Reaching 90 needs
    /// every sub-score saturated, including urgent tasks.
    fn overloaded_roster() -> (Agent, Vec<Job>) {
        let a = agent("Emma Thompson", &["Cardiology"], 1, 1, 48.0);
        let mut jobs: Vec<Job> = (1..=3)
            .map(|i| job(&format!("Cardiology Post {i}"), "Cardiology", Urgency::Medium, Some(a.id)))
            .collect();
        jobs.extend((0..5).map(|i| job(&format!("Urgent {i}"), "Cardiology", Urgency::High, Some(a.id))));
        (a, jobs)
    }

    #[test]
    fn test_overloaded_agent_moves_at_most_two_jobs_to_general_agent() {
        let (overloaded, jobs) = overloaded_roster();
        let general = agent("James Wilson", &["General"], 10, 50, 0.0);
        let candidates = vec![crate::test_support::candidate(Some(overloaded.id))];
        let agents = vec![overloaded.clone(), general.clone()];

        let suggestions = suggest_rebalancing(&agents, &jobs, &candidates);
        assert_eq!(suggestions.len(), 2);
        for s in &suggestions {
            assert_eq!(s.kind, SuggestionKind::RedistributeJob);
            assert_eq!(s.from, "Emma Thompson");
            assert_eq!(s.to, "James Wilson");
            assert_eq!(s.to_agent_id, general.id);
            assert_eq!(s.reason, "Rebalance workload - Emma Thompson is overloaded (90%)");
        }
        assert_eq!(suggestions[0].item, "Cardiology Post 1");
        assert_eq!(suggestions[1].item, "Cardiology Post 2");
    }

    #[test]
    fn test_high_urgency_jobs_are_never_moved() {
        let (overloaded, mut jobs) = overloaded_roster();
        jobs.retain(|j| j.urgency == Urgency::High);
        let general = agent("James Wilson", &["General"], 10, 50, 0.0);
        let candidates = vec![crate::test_support::candidate(Some(overloaded.id))];

        let suggestions = suggest_rebalancing(&[overloaded, general], &jobs, &candidates);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_no_suitable_available_agent_yields_nothing() {
        let (overloaded, jobs) = overloaded_roster();
        let neuro = agent("Priya Shah", &["Neurology"], 10, 50, 0.0);
        let candidates = vec![crate::test_support::candidate(Some(overloaded.id))];

        let suggestions = suggest_rebalancing(&[overloaded, neuro], &jobs, &candidates);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_first_matching_available_agent_wins() {
        let (overloaded, jobs) = overloaded_roster();
        let first = agent("First Cardio", &["Cardiology"], 10, 50, 0.0);
        let second = agent("Second General", &["General"], 10, 50, 0.0);
        let candidates = vec![crate::test_support::candidate(Some(overloaded.id))];

        let suggestions = suggest_rebalancing(&[overloaded, first, second], &jobs, &candidates);
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions.iter().all(|s| s.to == "First Cardio"));
    }

    #[test]
    fn test_balanced_team_has_no_suggestions() {
        let a = agent("Sarah Mitchell", &["Cardiology"], 10, 50, 0.0);
        let b = agent("James Wilson", &["General"], 10, 50, 0.0);
        let jobs = vec![job("Post", "Cardiology", Urgency::Low, Some(a.id))];
        assert!(suggest_rebalancing(&[a, b], &jobs, &[]).is_empty());
    }
}
