//! Workload calculator: deterministic 0–100 workload score for a single agent.
//!
//! Pure function of the agent record and the jobs/candidates currently assigned
//! to it. Results are never cached; every caller recomputes from its snapshot.
//!
//! Sub-scores (each clamped to 0–100 before weighting):
//! 1. active jobs       = 100 × open jobs / max_active_jobs
//! 2. candidates        = 100 × active candidates / max_candidates
//! 3. urgent tasks      = 20 per open high-urgency job
//! 4. response time     = 100 × avg_response_time / 24h (slower reads as more load)
//!
//! The composite applies 25/20/30/15. The capacity weight exists in
//! `WorkloadWeights` but is not part of the composite, so a saturated agent
//! tops out at 90.

use serde::{Deserialize, Serialize};

use crate::models::agent::Agent;
use crate::models::candidate::Candidate;
use crate::models::job::Job;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadStatus {
    Available,
    Moderate,
    Busy,
    Overloaded,
}

impl WorkloadStatus {
    /// ≥90 overloaded, ≥70 busy, ≥40 moderate, else available.
    pub fn from_score(score: u32) -> Self {
        if score >= 90 {
            WorkloadStatus::Overloaded
        } else if score >= 70 {
            WorkloadStatus::Busy
        } else if score >= 40 {
            WorkloadStatus::Moderate
        } else {
            WorkloadStatus::Available
        }
    }

    pub fn recommendation(&self, agent_name: &str) -> String {
        match self {
            WorkloadStatus::Overloaded => format!(
                "{agent_name} is overloaded. Consider redistributing urgent tasks or reducing new assignments."
            ),
            WorkloadStatus::Busy => format!(
                "{agent_name} is at high capacity. Only assign urgent or high-priority tasks."
            ),
            WorkloadStatus::Moderate => {
                format!("{agent_name} has moderate workload. Can take on new assignments.")
            }
            WorkloadStatus::Available => {
                format!("{agent_name} has capacity for new assignments and urgent tasks.")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadBreakdown {
    pub active_jobs: u32,
    pub candidates_managed: u32,
    pub urgent_tasks: u32,
    pub response_time: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadResult {
    pub total_score: u32,
    pub breakdown: WorkloadBreakdown,
    pub status: WorkloadStatus,
    pub recommendation: String,
}

/// Composite weights in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkloadWeights {
    pub active_jobs: f64,
    pub candidates_managed: f64,
    pub urgent_tasks: f64,
    pub response_time: f64,
    /// Not applied to the composite.
    #[allow(dead_code)]
    pub capacity: f64,
}

impl Default for WorkloadWeights {
    fn default() -> Self {
        Self {
            active_jobs: 25.0,
            candidates_managed: 20.0,
            urgent_tasks: 30.0,
            response_time: 15.0,
            capacity: 10.0,
        }
    }
}

const POINTS_PER_URGENT_JOB: f64 = 20.0;
const RESPONSE_TIME_SATURATION_HOURS: f64 = 24.0;
const MAX_SUB_SCORE: f64 = 100.0;

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Scores one agent. `jobs` and `candidates` must already be restricted to the
/// items assigned to `agent`; see `calculate_agent_workload` for the filtering
/// variant.
pub fn calculate_workload(agent: &Agent, jobs: &[Job], candidates: &[Candidate]) -> WorkloadResult {
    let weights = WorkloadWeights::default();

    let open_jobs = jobs.iter().filter(|j| j.is_open()).count();
    let active_candidates = candidates.iter().filter(|c| c.is_active()).count();
    let urgent_jobs = jobs.iter().filter(|j| j.is_urgent_open()).count();

    let active_jobs_score = capacity_score(open_jobs, agent.capacity.max_active_jobs);
    let candidates_score = capacity_score(active_candidates, agent.capacity.max_candidates);
    let urgent_score = (urgent_jobs as f64 * POINTS_PER_URGENT_JOB).min(MAX_SUB_SCORE);
    let response_time_score = response_time_score(agent.metrics.avg_response_time);

    let total_score = (active_jobs_score * weights.active_jobs / 100.0
        + candidates_score * weights.candidates_managed / 100.0
        + urgent_score * weights.urgent_tasks / 100.0
        + response_time_score * weights.response_time / 100.0)
        .round() as u32;

    let status = WorkloadStatus::from_score(total_score);

    WorkloadResult {
        total_score,
        breakdown: WorkloadBreakdown {
            active_jobs: active_jobs_score.round() as u32,
            candidates_managed: candidates_score.round() as u32,
            urgent_tasks: urgent_score.round() as u32,
            response_time: response_time_score.round() as u32,
        },
        status,
        recommendation: status.recommendation(&agent.name),
    }
}

/// Scores one agent against the global job and candidate lists, keeping only
/// the items whose `assigned_agent` is this agent.
pub fn calculate_agent_workload(
    agent: &Agent,
    all_jobs: &[Job],
    all_candidates: &[Candidate],
) -> WorkloadResult {
    let (jobs, candidates) = assigned_to(agent, all_jobs, all_candidates);
    calculate_workload(agent, &jobs, &candidates)
}

/// Splits out the jobs and candidates owned by `agent`.
pub fn assigned_to(
    agent: &Agent,
    all_jobs: &[Job],
    all_candidates: &[Candidate],
) -> (Vec<Job>, Vec<Candidate>) {
    let jobs = all_jobs
        .iter()
        .filter(|j| j.assigned_agent == Some(agent.id))
        .cloned()
        .collect();
    let candidates = all_candidates
        .iter()
        .filter(|c| c.assigned_agent == Some(agent.id))
        .cloned()
        .collect();
    (jobs, candidates)
}

/// Zero capacity means the agent is always at capacity.
fn capacity_score(count: usize, capacity: u32) -> f64 {
    if capacity == 0 {
        return MAX_SUB_SCORE;
    }
    (count as f64 / capacity as f64 * 100.0).min(MAX_SUB_SCORE)
}

fn response_time_score(avg_response_hours: f64) -> f64 {
    // f64::max drops NaN, so bad metrics read as an instant response.
    (avg_response_hours.max(0.0) / RESPONSE_TIME_SATURATION_HOURS * 100.0).min(MAX_SUB_SCORE)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{agent, candidate, job};
    use crate::models::candidate::CandidateStatus;
    use crate::models::job::{JobStatus, Urgency};

    fn open_jobs(agent: &Agent, n: usize, urgency: Urgency) -> Vec<Job> {
        (0..n)
            .map(|i| job(&format!("Job {i}"), "Cardiology", urgency, Some(agent.id)))
            .collect()
    }

    fn active_candidates(agent: &Agent, n: usize) -> Vec<Candidate> {
        (0..n).map(|_| candidate(Some(agent.id))).collect()
    }

    #[test]
    fn test_scenario_half_loaded_agent_is_available() {
        let a = agent("Sarah Mitchell", &["Cardiology"], 10, 50, 0.0);
        let jobs = open_jobs(&a, 5, Urgency::Medium);
        let candidates = active_candidates(&a, 10);

        let result = calculate_workload(&a, &jobs, &candidates);
        assert_eq!(result.breakdown.active_jobs, 50);
        assert_eq!(result.breakdown.candidates_managed, 20);
        assert_eq!(result.breakdown.urgent_tasks, 0);
        assert_eq!(result.breakdown.response_time, 0);
        // round(12.5 + 4) rounds half up
        assert_eq!(result.total_score, 17);
        assert_eq!(result.status, WorkloadStatus::Available);
    }

    #[test]
    fn test_scenario_three_urgent_jobs() {
        let a = agent("Sarah Mitchell", &["Cardiology"], 10, 50, 0.0);
        let mut jobs = open_jobs(&a, 2, Urgency::Medium);
        jobs.extend(open_jobs(&a, 3, Urgency::High));
        let candidates = active_candidates(&a, 10);

        let result = calculate_workload(&a, &jobs, &candidates);
        assert_eq!(result.breakdown.urgent_tasks, 60);
        assert_eq!(result.total_score, 35);
        assert_eq!(result.status, WorkloadStatus::Available);
    }

    #[test]
    fn test_closed_and_filled_jobs_do_not_count() {
        let a = agent("James Wilson", &["Cardiology"], 10, 50, 0.0);
        let mut jobs = open_jobs(&a, 4, Urgency::High);
        jobs[0].status = JobStatus::Filled;
        jobs[1].status = JobStatus::Closed;

        let result = calculate_workload(&a, &jobs, &[]);
        assert_eq!(result.breakdown.active_jobs, 20);
        assert_eq!(result.breakdown.urgent_tasks, 40);
    }

    #[test]
    fn test_inactive_and_placed_candidates_do_not_count() {
        let a = agent("James Wilson", &["Cardiology"], 10, 10, 0.0);
        let mut candidates = active_candidates(&a, 4);
        candidates[0].status = CandidateStatus::Inactive;
        candidates[1].status = CandidateStatus::Placed;

        let result = calculate_workload(&a, &[], &candidates);
        assert_eq!(result.breakdown.candidates_managed, 20);
    }

    #[test]
    fn test_sub_scores_saturate_at_100() {
        let a = agent("Emma Thompson", &["Cardiology"], 2, 2, 48.0);
        let jobs = open_jobs(&a, 12, Urgency::High);
        let candidates = active_candidates(&a, 9);

        let result = calculate_workload(&a, &jobs, &candidates);
        assert_eq!(result.breakdown.active_jobs, 100);
        assert_eq!(result.breakdown.candidates_managed, 100);
        assert_eq!(result.breakdown.urgent_tasks, 100);
        assert_eq!(result.breakdown.response_time, 100);
        // Capacity weight is not applied, so the ceiling is 90.
        assert_eq!(result.total_score, 90);
        assert_eq!(result.status, WorkloadStatus::Overloaded);
    }

    #[test]
    fn test_slow_response_time_raises_score() {
        let fast = agent("Fast", &["Cardiology"], 10, 50, 0.0);
        let slow = agent("Slow", &["Cardiology"], 10, 50, 12.0);

        let fast_result = calculate_workload(&fast, &[], &[]);
        let slow_result = calculate_workload(&slow, &[], &[]);
        assert_eq!(slow_result.breakdown.response_time, 50);
        // 0.15 × 50 = 7.5 → 8
        assert_eq!(slow_result.total_score, 8);
        assert!(slow_result.total_score > fast_result.total_score);
    }

    #[test]
    fn test_zero_capacity_saturates_sub_score() {
        let a = agent("No Capacity", &["Cardiology"], 0, 0, 0.0);
        let result = calculate_workload(&a, &[], &[]);
        assert_eq!(result.breakdown.active_jobs, 100);
        assert_eq!(result.breakdown.candidates_managed, 100);
        assert_eq!(result.total_score, 45);
    }

    #[test]
    fn test_nan_and_negative_response_time_read_as_zero() {
        let nan = agent("NaN", &["Cardiology"], 10, 50, f64::NAN);
        let negative = agent("Negative", &["Cardiology"], 10, 50, -3.0);
        assert_eq!(calculate_workload(&nan, &[], &[]).breakdown.response_time, 0);
        assert_eq!(calculate_workload(&negative, &[], &[]).breakdown.response_time, 0);
    }

    #[test]
    fn test_score_monotonic_in_urgent_jobs() {
        let a = agent("Monotonic", &["Cardiology"], 10, 50, 6.0);
        let candidates = active_candidates(&a, 5);
        let mut previous = 0;
        for urgent in 0..10 {
            let jobs = open_jobs(&a, urgent, Urgency::High);
            let score = calculate_workload(&a, &jobs, &candidates).total_score;
            assert!(score >= previous, "score dropped at {urgent} urgent jobs");
            assert!(score <= 100);
            previous = score;
        }
    }

    #[test]
    fn test_status_buckets_are_exhaustive_and_contiguous() {
        for score in 0..=100u32 {
            let expected = match score {
                0..=39 => WorkloadStatus::Available,
                40..=69 => WorkloadStatus::Moderate,
                70..=89 => WorkloadStatus::Busy,
                _ => WorkloadStatus::Overloaded,
            };
            assert_eq!(WorkloadStatus::from_score(score), expected, "score {score}");
        }
    }

    #[test]
    fn test_recommendation_names_agent() {
        let rec = WorkloadStatus::Busy.recommendation("Sarah Mitchell");
        assert_eq!(
            rec,
            "Sarah Mitchell is at high capacity. Only assign urgent or high-priority tasks."
        );
    }

    #[test]
    fn test_agent_workload_filters_by_assignment() {
        let a = agent("Owner", &["Cardiology"], 10, 50, 0.0);
        let other = agent("Other", &["Cardiology"], 10, 50, 0.0);
        let mut jobs = open_jobs(&a, 5, Urgency::Medium);
        jobs.extend(open_jobs(&other, 5, Urgency::High));
        jobs.push(job("Unassigned", "Cardiology", Urgency::High, None));

        let result = calculate_agent_workload(&a, &jobs, &[]);
        assert_eq!(result.breakdown.active_jobs, 50);
        assert_eq!(result.breakdown.urgent_tasks, 0);
    }

    #[test]
    fn test_default_weights_sum_to_ninety_without_capacity() {
        let w = WorkloadWeights::default();
        let applied = w.active_jobs + w.candidates_managed + w.urgent_tasks + w.response_time;
        assert_eq!(applied, 90.0);
        assert_eq!(applied + w.capacity, 100.0);
    }
}
