//! Agent assigner: picks one agent for a newly ingested job.
//!
//! Eligibility (hard filters, in order):
//! 1. active agents whose specializations include the job's (case-insensitive);
//!    when there are none, active agents tagged "General"
//! 2. if the job has a grade, agents holding it, unless that leaves nobody
//!
//! Score (max 100):
//! - availability   (100 − workload) × 0.40
//! - specialization exact 30 / general 15
//! - location       20 when an agent location appears in the job location, else 10
//! - urgency        +10 for high-urgency jobs and urgency_weighting ≥ 7
//!
//! Highest score wins; ties go to the agent listed first.

use serde::Serialize;

use crate::models::agent::{has_tag, Agent};
use crate::models::candidate::Candidate;
use crate::models::job::{Job, Urgency};
use crate::workload::calculator::{calculate_agent_workload, WorkloadResult};
use crate::workload::rebalance::GENERAL_SPECIALIZATION;

const AVAILABILITY_WEIGHT: f64 = 0.40;
const EXACT_SPECIALIZATION_POINTS: f64 = 30.0;
const GENERAL_SPECIALIZATION_POINTS: f64 = 15.0;
const LOCATION_MATCH_POINTS: f64 = 20.0;
const LOCATION_MISS_POINTS: f64 = 10.0;
const URGENCY_BONUS_POINTS: f64 = 10.0;
const URGENCY_WEIGHTING_THRESHOLD: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecializationMatch {
    Exact,
    General,
}

/// One eligible agent with the pieces of its composite score.
#[derive(Debug, Clone, Serialize)]
pub struct AgentScore<'a> {
    pub agent: &'a Agent,
    pub score: f64,
    pub workload: WorkloadResult,
    pub specialization_match: SpecializationMatch,
    pub location_match: bool,
    pub urgency_bonus: bool,
}

/// Returns the best agent for `job`, or `None` when nobody is eligible.
pub fn find_best_agent<'a>(
    job: &Job,
    agents: &'a [Agent],
    all_jobs: &[Job],
    all_candidates: &[Candidate],
) -> Option<&'a Agent> {
    rank_agents(job, agents, all_jobs, all_candidates)
        .into_iter()
        .next()
        .map(|s| s.agent)
}

/// Scores every eligible agent, best first. The sort is stable, so equal
/// scores keep roster order.
pub fn rank_agents<'a>(
    job: &Job,
    agents: &'a [Agent],
    all_jobs: &[Job],
    all_candidates: &[Candidate],
) -> Vec<AgentScore<'a>> {
    let (eligible, specialization_match) = eligible_agents(job, agents);

    let mut scored: Vec<AgentScore<'a>> = eligible
        .into_iter()
        .map(|agent| score_agent(job, agent, specialization_match, all_jobs, all_candidates))
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

fn eligible_agents<'a>(job: &Job, agents: &'a [Agent]) -> (Vec<&'a Agent>, SpecializationMatch) {
    let mut specialization_match = SpecializationMatch::Exact;
    let mut eligible: Vec<&Agent> = agents
        .iter()
        .filter(|a| a.is_active && has_tag(&a.specializations, &job.specialization))
        .collect();

    if eligible.is_empty() {
        specialization_match = SpecializationMatch::General;
        eligible = agents
            .iter()
            .filter(|a| a.is_active && has_tag(&a.specializations, GENERAL_SPECIALIZATION))
            .collect();
    }

    if let Some(grade) = job.grade.as_deref().filter(|g| !g.trim().is_empty()) {
        let graded: Vec<&Agent> = eligible
            .iter()
            .copied()
            .filter(|a| has_tag(&a.grades, grade))
            .collect();
        if !graded.is_empty() {
            eligible = graded;
        }
    }

    (eligible, specialization_match)
}

fn score_agent<'a>(
    job: &Job,
    agent: &'a Agent,
    specialization_match: SpecializationMatch,
    all_jobs: &[Job],
    all_candidates: &[Candidate],
) -> AgentScore<'a> {
    let workload = calculate_agent_workload(agent, all_jobs, all_candidates);
    let location_match = matches_location(agent, &job.location);
    let urgency_bonus = job.urgency == Urgency::High
        && agent.preferences.urgency_weighting >= URGENCY_WEIGHTING_THRESHOLD;

    let mut score = (100.0 - workload.total_score as f64) * AVAILABILITY_WEIGHT;
    score += match specialization_match {
        SpecializationMatch::Exact => EXACT_SPECIALIZATION_POINTS,
        SpecializationMatch::General => GENERAL_SPECIALIZATION_POINTS,
    };
    score += if location_match {
        LOCATION_MATCH_POINTS
    } else {
        LOCATION_MISS_POINTS
    };
    if urgency_bonus {
        score += URGENCY_BONUS_POINTS;
    }

    AgentScore {
        agent,
        score,
        workload,
        specialization_match,
        location_match,
        urgency_bonus,
    }
}

/// True when one of the agent's locations is a substring of the job location.
/// A "Remote" agent scores as a miss unless the job says remote.
fn matches_location(agent: &Agent, job_location: &str) -> bool {
    let job_location = job_location.to_lowercase();
    if job_location.trim().is_empty() {
        return false;
    }
    agent
        .locations
        .iter()
        .filter(|loc| !loc.trim().is_empty())
        .any(|loc| job_location.contains(&loc.to_lowercase()))
}
