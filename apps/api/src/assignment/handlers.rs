use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::agents::store as agent_store;
use crate::assignment::assigner::{rank_agents, SpecializationMatch};
use crate::candidates::store as candidate_store;
use crate::errors::AppError;
use crate::jobs::store as job_store;
use crate::models::job::Job;
use crate::state::AppState;
use crate::workload::calculator::WorkloadStatus;

#[derive(Debug, Serialize)]
pub struct RankedAgent {
    pub agent_id: Uuid,
    pub agent_name: String,
    pub score: f64,
    pub workload_score: u32,
    pub workload_status: WorkloadStatus,
    pub specialization_match: SpecializationMatch,
    pub location_match: bool,
    pub urgency_bonus: bool,
}

#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub job_id: Uuid,
    pub assigned_agent: Option<Uuid>,
    pub ranking: Vec<RankedAgent>,
}

/// Only open, unassigned jobs take an agent.
fn ensure_assignable(job: &Job) -> Result<(), AppError> {
    if !job.is_open() {
        return Err(AppError::Conflict(format!(
            "Job {} is {}, only open jobs can be assigned",
            job.id,
            job.status.as_str()
        )));
    }
    if job.assigned_agent.is_some() {
        return Err(AppError::Conflict(format!("Job {} is already assigned", job.id)));
    }
    Ok(())
}

/// POST /api/v1/jobs/:id/assign
/// Picks the best agent for an open, unassigned job and persists the choice.
/// No eligible agent is not an error: `assigned_agent` is null.
pub async fn handle_assign_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssignmentResponse>, AppError> {
    let job = job_store::get_job(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;

    ensure_assignable(&job)?;

    let agents = agent_store::list_agents(&state.db).await?;
    let jobs = job_store::list_jobs(&state.db).await?;
    let candidates = candidate_store::list_candidates(&state.db).await?;

    let ranking: Vec<RankedAgent> = rank_agents(&job, &agents, &jobs, &candidates)
        .into_iter()
        .map(|s| RankedAgent {
            agent_id: s.agent.id,
            agent_name: s.agent.name.clone(),
            score: s.score,
            workload_score: s.workload.total_score,
            workload_status: s.workload.status,
            specialization_match: s.specialization_match,
            location_match: s.location_match,
            urgency_bonus: s.urgency_bonus,
        })
        .collect();

    let assigned_agent = ranking.first().map(|r| r.agent_id);
    if let Some(agent_id) = assigned_agent {
        if !job_store::assign_agent(&state.db, id, agent_id).await? {
            return Err(AppError::Conflict(format!(
                "Job {id} was assigned or closed while ranking agents"
            )));
        }
        tracing::info!("Assigned job '{}' to agent {agent_id}", job.title);
    } else {
        tracing::warn!("No eligible agent for job '{}' ({})", job.title, job.specialization);
    }

    Ok(Json(AssignmentResponse {
        job_id: id,
        assigned_agent,
        ranking,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::{JobStatus, Urgency};
    use crate::test_support::job;

    #[test]
    fn test_open_unassigned_job_is_assignable() {
        let j = job("Consultant Cardiologist", "Cardiology", Urgency::High, None);
        assert!(ensure_assignable(&j).is_ok());
    }

    #[test]
    fn test_filled_and_closed_jobs_are_rejected() {
        for status in [JobStatus::Filled, JobStatus::Closed] {
            let mut j = job("Consultant Cardiologist", "Cardiology", Urgency::High, None);
            j.status = status;
            match ensure_assignable(&j) {
                Err(AppError::Conflict(msg)) => assert!(msg.contains(status.as_str())),
                other => panic!("expected conflict for {status:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_assigned_job_is_rejected() {
        let j = job("Consultant Cardiologist", "Cardiology", Urgency::High, Some(Uuid::new_v4()));
        assert!(matches!(ensure_assignable(&j), Err(AppError::Conflict(_))));
    }
}
