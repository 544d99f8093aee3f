//! Fixture builders shared by unit tests.

use chrono::Utc;
use uuid::Uuid;

use crate::models::agent::{Agent, AgentCapacity, AgentMetrics, AgentPreferences};
use crate::models::candidate::{Candidate, CandidateStatus, Compliance};
use crate::models::job::{Job, JobSource, JobStatus, JobType, Urgency};

pub fn agent(
    name: &str,
    specializations: &[&str],
    max_active_jobs: u32,
    max_candidates: u32,
    avg_response_time: f64,
) -> Agent {
    Agent {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: format!("{}@agency.com", name.to_lowercase().replace(' ', ".")),
        specializations: specializations.iter().map(|s| s.to_string()).collect(),
        grades: vec![],
        locations: vec![],
        is_active: true,
        capacity: AgentCapacity {
            max_active_jobs,
            max_candidates,
            hours_per_week: 40,
        },
        metrics: AgentMetrics {
            avg_response_time,
            ..AgentMetrics::default()
        },
        preferences: AgentPreferences::default(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn job(title: &str, specialization: &str, urgency: Urgency, assigned: Option<Uuid>) -> Job {
    Job {
        id: Uuid::new_v4(),
        title: title.to_string(),
        client: "Royal London Hospital".to_string(),
        location: "London, UK".to_string(),
        job_type: JobType::Locum,
        specialization: specialization.to_string(),
        salary: "£80-120 per hour".to_string(),
        description: format!("{title} required"),
        requirements: vec![],
        status: JobStatus::Open,
        urgency,
        grade: None,
        source: JobSource::Manual,
        assigned_agent: assigned,
        posted_date: Utc::now(),
    }
}

pub fn candidate(assigned: Option<Uuid>) -> Candidate {
    Candidate {
        id: Uuid::new_v4(),
        name: "Dr. Sarah Johnson".to_string(),
        email: "sarah.johnson@email.com".to_string(),
        phone: "+44 7700 900123".to_string(),
        specialization: "Cardiology".to_string(),
        experience_years: 8,
        location: "London, UK".to_string(),
        cv_summary: None,
        status: CandidateStatus::Active,
        compliance: Compliance {
            dbs: true,
            right_to_work: true,
            registration: true,
        },
        grade: None,
        assigned_agent: assigned,
        last_active: Utc::now(),
    }
}
