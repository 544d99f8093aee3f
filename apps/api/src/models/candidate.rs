use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    #[default]
    Active,
    Inactive,
    Placed,
}

impl CandidateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::Active => "active",
            CandidateStatus::Inactive => "inactive",
            CandidateStatus::Placed => "placed",
        }
    }
}

impl FromStr for CandidateStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(CandidateStatus::Active),
            "inactive" => Ok(CandidateStatus::Inactive),
            "placed" => Ok(CandidateStatus::Placed),
            other => Err(anyhow!("unknown candidate status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Compliance {
    pub dbs: bool,
    pub right_to_work: bool,
    /// GMC registration.
    pub registration: bool,
}

impl Compliance {
    pub fn is_complete(&self) -> bool {
        self.dbs && self.right_to_work && self.registration
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
    pub experience_years: u32,
    pub location: String,
    pub cv_summary: Option<String>,
    pub status: CandidateStatus,
    pub compliance: Compliance,
    pub grade: Option<String>,
    pub assigned_agent: Option<Uuid>,
    pub last_active: DateTime<Utc>,
}

impl Candidate {
    pub fn is_active(&self) -> bool {
        self.status == CandidateStatus::Active
    }

    /// Text handed to the matcher when no CV summary exists yet.
    pub fn profile_text(&self) -> String {
        match &self.cv_summary {
            Some(summary) if !summary.trim().is_empty() => summary.clone(),
            _ => format!(
                "{} - {} with {} years experience",
                self.name, self.specialization, self.experience_years
            ),
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub specialization: String,
    pub experience_years: i32,
    pub location: Option<String>,
    pub cv_summary: Option<String>,
    pub status: String,
    pub compliance: Json<Compliance>,
    pub grade: Option<String>,
    pub assigned_agent_id: Option<Uuid>,
    pub last_active: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CandidateRow> for Candidate {
    type Error = anyhow::Error;

    fn try_from(row: CandidateRow) -> Result<Self, Self::Error> {
        Ok(Candidate {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone.unwrap_or_default(),
            specialization: row.specialization,
            experience_years: row.experience_years.max(0) as u32,
            location: row.location.unwrap_or_default(),
            cv_summary: row.cv_summary,
            status: row.status.parse()?,
            compliance: row.compliance.0,
            grade: row.grade,
            assigned_agent: row.assigned_agent_id,
            last_active: row.last_active,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCandidate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub specialization: String,
    #[serde(default)]
    pub experience_years: u32,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: CandidateStatus,
    #[serde(default)]
    pub compliance: Compliance,
    pub grade: Option<String>,
    pub assigned_agent: Option<Uuid>,
}

impl NewCandidate {
    pub fn into_candidate(self) -> Candidate {
        Candidate {
            id: Uuid::new_v4(),
            name: self.name,
            email: self.email,
            phone: self.phone,
            specialization: self.specialization,
            experience_years: self.experience_years,
            location: self.location,
            cv_summary: None,
            status: self.status,
            compliance: self.compliance,
            grade: self.grade,
            assigned_agent: self.assigned_agent,
            last_active: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub experience_years: Option<u32>,
    pub location: Option<String>,
    pub cv_summary: Option<String>,
    pub status: Option<CandidateStatus>,
    pub compliance: Option<Compliance>,
    pub grade: Option<String>,
    pub assigned_agent: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(cv_summary: Option<&str>) -> Candidate {
        Candidate {
            id: Uuid::new_v4(),
            name: "Dr. Sarah Johnson".to_string(),
            email: "sarah.johnson@email.com".to_string(),
            phone: String::new(),
            specialization: "Cardiology".to_string(),
            experience_years: 8,
            location: "London, UK".to_string(),
            cv_summary: cv_summary.map(str::to_string),
            status: CandidateStatus::Active,
            compliance: Compliance::default(),
            grade: None,
            assigned_agent: None,
            last_active: Utc::now(),
        }
    }

    #[test]
    fn test_profile_text_prefers_cv_summary() {
        let c = candidate(Some("• Interventional cardiologist"));
        assert_eq!(c.profile_text(), "• Interventional cardiologist");
    }

    #[test]
    fn test_profile_text_falls_back_to_experience_line() {
        let c = candidate(Some("   "));
        assert_eq!(
            c.profile_text(),
            "Dr. Sarah Johnson - Cardiology with 8 years experience"
        );
    }

    #[test]
    fn test_compliance_complete_requires_all_flags() {
        let partial = Compliance {
            dbs: true,
            right_to_work: true,
            registration: false,
        };
        assert!(!partial.is_complete());
        assert!(Compliance {
            registration: true,
            ..partial
        }
        .is_complete());
    }
}
