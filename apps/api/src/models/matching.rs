use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPriority {
    High,
    Medium,
    Low,
}

impl MatchPriority {
    /// high ≥ 80, medium ≥ 60, low otherwise.
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            MatchPriority::High
        } else if score >= 60 {
            MatchPriority::Medium
        } else {
            MatchPriority::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPriority::High => "high",
            MatchPriority::Medium => "medium",
            MatchPriority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMatch {
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    pub score: u32,
    pub reasoning: String,
    pub matched_skills: Vec<String>,
    pub gaps: Vec<String>,
    pub priority: MatchPriority,
    pub assigned_agent: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateMatchRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    pub score: i32,
    pub reasoning: Option<String>,
    pub matched_skills: Vec<String>,
    pub gaps: Vec<String>,
    pub priority: String,
    pub assigned_agent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_thresholds() {
        assert_eq!(MatchPriority::from_score(100), MatchPriority::High);
        assert_eq!(MatchPriority::from_score(80), MatchPriority::High);
        assert_eq!(MatchPriority::from_score(79), MatchPriority::Medium);
        assert_eq!(MatchPriority::from_score(60), MatchPriority::Medium);
        assert_eq!(MatchPriority::from_score(59), MatchPriority::Low);
        assert_eq!(MatchPriority::from_score(0), MatchPriority::Low);
    }
}
