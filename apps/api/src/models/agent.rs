use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Capacity limits used as denominators in workload scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentCapacity {
    pub max_active_jobs: u32,
    pub max_candidates: u32,
    pub hours_per_week: u32,
}

impl Default for AgentCapacity {
    fn default() -> Self {
        Self {
            max_active_jobs: 15,
            max_candidates: 50,
            hours_per_week: 40,
        }
    }
}

impl AgentCapacity {
    pub fn is_positive(&self) -> bool {
        self.max_active_jobs > 0 && self.max_candidates > 0 && self.hours_per_week > 0
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentMetrics {
    /// Average time to respond to a new assignment, in hours.
    pub avg_response_time: f64,
    pub emails_processed: u32,
    pub placements_made: u32,
    pub weekly_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentPreferences {
    /// 1–10. Agents at 7 or above are favoured for high-urgency jobs.
    pub urgency_weighting: u8,
    pub location_radius: u32,
    pub auto_assignment: bool,
}

impl Default for AgentPreferences {
    fn default() -> Self {
        Self {
            urgency_weighting: 5,
            location_radius: 50,
            auto_assignment: true,
        }
    }
}

/// A recruitment consultant. Owns jobs and candidates through their
/// `assigned_agent` back-reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub specializations: Vec<String>,
    pub grades: Vec<String>,
    pub locations: Vec<String>,
    pub is_active: bool,
    pub capacity: AgentCapacity,
    pub metrics: AgentMetrics,
    pub preferences: AgentPreferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct AgentRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub specializations: Vec<String>,
    pub grades: Vec<String>,
    pub locations: Vec<String>,
    pub is_active: bool,
    pub capacity: Json<AgentCapacity>,
    pub metrics: Json<AgentMetrics>,
    pub preferences: Json<AgentPreferences>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AgentRow> for Agent {
    fn from(row: AgentRow) -> Self {
        Agent {
            id: row.id,
            name: row.name,
            email: row.email,
            specializations: row.specializations,
            grades: row.grades,
            locations: row.locations,
            is_active: row.is_active,
            capacity: row.capacity.0,
            metrics: row.metrics.0,
            preferences: row.preferences.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAgent {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub grades: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub capacity: AgentCapacity,
    #[serde(default)]
    pub metrics: AgentMetrics,
    #[serde(default)]
    pub preferences: AgentPreferences,
}

/// Field-level patch. `None` keeps the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub specializations: Option<Vec<String>>,
    pub grades: Option<Vec<String>>,
    pub locations: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub capacity: Option<AgentCapacity>,
    pub metrics: Option<AgentMetrics>,
    pub preferences: Option<AgentPreferences>,
}

fn default_true() -> bool {
    true
}

/// Unicode case-insensitive equality for specialization, grade and location labels.
pub fn same_label(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Case-insensitive membership test for capability tags.
pub fn has_tag(tags: &[String], tag: &str) -> bool {
    tags.iter().any(|t| same_label(t, tag))
}
