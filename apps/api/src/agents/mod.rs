// Recruitment agent roster: CRUD plus capacity validation.

pub mod handlers;
pub mod store;

use crate::errors::AppError;
use crate::models::agent::{AgentCapacity, AgentPreferences};

/// Active agents need strictly positive capacity; inactive ones are not scored.
pub fn validate_roster_entry(
    is_active: bool,
    capacity: &AgentCapacity,
    preferences: &AgentPreferences,
) -> Result<(), AppError> {
    if is_active && !capacity.is_positive() {
        return Err(AppError::Validation(
            "Active agents need max_active_jobs, max_candidates and hours_per_week above zero".into(),
        ));
    }
    if !(1..=10).contains(&preferences.urgency_weighting) {
        return Err(AppError::Validation(
            "urgency_weighting must be between 1 and 10".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_agent_may_have_zero_capacity() {
        let zero = AgentCapacity {
            max_active_jobs: 0,
            max_candidates: 0,
            hours_per_week: 0,
        };
        assert!(validate_roster_entry(false, &zero, &AgentPreferences::default()).is_ok());
        assert!(matches!(
            validate_roster_entry(true, &zero, &AgentPreferences::default()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_urgency_weighting_range() {
        let mut prefs = AgentPreferences::default();
        prefs.urgency_weighting = 11;
        assert!(validate_roster_entry(true, &AgentCapacity::default(), &prefs).is_err());
        prefs.urgency_weighting = 10;
        assert!(validate_roster_entry(true, &AgentCapacity::default(), &prefs).is_ok());
    }
}
