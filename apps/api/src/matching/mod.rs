//! Candidate matching: scores active candidates against a job.
//!
//! The matcher is pluggable behind `CandidateMatcher`. The LLM implementation
//! degrades to a neutral assessment when the model output cannot be parsed;
//! transport failures skip the candidate.

pub mod handlers;
pub mod prompts;
pub mod store;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::llm_client::{prompts::json_system, CompletionParams, LlmClient, LlmError};
use crate::models::agent::same_label;
use crate::models::candidate::Candidate;
use crate::models::job::Job;
use crate::models::matching::{CandidateMatch, MatchPriority};

const FALLBACK_SCORE: f64 = 50.0;
const FALLBACK_REASONING: &str = "Unable to process match analysis";

const MATCH_PARAMS: CompletionParams = CompletionParams {
    max_tokens: 500,
    temperature: 0.2,
};

/// What the matcher says about one candidate/job pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchAssessment {
    pub score: f64,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<String>,
}

impl MatchAssessment {
    pub fn fallback() -> Self {
        Self {
            score: FALLBACK_SCORE,
            reasoning: FALLBACK_REASONING.to_string(),
            matched_skills: vec![],
            gaps: vec![],
        }
    }

    /// Rounded and clamped to 0–100. Non-finite scores count as 0.
    pub fn bounded_score(&self) -> u32 {
        if !self.score.is_finite() {
            return 0;
        }
        self.score.round().clamp(0.0, 100.0) as u32
    }
}

/// Pluggable matching strategy.
#[async_trait]
pub trait CandidateMatcher: Send + Sync {
    async fn assess(
        &self,
        candidate_profile: &str,
        job_description: &str,
    ) -> Result<MatchAssessment, LlmError>;
}

pub struct LlmCandidateMatcher {
    llm: LlmClient,
}

impl LlmCandidateMatcher {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl CandidateMatcher for LlmCandidateMatcher {
    async fn assess(
        &self,
        candidate_profile: &str,
        job_description: &str,
    ) -> Result<MatchAssessment, LlmError> {
        let prompt = prompts::build_match_prompt(candidate_profile, job_description);
        let system = json_system(prompts::MATCH_SYSTEM);

        match self
            .llm
            .call_json::<MatchAssessment>(&prompt, &system, MATCH_PARAMS)
            .await
        {
            Ok(assessment) => Ok(assessment),
            Err(LlmError::Parse(e)) => {
                warn!("Match response was not valid JSON ({e}), using neutral score");
                Ok(MatchAssessment::fallback())
            }
            Err(LlmError::EmptyContent) => Ok(MatchAssessment::fallback()),
            Err(e) => Err(e),
        }
    }
}

/// Scores every active candidate whose specialization equals the job's
/// (case-insensitive), best first. Ties keep candidate order.
pub async fn find_matching_candidates(
    job: &Job,
    candidates: &[Candidate],
    matcher: &dyn CandidateMatcher,
) -> Vec<CandidateMatch> {
    let job_description = if job.description.trim().is_empty() {
        job.title.as_str()
    } else {
        job.description.as_str()
    };

    let mut matches = Vec::new();

    for candidate in candidates
        .iter()
        .filter(|c| c.is_active() && same_label(&c.specialization, &job.specialization))
    {
        let assessment = match matcher
            .assess(&candidate.profile_text(), job_description)
            .await
        {
            Ok(a) => a,
            Err(e) => {
                warn!(
                    "Skipping candidate {} for job {}: {e}",
                    candidate.id, job.id
                );
                continue;
            }
        };

        let score = assessment.bounded_score();
        matches.push(CandidateMatch {
            candidate_id: candidate.id,
            job_id: job.id,
            score,
            reasoning: assessment.reasoning,
            matched_skills: assessment.matched_skills,
            gaps: assessment.gaps,
            priority: MatchPriority::from_score(score),
            assigned_agent: job.assigned_agent,
        });
    }

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}

#[cfg(test)]
pub(crate) mod stub {
    use std::collections::HashMap;

    use super::*;

    /// Returns a fixed score per candidate profile; unknown profiles fail.
    pub struct FixedMatcher {
        pub scores: HashMap<String, f64>,
    }

    #[async_trait]
    impl CandidateMatcher for FixedMatcher {
        async fn assess(&self, profile: &str, _job: &str) -> Result<MatchAssessment, LlmError> {
            match self.scores.get(profile) {
                Some(score) => Ok(MatchAssessment {
                    score: *score,
                    reasoning: format!("scored {score}"),
                    matched_skills: vec!["GMC Registration".into()],
                    gaps: vec![],
                }),
                None => Err(LlmError::EmptyContent),
            }
        }
    }
}
