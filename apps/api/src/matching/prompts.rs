// Prompts for candidate-to-job matching.
// Follows the pattern: SYSTEM_PROMPT + a user template with {placeholders}.

pub const MATCH_SYSTEM: &str = "You are a medical recruitment expert. Always respond with valid JSON.";

pub const MATCH_PROMPT: &str = r#"Match this candidate CV to the job description. Provide:
1. Match score (0-100)
2. Brief reasoning for the score
3. List of matched skills/qualifications
4. List of potential gaps or missing requirements

Candidate CV:
{candidate_profile}

Job Description:
{job_description}

Respond in JSON format:
{
  "score": number,
  "reasoning": "string",
  "matchedSkills": ["skill1", "skill2"],
  "gaps": ["gap1", "gap2"]
}"#;

pub fn build_match_prompt(candidate_profile: &str, job_description: &str) -> String {
    MATCH_PROMPT
        .replace("{candidate_profile}", candidate_profile)
        .replace("{job_description}", job_description)
}
