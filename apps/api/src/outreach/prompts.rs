// Prompts for doctor outreach drafts and reply suggestions.
// Each template is filled with `{placeholder}.replace` and must return JSON.

pub const OUTREACH_SYSTEM: &str =
    "You are a professional medical recruitment consultant writing personalized emails to doctors.";

pub const JOB_OPPORTUNITY_PROMPT: &str = r#"Generate a professional job opportunity email for a medical professional.

Candidate: {candidate_name} - {candidate_specialization} specialist with {experience} years experience
Job: {job_title} at {client} in {location}
Salary: {salary}
Requirements: {requirements}

The email should:
1. Be professional and personalized
2. Highlight why this job matches their profile
3. Include key job details (location, salary, requirements)
4. Have a clear call-to-action
5. Be from the recruitment agent: {agent_name}

Return JSON with "subject" and "body" fields."#;

pub const COMPLIANCE_REQUEST_PROMPT: &str = r#"Generate a professional email requesting compliance paperwork from a medical professional.

Candidate: {candidate_name}
Missing compliance documents: {missing_documents}

The email should:
1. Be professional and clear
2. Explain why these documents are needed
3. Provide clear instructions on how to submit
4. Include deadline if applicable
5. Be supportive and helpful

Return JSON with "subject" and "body" fields."#;

pub const INTERVIEW_INVITATION_PROMPT: &str = r#"Generate a professional interview invitation email for a medical professional.

Candidate: {candidate_name}
Job: {job_title} at {client} in {location}
From: {agent_name}

The email should:
1. Congratulate the candidate on being shortlisted
2. Ask for their availability over the coming week
3. Mention which documents to bring (GMC registration, photo ID)
4. Be warm and concise

Return JSON with "subject" and "body" fields."#;

pub const REPLY_PROMPT: &str = r#"Generate a professional response to a doctor's email reply.

Original email context: {original_body}
Doctor's response: {doctor_response}

The response should:
1. Be professional and helpful
2. Address any questions or concerns
3. Provide next steps if needed
4. Maintain the relationship

Return JSON with "subject", "body", and "confidence" (0-100) fields."#;

pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |acc, (key, value)| {
            acc.replace(&format!("{{{key}}}"), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_every_placeholder() {
        let prompt = fill(
            COMPLIANCE_REQUEST_PROMPT,
            &[
                ("candidate_name", "Dr. Michael Chen"),
                ("missing_documents", "GMC Registration, Updated CV"),
            ],
        );
        assert!(prompt.contains("Candidate: Dr. Michael Chen"));
        assert!(prompt.contains("documents: GMC Registration, Updated CV"));
        assert!(!prompt.contains("{candidate_name}"));
    }
}
