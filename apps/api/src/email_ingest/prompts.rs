// Prompts for extracting a job from an NHS recruitment email.

pub const EXTRACT_JOB_SYSTEM: &str = "You are an expert at parsing NHS recruitment emails. \
    Always respond with valid JSON. \
    Use standard NHS grades like Consultant, ST1-ST8, SHO, FY1-FY2, etc.";

pub const EXTRACT_JOB_PROMPT: &str = r#"Extract job details from this NHS recruitment email. Return a JSON object with the following structure:
{
  "title": "job title",
  "specialization": "medical specialization",
  "grade": "medical grade (e.g., Consultant, ST1-ST8, SHO, etc.)",
  "location": "location",
  "salary": "salary/rate information",
  "type": "permanent|contract|locum",
  "urgency": "high|medium|low",
  "requirements": ["requirement1", "requirement2"],
  "description": "brief description"
}

Email Subject: {subject}
Email Body: {body}

Focus on medical terminology and NHS grading systems. If urgency indicators like "urgent", "ASAP", "immediate" are present, set urgency to "high"."#;

pub fn build_extract_job_prompt(subject: &str, body: &str) -> String {
    EXTRACT_JOB_PROMPT
        .replace("{subject}", subject)
        .replace("{body}", body)
}
