// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appends the JSON-only rule to a caller's system prompt.
pub fn json_system(system: &str) -> String {
    format!("{system} {JSON_ONLY_SYSTEM}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_system_appends_rule() {
        let system = json_system("You are a medical recruitment expert.");
        assert!(system.starts_with("You are a medical recruitment expert. You MUST"));
        assert!(system.ends_with("Do NOT include explanations or apologies."));
    }
}
