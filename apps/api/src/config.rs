use anyhow::{Context, Result};

/// Sender domains accepted as NHS job emails when `NHS_DOMAINS` is unset.
pub const DEFAULT_NHS_DOMAINS: &[&str] = &[
    "nhs.net",
    "nhs.uk",
    "nhsmail.nhs.uk",
    "england.nhs.uk",
    "wales.nhs.uk",
    "scot.nhs.uk",
    "hscni.net",
];

/// Eclipse partner API credentials. Present only when all three variables are set.
#[derive(Debug, Clone)]
pub struct EclipseConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub openai_api_key: String,
    pub sendgrid_api_key: Option<String>,
    pub sendgrid_from_email: Option<String>,
    pub sendgrid_from_name: Option<String>,
    pub eclipse: Option<EclipseConfig>,
    pub nhs_domains: Vec<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let eclipse = match (
            optional_env("ECLIPSE_BASE_URL"),
            optional_env("ECLIPSE_CLIENT_ID"),
            optional_env("ECLIPSE_CLIENT_SECRET"),
        ) {
            (Some(base_url), Some(client_id), Some(client_secret)) => Some(EclipseConfig {
                base_url,
                client_id,
                client_secret,
            }),
            _ => None,
        };

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            sendgrid_api_key: optional_env("SENDGRID_API_KEY"),
            sendgrid_from_email: optional_env("SENDGRID_FROM_EMAIL"),
            sendgrid_from_name: optional_env("SENDGRID_FROM_NAME"),
            eclipse,
            nhs_domains: optional_env("NHS_DOMAINS")
                .map(|v| parse_domains(&v))
                .unwrap_or_else(default_nhs_domains),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

pub fn default_nhs_domains() -> Vec<String> {
    DEFAULT_NHS_DOMAINS.iter().map(|d| d.to_string()).collect()
}

/// Comma-separated, trimmed, lowercased, blanks dropped.
fn parse_domains(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|d| d.trim().to_lowercase())
        .filter(|d| !d.is_empty())
        .collect()
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_domains() {
        assert_eq!(
            parse_domains(" NHS.net, ,trust.nhs.uk "),
            vec!["nhs.net".to_string(), "trust.nhs.uk".to_string()]
        );
    }

    #[test]
    fn test_default_domains_include_nhs_net() {
        assert!(default_nhs_domains().contains(&"nhs.net".to_string()));
        assert_eq!(default_nhs_domains().len(), 7);
    }
}
