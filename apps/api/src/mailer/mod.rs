//! Mailer: outbound email through the SendGrid v3 API.
//!
//! Only approved outreach drafts are sent. The client is always constructed;
//! without an API key every send fails with `MailerError::NotConfigured` so the
//! rest of the service keeps working.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

const SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3/mail/send";
pub const DEFAULT_FROM_EMAIL: &str = "noreply@eclipse-ai.com";
pub const DEFAULT_FROM_NAME: &str = "Eclipse AI Assistant";

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("SendGrid API key is not configured")]
    NotConfigured,

    #[error("invalid email address '{0}'")]
    InvalidAddress(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("SendGrid error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    mime: &'a str,
    value: &'a str,
}

/// Anything that can deliver one outreach email and return its message id.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, text: &str) -> Result<String, MailerError>;
}

#[derive(Clone)]
pub struct Mailer {
    client: Client,
    api_key: Option<String>,
    from_email: String,
    from_name: String,
}

impl Mailer {
    pub fn new(
        api_key: Option<String>,
        from_email: Option<String>,
        from_name: Option<String>,
    ) -> Result<Self, MailerError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            from_email: from_email.unwrap_or_else(|| DEFAULT_FROM_EMAIL.to_string()),
            from_name: from_name.unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Sends a plain-text email (with an HTML rendition) and returns the
    /// SendGrid message id.
    pub async fn send(&self, to: &str, subject: &str, text: &str) -> Result<String, MailerError> {
        let api_key = self.api_key.as_deref().ok_or(MailerError::NotConfigured)?;

        if !validate_email(to) {
            return Err(MailerError::InvalidAddress(to.to_string()));
        }

        let html = text_to_html(text);
        let request = SendRequest {
            personalizations: vec![Personalization {
                to: vec![Address {
                    email: to,
                    name: None,
                }],
            }],
            from: Address {
                email: &self.from_email,
                name: Some(&self.from_name),
            },
            subject,
            content: vec![
                Content {
                    mime: "text/plain",
                    value: text,
                },
                Content {
                    mime: "text/html",
                    value: &html,
                },
            ],
        };

        let response = self
            .client
            .post(SENDGRID_API_URL)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("SendGrid returned {status} for {to}");
            return Err(MailerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let message_id = response
            .headers()
            .get("x-message-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        info!("Email sent to {to} (message id {message_id})");
        Ok(message_id)
    }
}

#[async_trait]
impl MailSender for Mailer {
    async fn send(&self, to: &str, subject: &str, text: &str) -> Result<String, MailerError> {
        Mailer::send(self, to, subject, text).await
    }
}

/// `local@domain.tld` with no whitespace.
pub fn validate_email(address: &str) -> bool {
    if address.is_empty() || address.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Escapes the text and turns line breaks into `<br>`.
pub fn text_to_html(text: &str) -> String {
    let mut html = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => html.push_str("&amp;"),
            '<' => html.push_str("&lt;"),
            '>' => html.push_str("&gt;"),
            '"' => html.push_str("&quot;"),
            '\n' => html.push_str("<br>"),
            '\r' => {}
            other => html.push(other),
        }
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("sarah.johnson@email.com"));
        assert!(validate_email("recruitment@royallondon.nhs.uk"));
        assert!(!validate_email(""));
        assert!(!validate_email("no-at-sign.com"));
        assert!(!validate_email("@email.com"));
        assert!(!validate_email("sarah@localhost"));
        assert!(!validate_email("sarah @email.com"));
        assert!(!validate_email("a@b@c.com"));
    }

    #[test]
    fn test_text_to_html_escapes_and_breaks_lines() {
        assert_eq!(
            text_to_html("Dear Dr. <Smith>,\r\n\nRates & terms"),
            "Dear Dr. &lt;Smith&gt;,<br><br>Rates &amp; terms"
        );
    }

    #[tokio::test]
    async fn test_send_without_key_is_not_configured() {
        let mailer = Mailer::new(Some("  ".into()), None, None).unwrap();
        assert!(!mailer.is_configured());
        let err = mailer
            .send("sarah@email.com", "Hello", "Body")
            .await
            .unwrap_err();
        assert!(matches!(err, MailerError::NotConfigured));
    }

    #[tokio::test]
    async fn test_invalid_recipient_rejected_before_request() {
        let mailer = Mailer::new(Some("SG.key".into()), None, None).unwrap();
        let err = mailer.send("not an email", "Hello", "Body").await.unwrap_err();
        assert!(matches!(err, MailerError::InvalidAddress(_)));
    }

    #[test]
    fn test_request_shape() {
        let request = SendRequest {
            personalizations: vec![Personalization {
                to: vec![Address {
                    email: "sarah@email.com",
                    name: None,
                }],
            }],
            from: Address {
                email: DEFAULT_FROM_EMAIL,
                name: Some(DEFAULT_FROM_NAME),
            },
            subject: "Hi",
            content: vec![Content {
                mime: "text/plain",
                value: "Body",
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["from"]["name"], "Eclipse AI Assistant");
        assert!(value["personalizations"][0]["to"][0].get("name").is_none());
        assert_eq!(value["content"][0]["type"], "text/plain");
    }
}
