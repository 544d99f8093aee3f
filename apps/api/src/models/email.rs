use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An inbound job email, as fetched from the mailbox and stored after processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EmailJob {
    pub id: Uuid,
    pub subject: String,
    pub from_email: String,
    pub to_email: String,
    pub body: String,
    pub received_date: DateTime<Utc>,
    pub processed: bool,
    pub job_id: Option<Uuid>,
}

impl EmailJob {
    pub fn new(subject: &str, from_email: &str, to_email: &str, body: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject: subject.to_string(),
            from_email: from_email.to_string(),
            to_email: to_email.to_string(),
            body: body.to_string(),
            received_date: Utc::now(),
            processed: false,
            job_id: None,
        }
    }
}
