//! Sending an approved draft. The draft is claimed (`approved` → `sending`)
//! before the mail provider is called, so at most one request delivers it.

use async_trait::async_trait;
use tracing::{error, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::mailer::MailSender;

/// Status bookkeeping around one delivery.
#[async_trait]
pub trait SendLedger: Send + Sync {
    /// `approved` → `sending`. False when the draft is not approved, including
    /// when another request already claimed it.
    async fn claim(&self, draft_id: Uuid) -> Result<bool, AppError>;

    /// `sending` → `approved`, after the provider refused the message.
    async fn release(&self, draft_id: Uuid) -> Result<(), AppError>;

    /// `sending` → `sent` with the provider's message id.
    async fn complete(&self, draft_id: Uuid, message_id: &str) -> Result<(), AppError>;
}

/// Claims, sends, then records the send. Returns the provider message id.
pub async fn deliver(
    ledger: &dyn SendLedger,
    mailer: &dyn MailSender,
    draft_id: Uuid,
    to: &str,
    subject: &str,
    body: &str,
) -> Result<String, AppError> {
    if !ledger.claim(draft_id).await? {
        return Err(AppError::Conflict(format!(
            "Draft {draft_id} is not approved or is already being sent"
        )));
    }

    let message_id = match mailer.send(to, subject, body).await {
        Ok(message_id) => message_id,
        Err(e) => {
            warn!("Sending draft {draft_id} failed ({e}), returning it to approved");
            ledger.release(draft_id).await?;
            return Err(e.into());
        }
    };

    // The message is out: a failure here leaves the draft in `sending`, never `approved`.
    if let Err(e) = ledger.complete(draft_id, &message_id).await {
        error!("Draft {draft_id} was sent as {message_id} but could not be marked sent: {e}");
        return Err(e);
    }
    Ok(message_id)
}
