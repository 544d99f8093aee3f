//! Doctor outreach: AI-drafted emails held for agent approval before sending.
//!
//! Lifecycle:
//!   draft / pending_approval ──edit──► (unchanged)
//!   draft ──submit──► pending_approval
//!   pending_approval ──approve──► approved ──send──► sending ──► sent
//!   pending_approval ──reject───► rejected
//!
//! `sending` returns to `approved` only when the mail provider refused the message.

pub mod compliance;
pub mod drafts;
pub mod handlers;
pub mod prompts;
pub mod send;
pub mod store;

use crate::errors::AppError;
use crate::models::outreach::DraftStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftAction {
    Edit,
    Submit,
    Approve,
    Reject,
    Send,
}

impl DraftAction {
    fn verb(&self) -> &'static str {
        match self {
            DraftAction::Edit => "edit",
            DraftAction::Submit => "submit",
            DraftAction::Approve => "approve",
            DraftAction::Reject => "reject",
            DraftAction::Send => "send",
        }
    }
}

/// Status after applying `action`, or `CONFLICT` when the move is not allowed.
pub fn next_status(current: DraftStatus, action: DraftAction) -> Result<DraftStatus, AppError> {
    use DraftStatus::*;

    match (action, current) {
        (DraftAction::Edit, Draft | PendingApproval) => Ok(current),
        (DraftAction::Submit, Draft) => Ok(PendingApproval),
        (DraftAction::Approve, PendingApproval) => Ok(Approved),
        (DraftAction::Reject, PendingApproval) => Ok(Rejected),
        (DraftAction::Send, Approved) => Ok(Sending),
        _ => Err(AppError::Conflict(format!(
            "Cannot {} a draft that is {}",
            action.verb(),
            current.as_str()
        ))),
    }
}
