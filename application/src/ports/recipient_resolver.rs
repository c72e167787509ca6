//! Recipient resolver port
//!
//! The surrounding application owns member records and preferences; the
//! core only reads the eligible list and asks the preference predicate.

use async_trait::async_trait;
use quorum_domain::{EmailRecipient, NotificationKind};
use thiserror::Error;

/// Errors that can occur while resolving recipients
#[derive(Error, Debug)]
pub enum RecipientError {
    #[error("Recipient source unavailable: {0}")]
    Unavailable(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Source of notification recipients
#[async_trait]
pub trait RecipientResolver: Send + Sync {
    /// Active members with notifications enabled
    async fn eligible_recipients(&self) -> Result<Vec<EmailRecipient>, RecipientError>;

    /// Preference predicate for one notification kind.
    ///
    /// Honors per-kind opt-outs and a disabled digest frequency.
    fn should_receive(&self, recipient: &EmailRecipient, kind: NotificationKind) -> bool {
        recipient.is_active && recipient.preferences.allows(kind)
    }
}
