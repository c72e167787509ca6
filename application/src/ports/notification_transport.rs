//! Notification transport port
//!
//! Defines how a rendered message physically leaves the system (SMTP
//! relay, webhook, outbox file...). Any non-success is retryable.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while sending
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Rejected by transport: {0}")]
    Rejected(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Physical delivery of one message to one address
#[async_trait]
pub trait NotificationTransport: Send + Sync {
    /// Send a message.
    ///
    /// `Ok(false)` is an explicit non-success signal and is retried the same
    /// way as an error.
    async fn send(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<bool, TransportError>;
}
