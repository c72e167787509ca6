//! Transport that only logs.

use async_trait::async_trait;
use quorum_application::ports::notification_transport::{NotificationTransport, TransportError};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

/// Logs each message through `tracing` instead of sending it.
///
/// Used for dry runs and as the default when no transport is configured.
#[derive(Default)]
pub struct LogTransport {
    sent: AtomicUsize,
}

impl LogTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages logged so far
    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl NotificationTransport for LogTransport {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        _html_body: &str,
        text_body: &str,
    ) -> Result<bool, TransportError> {
        self.sent.fetch_add(1, Ordering::Relaxed);
        info!(
            to,
            subject,
            bytes = text_body.len(),
            "Notification (log transport)"
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_always_succeeds() {
        let transport = LogTransport::new();
        assert!(transport.send("ada@board.org", "Hi", "<p>x</p>", "x").await.unwrap());
        assert!(transport.send("ben@board.org", "Hi", "<p>x</p>", "x").await.unwrap());
        assert_eq!(transport.sent(), 2);
    }
}
