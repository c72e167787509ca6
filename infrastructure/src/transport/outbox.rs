//! JSONL outbox transport.

use crate::logging::JsonlFile;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quorum_application::ports::notification_transport::{NotificationTransport, TransportError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One queued message in the outbox file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboxMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
    pub queued_at: DateTime<Utc>,
}

/// Appends messages to a JSONL file for an external mailer.
///
/// A message counts as delivered once its line is flushed.
pub struct OutboxTransport {
    file: JsonlFile,
}

impl OutboxTransport {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TransportError> {
        let path = path.as_ref();
        JsonlFile::open(path)
            .map(|file| Self { file })
            .map_err(|e| {
                TransportError::ConnectionError(format!(
                    "cannot open outbox {}: {}",
                    path.display(),
                    e
                ))
            })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[async_trait]
impl NotificationTransport for OutboxTransport {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<bool, TransportError> {
        let message = OutboxMessage {
            to: to.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
            text_body: text_body.to_string(),
            queued_at: Utc::now(),
        };

        self.file
            .append(&message)
            .map(|()| true)
            .map_err(|e| TransportError::Other(format!("outbox write failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_messages_are_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outbox.jsonl");
        let transport = OutboxTransport::open(&path).unwrap();

        transport
            .send("ada@board.org", "Outcome", "<p>Approved</p>", "Approved")
            .await
            .unwrap();
        transport
            .send("ben@board.org", "Outcome", "<p>Approved</p>", "Approved")
            .await
            .unwrap();

        let messages: Vec<OutboxMessage> = std::fs::read_to_string(transport.path())
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].to, "ada@board.org");
        assert_eq!(messages[1].text_body, "Approved");
    }

    #[test]
    fn test_open_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        assert!(matches!(
            OutboxTransport::open(blocker.join("outbox.jsonl")),
            Err(TransportError::ConnectionError(_))
        ));
    }
}
