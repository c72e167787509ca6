//! Notification transport configuration from TOML (`[transport]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [transport]
//! kind = "outbox"
//! outbox_path = "outbox.jsonl"
//!
//! # or, with the `webhook` feature enabled
//! [transport]
//! kind = "webhook"
//! webhook_url = "https://mailer.internal/send"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which transport adapter sends messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Log each message through tracing and report success
    #[default]
    Log,
    /// Append each message as a JSON line to a file
    Outbox,
    /// POST each message to an HTTP endpoint
    Webhook,
}

/// Raw transport configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTransportConfig {
    pub kind: TransportKind,
    /// Outbox file for `kind = "outbox"`
    pub outbox_path: PathBuf,
    /// Endpoint for `kind = "webhook"`
    pub webhook_url: Option<String>,
    /// Request timeout for the webhook client in seconds
    pub webhook_timeout_secs: u64,
}

impl Default for FileTransportConfig {
    fn default() -> Self {
        Self {
            kind: TransportKind::Log,
            outbox_path: PathBuf::from("quorum-ballot-outbox.jsonl"),
            webhook_url: None,
            webhook_timeout_secs: 15,
        }
    }
}
