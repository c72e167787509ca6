//! Notification transport adapters
//!
//! | Transport | Kind | Notes |
//! |-----------|------|-------|
//! | [`LogTransport`] | `log` | Writes one tracing line per message; always succeeds |
//! | [`OutboxTransport`] | `outbox` | Appends each message to a JSONL file for a mailer to pick up |
//! | `WebhookTransport` | `webhook` | POSTs JSON to an HTTP endpoint (`webhook` feature) |

mod log;
mod outbox;
#[cfg(feature = "webhook")]
mod webhook;

pub use log::LogTransport;
pub use outbox::{OutboxMessage, OutboxTransport};
#[cfg(feature = "webhook")]
pub use webhook::WebhookTransport;
