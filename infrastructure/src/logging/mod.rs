//! Logging infrastructure: structured audit logging.
//!
//! Provides [`JsonlAuditLogger`], a JSONL file writer that implements the
//! [`AuditLogger`](quorum_application::AuditLogger) port, and the
//! append-only [`JsonlFile`] it shares with the outbox transport.

mod audit_logger;
mod jsonl_file;

pub use audit_logger::JsonlAuditLogger;
pub use jsonl_file::JsonlFile;
