//! Port for structured audit logging.
//!
//! Defines the [`AuditLogger`] trait for recording completion events and
//! delivery reports as machine-readable records.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the audit
//! trail (one record per completion, per delivery, per run).

use serde::Serialize;
use serde_json::Value;

/// A structured audit event.
pub struct AuditEvent {
    /// Event type identifier (e.g., "decision_completed", "delivery_report").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl AuditEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    /// Build an event from any serializable record.
    ///
    /// Serialization failures degrade to a `null` payload rather than
    /// interrupting the caller.
    pub fn from_record<T: Serialize>(event_type: &'static str, record: &T) -> Self {
        Self::new(
            event_type,
            serde_json::to_value(record).unwrap_or(Value::Null),
        )
    }
}

/// Port for logging audit events.
///
/// The `log` method is synchronous and non-fallible so that audit failures
/// never disturb a completion or delivery run.
pub trait AuditLogger: Send + Sync {
    fn log(&self, event: AuditEvent);
}

/// No-op implementation for tests and when auditing is disabled.
pub struct NoAuditLogger;

impl AuditLogger for NoAuditLogger {
    fn log(&self, _event: AuditEvent) {}
}
