//! JSONL file writer for audit events.
//!
//! Each [`AuditEvent`] is serialized as a single JSON line with a `type`
//! field and `timestamp`, appended to the audit file.

use super::jsonl_file::JsonlFile;
use quorum_application::ports::audit_logger::{AuditEvent, AuditLogger};
use serde_json::Value;
use std::path::Path;
use tracing::warn;

/// JSONL audit logger that writes one JSON object per line.
pub struct JsonlAuditLogger {
    file: JsonlFile,
}

impl JsonlAuditLogger {
    /// Create a new logger appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match JsonlFile::open(path) {
            Ok(file) => Some(Self { file }),
            Err(e) => {
                warn!("Could not open audit log {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Get the path to the audit file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl AuditLogger for JsonlAuditLogger {
    fn log(&self, event: AuditEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        // Merge payload with type + timestamp
        let record = if let Value::Object(mut map) = event.payload {
            map.insert(
                "type".to_string(),
                Value::String(event.event_type.to_string()),
            );
            map.insert("timestamp".to_string(), Value::String(timestamp));
            Value::Object(map)
        } else {
            serde_json::json!({
                "type": event.event_type,
                "timestamp": timestamp,
                "data": event.payload,
            })
        };

        if let Err(e) = self.file.append(&record) {
            warn!("Failed to write audit event {}: {}", event.event_type, e);
        }
    }
}
