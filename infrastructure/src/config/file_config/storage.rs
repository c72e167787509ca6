//! Store, audit and log file locations (`[store]`, `[audit]`, `[logging]`)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw store configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    /// JSON snapshot holding decisions, votes and members
    pub snapshot_path: PathBuf,
    /// Write status transitions back to the snapshot
    pub persist: bool,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("quorum-ballot.json"),
            persist: true,
        }
    }
}

/// Raw audit configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuditConfig {
    /// JSONL audit file; auditing is off when unset
    pub path: Option<PathBuf>,
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for daily rolling log files; console only when unset
    pub directory: Option<PathBuf>,
    /// File name prefix for rolling log files
    pub file_prefix: String,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            directory: None,
            file_prefix: "quorum-ballot.log".to_string(),
        }
    }
}
