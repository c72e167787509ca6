//! JSON snapshot of decisions, votes and members.
//!
//! The snapshot is the on-disk form of [`InMemoryDecisionStore`](super::InMemoryDecisionStore)
//! and the member list read by
//! [`SnapshotRecipientResolver`](crate::recipients::SnapshotRecipientResolver).
//!
//! ```json
//! {
//!   "decisions": [{ "id": "res-1", "kind": "resolution", "status": "voting", ... }],
//!   "votes": [{ "decision_id": "res-1", "voter": { ... }, "choice": "approve", ... }],
//!   "members": [{ "id": "m1", "name": "Ada", "email": "ada@board.org" }]
//! }
//! ```

use quorum_domain::{Decision, EmailRecipient, VoteRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors reading or writing a snapshot file
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Serializable state of the store and member directory
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub decisions: Vec<Decision>,
    pub votes: Vec<VoteRecord>,
    pub members: Vec<EmailRecipient>,
}

impl Snapshot {
    /// Read a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Read a snapshot file, or start empty when it does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the snapshot, replacing the file atomically.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        let staging = path.with_extension("json.tmp");
        std::fs::write(&staging, content)?;
        std::fs::rename(&staging, path)?;
        Ok(())
    }
}
