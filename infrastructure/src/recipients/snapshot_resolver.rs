//! Member directory read from the snapshot file.

use crate::store::{Snapshot, SnapshotError};
use async_trait::async_trait;
use quorum_application::ports::recipient_resolver::{RecipientError, RecipientResolver};
use quorum_domain::EmailRecipient;
use std::path::Path;

/// Resolves recipients from a fixed member list.
pub struct SnapshotRecipientResolver {
    members: Vec<EmailRecipient>,
}

impl SnapshotRecipientResolver {
    pub fn new(members: Vec<EmailRecipient>) -> Self {
        Self { members }
    }

    /// Read the `members` list of a snapshot file (empty when missing).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        Ok(Self::new(Snapshot::load_or_default(path)?.members))
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

#[async_trait]
impl RecipientResolver for SnapshotRecipientResolver {
    async fn eligible_recipients(&self) -> Result<Vec<EmailRecipient>, RecipientError> {
        Ok(self
            .members
            .iter()
            .filter(|m| m.is_active && m.preferences.email_enabled)
            .cloned()
            .collect())
    }
}
