//! Decision store port
//!
//! Defines the interface to the persistent store that owns decisions and
//! votes. The only write the core performs is the guarded status update.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quorum_domain::{Decision, DecisionId, DecisionStatus, VoteRecord};
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Decision not found: {0}")]
    NotFound(DecisionId),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Store for decisions and votes
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait DecisionStore: Send + Sync {
    /// Load a decision by id
    async fn get_decision(&self, id: &DecisionId) -> Result<Decision, StoreError>;

    /// Load all votes cast on a decision, at most one per voter
    async fn get_votes(&self, id: &DecisionId) -> Result<Vec<VoteRecord>, StoreError>;

    /// Conditionally move a decision from `expected` to `new`.
    ///
    /// Must behave as a compare-and-swap: the write happens only if the
    /// current status equals `expected`, and the return value says whether
    /// it happened. `Ok(false)` means another writer got there first.
    async fn update_decision_status(
        &self,
        id: &DecisionId,
        expected: DecisionStatus,
        new: DecisionStatus,
        completed_at: DateTime<Utc>,
    ) -> Result<bool, StoreError>;

    /// Decisions still in `voting` whose deadline is at or before `now`
    async fn list_expired_voting_decisions(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Decision>, StoreError>;
}
