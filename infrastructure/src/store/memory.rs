//! In-memory decision store with optional snapshot persistence.

use super::snapshot::{Snapshot, SnapshotError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quorum_application::ports::decision_store::{DecisionStore, StoreError};
use quorum_domain::{Decision, DecisionId, DecisionStatus, VoteRecord};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

#[derive(Default)]
struct StoreState {
    decisions: BTreeMap<DecisionId, Decision>,
    votes: HashMap<DecisionId, Vec<VoteRecord>>,
}

/// Decision store held in memory.
///
/// The status update is a compare-and-swap performed under a single lock,
/// so concurrent completion checks see exactly one successful transition.
/// With [`persist_to`](Self::persist_to), every successful transition is
/// written back to a JSON snapshot.
///
/// Persistence is meant for single-process CLI use: the snapshot is read and
/// written synchronously while the lock is held, so a transition blocks the
/// calling runtime worker for the file round-trip. Services with many
/// concurrent checks should use a store backed by a real database.
#[derive(Default)]
pub struct InMemoryDecisionStore {
    state: Mutex<StoreState>,
    persist_path: Option<PathBuf>,
}

impl InMemoryDecisionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a snapshot; members are ignored here.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut state = StoreState::default();
        for decision in snapshot.decisions {
            state.decisions.insert(decision.id.clone(), decision);
        }
        for vote in snapshot.votes {
            Self::upsert_into(&mut state, vote);
        }
        Self {
            state: Mutex::new(state),
            persist_path: None,
        }
    }

    /// Load a snapshot file (empty when missing) and persist transitions back to it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let snapshot = Snapshot::load_or_default(path)?;
        Ok(Self::from_snapshot(snapshot).persist_to(path))
    }

    /// Write every successful transition back to `path`.
    ///
    /// The write is synchronous and happens under the store lock; see the
    /// type-level docs.
    pub fn persist_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.persist_path = Some(path.into());
        self
    }

    /// Add or replace a decision.
    pub fn insert_decision(&self, decision: Decision) -> Result<(), StoreError> {
        let mut state = self.lock_state()?;
        state.decisions.insert(decision.id.clone(), decision);
        Ok(())
    }

    /// Record a vote, replacing the voter's earlier vote on the same decision.
    ///
    /// Votes are only accepted while the decision is in `voting`.
    pub fn upsert_vote(&self, vote: VoteRecord) -> Result<(), StoreError> {
        let mut state = self.lock_state()?;
        let decision = state
            .decisions
            .get(&vote.decision_id)
            .ok_or_else(|| StoreError::NotFound(vote.decision_id.clone()))?;
        if !decision.is_voting() {
            return Err(StoreError::Other(format!(
                "{} is {} and no longer accepts votes",
                decision.id, decision.status
            )));
        }
        Self::upsert_into(&mut state, vote);
        Ok(())
    }

    /// Current state as a snapshot (without members).
    pub fn snapshot(&self) -> Result<Snapshot, StoreError> {
        let state = self.lock_state()?;
        Ok(Self::snapshot_of(&state))
    }

    fn snapshot_of(state: &StoreState) -> Snapshot {
        let mut votes: Vec<VoteRecord> = state.votes.values().flatten().cloned().collect();
        votes.sort_by(|a, b| {
            a.decision_id
                .cmp(&b.decision_id)
                .then(a.cast_at.cmp(&b.cast_at))
        });
        Snapshot {
            decisions: state.decisions.values().cloned().collect(),
            votes,
            members: Vec::new(),
        }
    }

    fn upsert_into(state: &mut StoreState, vote: VoteRecord) {
        let votes = state.votes.entry(vote.decision_id.clone()).or_default();
        match votes.iter_mut().find(|v| v.voter.id == vote.voter.id) {
            Some(existing) => *existing = vote,
            None => votes.push(vote),
        }
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, StoreState>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    /// Write the snapshot back, keeping members already in the file.
    fn persist(&self, state: &StoreState) -> Result<(), StoreError> {
        let Some(path) = &self.persist_path else {
            return Ok(());
        };

        let members = Snapshot::load_or_default(path)
            .map(|existing| existing.members)
            .unwrap_or_else(|e| {
                warn!("Could not re-read members from {}: {}", path.display(), e);
                Vec::new()
            });

        let snapshot = Snapshot {
            members,
            ..Self::snapshot_of(state)
        };
        snapshot
            .save(path)
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl DecisionStore for InMemoryDecisionStore {
    async fn get_decision(&self, id: &DecisionId) -> Result<Decision, StoreError> {
        self.lock_state()?
            .decisions
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    async fn get_votes(&self, id: &DecisionId) -> Result<Vec<VoteRecord>, StoreError> {
        let state = self.lock_state()?;
        if !state.decisions.contains_key(id) {
            return Err(StoreError::NotFound(id.clone()));
        }
        Ok(state.votes.get(id).cloned().unwrap_or_default())
    }

    async fn update_decision_status(
        &self,
        id: &DecisionId,
        expected: DecisionStatus,
        new: DecisionStatus,
        completed_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let mut state = self.lock_state()?;
        let decision = state
            .decisions
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        if decision.status != expected {
            debug!(
                "Status update of {} skipped: expected {}, found {}",
                id, expected, decision.status
            );
            return Ok(false);
        }

        let previous = decision.status;
        decision.status = new;
        decision.completed_at = Some(completed_at);

        if let Err(e) = self.persist(&state) {
            // Keep memory and disk consistent: undo and report
            if let Some(decision) = state.decisions.get_mut(id) {
                decision.status = previous;
                decision.completed_at = None;
            }
            return Err(e);
        }

        Ok(true)
    }

    async fn list_expired_voting_decisions(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Decision>, StoreError> {
        Ok(self
            .lock_state()?
            .decisions
            .values()
            .filter(|d| d.is_voting() && d.deadline_expired(now))
            .cloned()
            .collect())
    }
}
