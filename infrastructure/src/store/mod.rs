//! Decision store adapters
//!
//! [`InMemoryDecisionStore`] implements the
//! [`DecisionStore`](quorum_application::DecisionStore) port, optionally
//! backed by a JSON [`Snapshot`] file.

mod memory;
mod snapshot;

pub use memory::InMemoryDecisionStore;
pub use snapshot::{Snapshot, SnapshotError};
