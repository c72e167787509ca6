//! Recipient resolver adapters

mod snapshot_resolver;

pub use snapshot_resolver::SnapshotRecipientResolver;
