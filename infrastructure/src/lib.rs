//! Infrastructure layer for quorum-ballot
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod recipients;
pub mod render;
pub mod store;
pub mod transport;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileDeliveryConfig, FileOutputConfig,
    TransportKind,
};
pub use logging::{JsonlAuditLogger, JsonlFile};
pub use recipients::SnapshotRecipientResolver;
pub use render::PlainSummaryRenderer;
pub use store::{InMemoryDecisionStore, Snapshot, SnapshotError};
#[cfg(feature = "webhook")]
pub use transport::WebhookTransport;
pub use transport::{LogTransport, OutboxMessage, OutboxTransport};
