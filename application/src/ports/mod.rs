//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod audit_logger;
pub mod decision_store;
pub mod delivery_progress;
pub mod notification_transport;
pub mod recipient_resolver;
pub mod summary_renderer;
