//! Application layer for quorum-ballot
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DeliveryOptions, NotificationPolicy, RetryPolicy};
pub use ports::{
    audit_logger::{AuditEvent, AuditLogger, NoAuditLogger},
    decision_store::{DecisionStore, StoreError},
    delivery_progress::{DeliveryProgressNotifier, NoDeliveryProgress},
    notification_transport::{NotificationTransport, TransportError},
    recipient_resolver::{RecipientError, RecipientResolver},
    summary_renderer::{RenderError, SummaryRenderer},
};
pub use use_cases::bulk_delivery::{BulkDeliveryInput, BulkDeliveryUseCase};
pub use use_cases::check_completion::{
    CompletionDetector, CompletionError, CompletionReport, SweepReport,
};
pub use use_cases::deadline_scheduler::DeadlineScheduler;
pub use use_cases::notify_outcome::{
    NoOutcomeNotifier, NotifyError, NotifyOutcomeUseCase, OutcomeNotifier,
};
