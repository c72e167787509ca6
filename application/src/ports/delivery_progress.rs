//! Delivery progress notification port
//!
//! Defines the interface for reporting progress during a bulk delivery run.

use quorum_domain::DeliveryResult;

/// Callback for progress updates during bulk delivery
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, log lines, ...).
pub trait DeliveryProgressNotifier: Send + Sync {
    /// Called when a batch starts (`batch` is 1-based)
    fn on_batch_start(&self, batch: usize, total_batches: usize, size: usize);

    /// Called as soon as one recipient's delivery is final
    fn on_recipient_complete(&self, result: &DeliveryResult);

    /// Called when a batch has fully completed, including retries
    fn on_batch_complete(&self, batch: usize);

    /// Called before a failed attempt is retried
    fn on_retry(&self, _recipient_id: &str, _attempt: u32, _error: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoDeliveryProgress;

impl DeliveryProgressNotifier for NoDeliveryProgress {
    fn on_batch_start(&self, _batch: usize, _total_batches: usize, _size: usize) {}
    fn on_recipient_complete(&self, _result: &DeliveryResult) {}
    fn on_batch_complete(&self, _batch: usize) {}
}
