//! Delivery options: bulk delivery loop control.
//!
//! [`DeliveryOptions`] groups the static parameters that control
//! [`BulkDeliveryUseCase`](crate::use_cases::bulk_delivery::BulkDeliveryUseCase):
//! concurrency, batching, retries and timeouts.

use super::retry_policy::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bulk delivery control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryOptions {
    /// Maximum sends in flight at once within a batch.
    pub max_concurrent: usize,
    /// Recipients per batch; batches run one after another.
    pub batch_size: usize,
    /// Pause between consecutive batches.
    pub batch_delay: Duration,
    /// Attempts and backoff per recipient.
    pub retry: RetryPolicy,
    /// Upper bound for a single send attempt.
    pub send_timeout: Duration,
    /// Drop recipients whose preferences opt out of this notification kind.
    pub respect_preferences: bool,
    /// Emit a per-recipient audit record as each send finishes.
    pub record_delivery_status: bool,
}

impl Default for DeliveryOptions {
    fn default() -> Self {
        Self {
            max_concurrent: 3,
            batch_size: 10,
            batch_delay: Duration::from_millis(500),
            retry: RetryPolicy::default(),
            send_timeout: Duration::from_secs(30),
            respect_preferences: true,
            record_delivery_status: true,
        }
    }
}

impl DeliveryOptions {
    // ==================== Builder Methods ====================

    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max;
        self
    }

    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_send_timeout(mut self, timeout: Duration) -> Self {
        self.send_timeout = timeout;
        self
    }

    pub fn with_respect_preferences(mut self, respect: bool) -> Self {
        self.respect_preferences = respect;
        self
    }

    pub fn with_record_delivery_status(mut self, record: bool) -> Self {
        self.record_delivery_status = record;
        self
    }

    /// Concurrency and batch size with zero values lifted to 1.
    pub(crate) fn effective_limits(&self) -> (usize, usize) {
        (self.max_concurrent.max(1), self.batch_size.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let options = DeliveryOptions::default();
        assert_eq!(options.max_concurrent, 3);
        assert_eq!(options.batch_size, 10);
        assert_eq!(options.batch_delay, Duration::from_millis(500));
        assert_eq!(options.retry.max_attempts, 3);
        assert!(options.respect_preferences);
        assert!(options.record_delivery_status);
    }

    #[test]
    fn test_builder() {
        let options = DeliveryOptions::default()
            .with_max_concurrent(5)
            .with_batch_size(20)
            .with_batch_delay(Duration::ZERO)
            .with_respect_preferences(false);

        assert_eq!(options.max_concurrent, 5);
        assert_eq!(options.batch_size, 20);
        assert_eq!(options.batch_delay, Duration::ZERO);
        assert!(!options.respect_preferences);
    }

    #[test]
    fn test_effective_limits_never_zero() {
        let options = DeliveryOptions::default()
            .with_max_concurrent(0)
            .with_batch_size(0);
        assert_eq!(options.effective_limits(), (1, 1));
    }
}
