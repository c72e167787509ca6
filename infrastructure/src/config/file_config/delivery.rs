//! Bulk delivery configuration from TOML (`[delivery]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [delivery]
//! max_concurrent = 3
//! batch_size = 10
//! batch_delay_ms = 500
//! max_attempts = 3
//! retry_base_delay_ms = 1000
//! send_timeout_secs = 30
//! ```

use quorum_application::{DeliveryOptions, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw delivery configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDeliveryConfig {
    /// Maximum sends in flight at once within a batch
    pub max_concurrent: usize,
    /// Recipients per batch
    pub batch_size: usize,
    /// Pause between batches in milliseconds
    pub batch_delay_ms: u64,
    /// Attempts per recipient, including the first
    pub max_attempts: u32,
    /// Backoff unit in milliseconds; attempt N waits N times this
    pub retry_base_delay_ms: u64,
    /// Upper bound for a single backoff delay in milliseconds
    pub retry_max_delay_ms: u64,
    /// Timeout for one send attempt in seconds
    pub send_timeout_secs: u64,
    /// Skip members whose preferences opt out of the notification kind
    pub respect_preferences: bool,
    /// Write one audit record per recipient
    pub record_delivery_status: bool,
}

impl Default for FileDeliveryConfig {
    fn default() -> Self {
        let options = DeliveryOptions::default();
        Self {
            max_concurrent: options.max_concurrent,
            batch_size: options.batch_size,
            batch_delay_ms: options.batch_delay.as_millis() as u64,
            max_attempts: options.retry.max_attempts,
            retry_base_delay_ms: options.retry.base_delay.as_millis() as u64,
            retry_max_delay_ms: options.retry.max_delay.as_millis() as u64,
            send_timeout_secs: options.send_timeout.as_secs(),
            respect_preferences: options.respect_preferences,
            record_delivery_status: options.record_delivery_status,
        }
    }
}

impl FileDeliveryConfig {
    /// Convert into application-level delivery options
    pub fn to_options(&self) -> DeliveryOptions {
        let retry = RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.retry_base_delay_ms),
        )
        .with_max_delay(Duration::from_millis(self.retry_max_delay_ms));

        DeliveryOptions::default()
            .with_max_concurrent(self.max_concurrent)
            .with_batch_size(self.batch_size)
            .with_batch_delay(Duration::from_millis(self.batch_delay_ms))
            .with_retry(retry)
            .with_send_timeout(Duration::from_secs(self.send_timeout_secs))
            .with_respect_preferences(self.respect_preferences)
            .with_record_delivery_status(self.record_delivery_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_application_defaults() {
        assert_eq!(
            FileDeliveryConfig::default().to_options(),
            DeliveryOptions::default()
        );
    }

    #[test]
    fn test_to_options() {
        let toml_str = r#"
[delivery]
max_concurrent = 5
batch_size = 25
batch_delay_ms = 0
max_attempts = 4
retry_base_delay_ms = 200
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let options = config.delivery.to_options();

        assert_eq!(options.max_concurrent, 5);
        assert_eq!(options.batch_size, 25);
        assert_eq!(options.batch_delay, Duration::ZERO);
        assert_eq!(options.retry.max_attempts, 4);
        assert_eq!(options.retry.base_delay, Duration::from_millis(200));
        // Untouched keys keep their defaults
        assert_eq!(options.send_timeout, Duration::from_secs(30));
        assert!(options.respect_preferences);
    }
}
