//! Retry policy for per-recipient delivery attempts.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for retry behavior on failed sends.
///
/// The delay before retry `n` (1-based, counting the failed attempt) grows
/// linearly with the attempt number and is capped at `max_delay`:
///
/// ```text
/// attempt 1 fails → wait base × 1
/// attempt 2 fails → wait base × 2
/// ...
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Delay after the first failed attempt.
    pub base_delay: Duration,
    /// Maximum delay between retries (backoff is capped here).
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            ..Self::default()
        }
    }

    /// A policy that makes a single attempt.
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Attempts to make; at least one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay to wait after `failed_attempt` (1-based) before trying again.
    pub fn delay_after(&self, failed_attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(failed_attempt.max(1))
            .min(self.max_delay)
    }
}
