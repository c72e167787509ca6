//! Notification policy: caller-side judgement of a delivery run.

use serde::{Deserialize, Serialize};

/// How the outcome notifier judges a finished delivery report.
///
/// The delivery use case always returns the full report; this policy only
/// decides whether the run is logged as acceptable or as degraded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPolicy {
    /// Minimum share of in-scope recipients that must receive the summary.
    pub min_success_ratio: f64,
}

impl Default for NotificationPolicy {
    fn default() -> Self {
        Self {
            min_success_ratio: 0.7,
        }
    }
}

impl NotificationPolicy {
    pub fn with_min_success_ratio(mut self, ratio: f64) -> Self {
        self.min_success_ratio = ratio.clamp(0.0, 1.0);
        self
    }
}
