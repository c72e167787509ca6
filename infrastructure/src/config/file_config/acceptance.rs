//! Delivery acceptance configuration from TOML (`[acceptance]` section)

use quorum_application::NotificationPolicy;
use serde::{Deserialize, Serialize};

/// Raw acceptance configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAcceptanceConfig {
    /// Minimum share of recipients that must receive an outcome (0.0-1.0)
    pub min_success_ratio: f64,
}

impl Default for FileAcceptanceConfig {
    fn default() -> Self {
        Self {
            min_success_ratio: NotificationPolicy::default().min_success_ratio,
        }
    }
}

impl FileAcceptanceConfig {
    pub fn to_policy(&self) -> NotificationPolicy {
        NotificationPolicy::default().with_min_success_ratio(self.min_success_ratio)
    }
}
