//! Deadline sweep configuration from TOML (`[scheduler]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw scheduler configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSchedulerConfig {
    /// Seconds between deadline sweeps in `watch` mode
    pub interval_secs: u64,
}

impl Default for FileSchedulerConfig {
    fn default() -> Self {
        Self { interval_secs: 60 }
    }
}

impl FileSchedulerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}
