//! Notification content configuration from TOML (`[notification]` section)

use serde::{Deserialize, Serialize};

/// Raw notification configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNotificationConfig {
    /// Organization name shown in subjects and signatures
    pub organization: String,
}
