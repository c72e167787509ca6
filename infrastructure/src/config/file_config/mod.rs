//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod acceptance;
mod delivery;
mod notification;
mod output;
mod scheduler;
mod storage;
mod transport;

pub use acceptance::FileAcceptanceConfig;
pub use delivery::FileDeliveryConfig;
pub use notification::FileNotificationConfig;
pub use output::FileOutputConfig;
pub use scheduler::FileSchedulerConfig;
pub use storage::{FileAuditConfig, FileLoggingConfig, FileStoreConfig};
pub use transport::{FileTransportConfig, TransportKind};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, PartialEq)]
pub enum ConfigValidationError {
    #[error("delivery.max_concurrent cannot be 0")]
    ZeroConcurrency,

    #[error("delivery.batch_size cannot be 0")]
    ZeroBatchSize,

    #[error("delivery.max_attempts cannot be 0")]
    ZeroAttempts,

    #[error("delivery.send_timeout_secs cannot be 0")]
    ZeroSendTimeout,

    #[error("scheduler.interval_secs cannot be 0")]
    ZeroSweepInterval,

    #[error("acceptance.min_success_ratio must be within 0.0-1.0, got {0}")]
    InvalidSuccessRatio(f64),

    #[error("transport.webhook_url is required when transport.kind = \"webhook\"")]
    MissingWebhookUrl,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Bulk delivery settings
    pub delivery: FileDeliveryConfig,
    /// Deadline sweep settings
    pub scheduler: FileSchedulerConfig,
    /// Decision store location
    pub store: FileStoreConfig,
    /// How messages leave the system
    pub transport: FileTransportConfig,
    /// Audit trail location
    pub audit: FileAuditConfig,
    /// File logging
    pub logging: FileLoggingConfig,
    /// Delivery acceptance bar
    pub acceptance: FileAcceptanceConfig,
    /// Message content
    pub notification: FileNotificationConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.delivery.max_concurrent == 0 {
            return Err(ConfigValidationError::ZeroConcurrency);
        }
        if self.delivery.batch_size == 0 {
            return Err(ConfigValidationError::ZeroBatchSize);
        }
        if self.delivery.max_attempts == 0 {
            return Err(ConfigValidationError::ZeroAttempts);
        }
        if self.delivery.send_timeout_secs == 0 {
            return Err(ConfigValidationError::ZeroSendTimeout);
        }
        if self.scheduler.interval_secs == 0 {
            return Err(ConfigValidationError::ZeroSweepInterval);
        }

        let ratio = self.acceptance.min_success_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(ConfigValidationError::InvalidSuccessRatio(ratio));
        }

        if self.transport.kind == TransportKind::Webhook
            && self
                .transport
                .webhook_url
                .as_deref()
                .is_none_or(|url| url.trim().is_empty())
        {
            return Err(ConfigValidationError::MissingWebhookUrl);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quorum_domain::OutputFormat;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[delivery]
max_concurrent = 4
batch_size = 20

[scheduler]
interval_secs = 30

[store]
snapshot_path = "/var/lib/ballot/state.json"

[transport]
kind = "log"

[audit]
path = "/var/log/ballot/audit.jsonl"

[acceptance]
min_success_ratio = 0.9

[notification]
organization = "Harbor Board"

[output]
format = "json"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.delivery.max_concurrent, 4);
        assert_eq!(config.delivery.batch_size, 20);
        assert_eq!(config.scheduler.interval_secs, 30);
        assert_eq!(
            config.store.snapshot_path,
            PathBuf::from("/var/lib/ballot/state.json")
        );
        assert_eq!(
            config.audit.path,
            Some(PathBuf::from("/var/log/ballot/audit.jsonl"))
        );
        assert_eq!(config.acceptance.min_success_ratio, 0.9);
        assert_eq!(config.notification.organization, "Harbor Board");
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[delivery]
batch_size = 50
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.delivery.batch_size, 50);
        // Defaults should apply
        assert_eq!(config.delivery.max_concurrent, 3);
        assert_eq!(config.acceptance.min_success_ratio, 0.7);
        assert_eq!(config.transport.kind, TransportKind::Log);
        assert!(config.audit.path.is_none());
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_limits() {
        let config: FileConfig = toml::from_str("[delivery]\nmax_concurrent = 0").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::ZeroConcurrency));

        let config: FileConfig = toml::from_str("[delivery]\nbatch_size = 0").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::ZeroBatchSize));

        let config: FileConfig = toml::from_str("[delivery]\nmax_attempts = 0").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::ZeroAttempts));
    }

    #[test]
    fn test_validate_ratio_out_of_range() {
        let config: FileConfig = toml::from_str("[acceptance]\nmin_success_ratio = 1.5").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidSuccessRatio(1.5))
        );
    }

    #[test]
    fn test_validate_webhook_requires_url() {
        let config: FileConfig = toml::from_str("[transport]\nkind = \"webhook\"").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::MissingWebhookUrl));

        let config: FileConfig = toml::from_str(
            "[transport]\nkind = \"webhook\"\nwebhook_url = \"https://mailer.internal/send\"",
        )
        .unwrap();
        assert!(config.validate().is_ok());
    }
}
