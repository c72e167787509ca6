//! Configuration file loading for quorum-ballot
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `QUORUM_BALLOT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./quorum-ballot.toml` or `./.quorum-ballot.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/quorum-ballot/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAcceptanceConfig, FileAuditConfig, FileConfig,
    FileDeliveryConfig, FileLoggingConfig, FileNotificationConfig, FileOutputConfig, FileSchedulerConfig,
    FileStoreConfig, FileTransportConfig, TransportKind,
};
pub use loader::ConfigLoader;
