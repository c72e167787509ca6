//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid voting configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Unknown vote value: {0}")]
    UnknownVoteValue(String),

    #[error("Unknown decision status: {0}")]
    UnknownStatus(String),

    #[error("Unknown decision kind: {0}")]
    UnknownKind(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Unknown output format: {0}")]
    UnknownOutputFormat(String),
}

impl DomainError {
    /// Check if this error was caused by a malformed voting configuration
    pub fn is_configuration(&self) -> bool {
        matches!(self, DomainError::InvalidConfiguration(_))
    }
}
