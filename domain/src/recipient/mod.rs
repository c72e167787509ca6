//! Notification recipients
//!
//! [`EmailRecipient`]s are supplied by the surrounding application and are
//! read-only here. Preference evaluation lives with the recipient resolver;
//! this module only carries the data and the address sanity check.

use crate::core::error::DomainError;
use crate::decision::DecisionKind;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Address fragments that mark seeded or placeholder accounts.
pub const PLACEHOLDER_EMAIL_MARKERS: &[&str] = &[
    "@example.com",
    "@example.org",
    "@test.com",
    "@localhost",
    "noreply",
    "no-reply",
    "placeholder",
];

/// Kind of notification being delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    ResolutionOutcome,
    MinutesOutcome,
}

impl NotificationKind {
    pub fn for_decision(kind: DecisionKind) -> Self {
        match kind {
            DecisionKind::Resolution => NotificationKind::ResolutionOutcome,
            DecisionKind::Minutes => NotificationKind::MinutesOutcome,
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::ResolutionOutcome => write!(f, "resolution_outcome"),
            NotificationKind::MinutesOutcome => write!(f, "minutes_outcome"),
        }
    }
}

/// How often a member wants to hear from the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigestFrequency {
    #[default]
    Immediate,
    Daily,
    Weekly,
    Disabled,
}

/// Per-member notification switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationPreferences {
    pub email_enabled: bool,
    pub resolution_outcomes: bool,
    pub minutes_outcomes: bool,
    pub digest_frequency: DigestFrequency,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email_enabled: true,
            resolution_outcomes: true,
            minutes_outcomes: true,
            digest_frequency: DigestFrequency::Immediate,
        }
    }
}

impl NotificationPreferences {
    /// Whether the member opted in to this kind of notification.
    pub fn allows(&self, kind: NotificationKind) -> bool {
        if !self.email_enabled || self.digest_frequency == DigestFrequency::Disabled {
            return false;
        }
        match kind {
            NotificationKind::ResolutionOutcome => self.resolution_outcomes,
            NotificationKind::MinutesOutcome => self.minutes_outcomes,
        }
    }
}

/// A member eligible to receive the outcome summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecipient {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub preferences: NotificationPreferences,
}

fn default_active() -> bool {
    true
}

impl EmailRecipient {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            position: None,
            role: None,
            is_active: true,
            preferences: NotificationPreferences::default(),
        }
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_preferences(mut self, preferences: NotificationPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Check that an address is well-formed and not a placeholder.
///
/// # Example
///
/// ```
/// use quorum_domain::recipient::validate_email;
///
/// assert!(validate_email("chair@board.org").is_ok());
/// assert!(validate_email("member@example.com").is_err());
/// assert!(validate_email("not-an-address").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let trimmed = email.trim();
    if !EMAIL_PATTERN.is_match(trimmed) {
        return Err(DomainError::InvalidEmail(trimmed.to_string()));
    }

    let lower = trimmed.to_lowercase();
    if PLACEHOLDER_EMAIL_MARKERS
        .iter()
        .any(|marker| lower.contains(marker))
    {
        return Err(DomainError::InvalidEmail(trimmed.to_string()));
    }

    Ok(())
}
