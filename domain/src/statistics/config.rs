//! Voting configuration used by the statistics engine

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Snapshot of the rules a vote is evaluated against.
///
/// Built per statistics call from the decision being evaluated. Construction
/// validates the percentages, so a `VotingConfiguration` in hand is always
/// usable by [`StatisticsEngine`](super::StatisticsEngine).
///
/// # Example
///
/// ```
/// use quorum_domain::statistics::VotingConfiguration;
///
/// let config = VotingConfiguration::new(10, 50.0, 75.0).unwrap();
/// assert_eq!(config.required_votes_for_quorum(), 5);
///
/// assert!(VotingConfiguration::new(10, -5.0, 75.0).is_err());
/// assert!(VotingConfiguration::new(10, 50.0, 120.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VotingConfiguration {
    total_eligible_voters: u32,
    minimum_quorum: f64,
    approval_threshold: f64,
    abstentions_count_toward_quorum: bool,
}

impl VotingConfiguration {
    /// Create a configuration; abstentions count toward quorum by default.
    pub fn new(
        total_eligible_voters: u32,
        minimum_quorum: f64,
        approval_threshold: f64,
    ) -> Result<Self, DomainError> {
        validate_percentage("minimum quorum", minimum_quorum)?;
        validate_percentage("approval threshold", approval_threshold)?;

        Ok(Self {
            total_eligible_voters,
            minimum_quorum,
            approval_threshold,
            abstentions_count_toward_quorum: true,
        })
    }

    pub fn with_abstentions_count_toward_quorum(mut self, counts: bool) -> Self {
        self.abstentions_count_toward_quorum = counts;
        self
    }

    pub fn total_eligible_voters(&self) -> u32 {
        self.total_eligible_voters
    }

    pub fn minimum_quorum(&self) -> f64 {
        self.minimum_quorum
    }

    pub fn approval_threshold(&self) -> f64 {
        self.approval_threshold
    }

    pub fn abstentions_count_toward_quorum(&self) -> bool {
        self.abstentions_count_toward_quorum
    }

    /// Smallest number of counted votes that reaches quorum.
    pub fn required_votes_for_quorum(&self) -> u32 {
        (self.total_eligible_voters as f64 * self.minimum_quorum / 100.0).ceil() as u32
    }

    /// Get a human-readable description of these rules
    pub fn description(&self) -> String {
        format!(
            "quorum {}% of {} eligible, approval at least {}%",
            self.minimum_quorum, self.total_eligible_voters, self.approval_threshold
        )
    }
}

impl std::fmt::Display for VotingConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

fn validate_percentage(name: &str, value: f64) -> Result<(), DomainError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(DomainError::InvalidConfiguration(format!(
            "{} must be within 0-100, got {}",
            name, value
        )));
    }
    Ok(())
}
