//! Decision entities and status lifecycle

use crate::core::error::DomainError;
use crate::statistics::VotingConfiguration;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a decision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionId(String);

impl DecisionId {
    /// Creates a DecisionId from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for DecisionId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for DecisionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of votable item.
///
/// The kind decides which terminal status pair a completed vote lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    #[default]
    Resolution,
    Minutes,
}

impl DecisionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionKind::Resolution => "resolution",
            DecisionKind::Minutes => "minutes",
        }
    }
}

impl std::fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DecisionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "resolution" => Ok(DecisionKind::Resolution),
            "minutes" => Ok(DecisionKind::Minutes),
            other => Err(DomainError::UnknownKind(other.to_string())),
        }
    }
}

/// Lifecycle status of a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    Draft,
    Published,
    Voting,
    Approved,
    Rejected,
    Passed,
    Failed,
    Cancelled,
}

impl DecisionStatus {
    /// Terminal status for a completed vote of the given kind.
    pub fn terminal_for(kind: DecisionKind, passed: bool) -> Self {
        match (kind, passed) {
            (DecisionKind::Resolution, true) => DecisionStatus::Approved,
            (DecisionKind::Resolution, false) => DecisionStatus::Rejected,
            (DecisionKind::Minutes, true) => DecisionStatus::Passed,
            (DecisionKind::Minutes, false) => DecisionStatus::Failed,
        }
    }

    /// Whether this status ends the voting lifecycle.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DecisionStatus::Approved
                | DecisionStatus::Rejected
                | DecisionStatus::Passed
                | DecisionStatus::Failed
                | DecisionStatus::Cancelled
        )
    }

    /// Whether this terminal status represents a positive outcome.
    pub fn is_positive_outcome(&self) -> bool {
        matches!(self, DecisionStatus::Approved | DecisionStatus::Passed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionStatus::Draft => "draft",
            DecisionStatus::Published => "published",
            DecisionStatus::Voting => "voting",
            DecisionStatus::Approved => "approved",
            DecisionStatus::Rejected => "rejected",
            DecisionStatus::Passed => "passed",
            DecisionStatus::Failed => "failed",
            DecisionStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DecisionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(DecisionStatus::Draft),
            "published" => Ok(DecisionStatus::Published),
            "voting" => Ok(DecisionStatus::Voting),
            "approved" => Ok(DecisionStatus::Approved),
            "rejected" => Ok(DecisionStatus::Rejected),
            "passed" => Ok(DecisionStatus::Passed),
            "failed" => Ok(DecisionStatus::Failed),
            "cancelled" | "canceled" => Ok(DecisionStatus::Cancelled),
            other => Err(DomainError::UnknownStatus(other.to_string())),
        }
    }
}

/// A votable item as read from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub id: DecisionId,
    #[serde(default)]
    pub kind: DecisionKind,
    #[serde(default)]
    pub title: String,
    pub status: DecisionStatus,
    #[serde(default)]
    pub voting_deadline: Option<DateTime<Utc>>,
    /// Snapshot of the eligible pool taken when the decision was published
    pub total_eligible_voters: u32,
    pub minimum_quorum: f64,
    pub approval_threshold: f64,
    #[serde(default = "default_abstentions_count")]
    pub abstentions_count_toward_quorum: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

fn default_abstentions_count() -> bool {
    true
}

impl Decision {
    /// Create a decision in `voting` status with no deadline.
    pub fn new(
        id: impl Into<DecisionId>,
        kind: DecisionKind,
        total_eligible_voters: u32,
        minimum_quorum: f64,
        approval_threshold: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: String::new(),
            status: DecisionStatus::Voting,
            voting_deadline: None,
            total_eligible_voters,
            minimum_quorum,
            approval_threshold,
            abstentions_count_toward_quorum: true,
            completed_at: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.voting_deadline = Some(deadline);
        self
    }

    pub fn with_status(mut self, status: DecisionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_abstentions_count_toward_quorum(mut self, counts: bool) -> Self {
        self.abstentions_count_toward_quorum = counts;
        self
    }

    pub fn is_voting(&self) -> bool {
        self.status == DecisionStatus::Voting
    }

    /// Whether the deadline is set and `now` is at or past it.
    pub fn deadline_expired(&self, now: DateTime<Utc>) -> bool {
        self.voting_deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Build the validated configuration snapshot for the statistics engine.
    ///
    /// Quorum and threshold always come from the decision itself.
    pub fn voting_configuration(&self) -> Result<VotingConfiguration, DomainError> {
        VotingConfiguration::new(
            self.total_eligible_voters,
            self.minimum_quorum,
            self.approval_threshold,
        )
        .map(|config| config.with_abstentions_count_toward_quorum(self.abstentions_count_toward_quorum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_terminal_for_kind() {
        assert_eq!(
            DecisionStatus::terminal_for(DecisionKind::Resolution, true),
            DecisionStatus::Approved
        );
        assert_eq!(
            DecisionStatus::terminal_for(DecisionKind::Resolution, false),
            DecisionStatus::Rejected
        );
        assert_eq!(
            DecisionStatus::terminal_for(DecisionKind::Minutes, true),
            DecisionStatus::Passed
        );
        assert_eq!(
            DecisionStatus::terminal_for(DecisionKind::Minutes, false),
            DecisionStatus::Failed
        );
    }

    #[test]
    fn test_voting_is_not_terminal() {
        assert!(!DecisionStatus::Voting.is_terminal());
        assert!(!DecisionStatus::Draft.is_terminal());
        assert!(DecisionStatus::Cancelled.is_terminal());
        assert!(DecisionStatus::Passed.is_terminal());
    }

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!("voting".parse::<DecisionStatus>().ok(), Some(DecisionStatus::Voting));
        assert_eq!("Canceled".parse::<DecisionStatus>().ok(), Some(DecisionStatus::Cancelled));
        assert!("closed".parse::<DecisionStatus>().is_err());
        assert_eq!(DecisionStatus::Approved.to_string(), "approved");
    }

    #[test]
    fn test_deadline_expired() {
        let now = Utc::now();
        let decision = Decision::new("d-1", DecisionKind::Minutes, 10, 50.0, 75.0);
        assert!(!decision.deadline_expired(now));

        let past = decision.clone().with_deadline(now - Duration::hours(1));
        assert!(past.deadline_expired(now));

        let exact = decision.clone().with_deadline(now);
        assert!(exact.deadline_expired(now));

        let future = decision.with_deadline(now + Duration::hours(1));
        assert!(!future.deadline_expired(now));
    }

    #[test]
    fn test_voting_configuration_reads_decision_threshold() {
        let decision = Decision::new("d-2", DecisionKind::Minutes, 8, 40.0, 66.0)
            .with_abstentions_count_toward_quorum(false);
        let config = decision.voting_configuration().unwrap();
        assert_eq!(config.total_eligible_voters(), 8);
        assert_eq!(config.minimum_quorum(), 40.0);
        assert_eq!(config.approval_threshold(), 66.0);
        assert!(!config.abstentions_count_toward_quorum());
    }

    #[test]
    fn test_voting_configuration_rejects_negative_threshold() {
        let decision = Decision::new("d-3", DecisionKind::Resolution, 8, 50.0, -1.0);
        assert!(decision.voting_configuration().unwrap_err().is_configuration());
    }

    #[test]
    fn test_decision_deserialize_defaults() {
        let json = r#"{
            "id": "res-7",
            "status": "voting",
            "total_eligible_voters": 5,
            "minimum_quorum": 50.0,
            "approval_threshold": 75.0
        }"#;
        let decision: Decision = serde_json::from_str(json).unwrap();
        assert_eq!(decision.id.as_str(), "res-7");
        assert_eq!(decision.kind, DecisionKind::Resolution);
        assert!(decision.abstentions_count_toward_quorum);
        assert!(decision.voting_deadline.is_none());
    }
}
