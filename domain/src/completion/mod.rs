//! Voting completion classification
//!
//! [`CompletionStatus`] is produced fresh on every check and never persisted;
//! the decision's status field is the durable record of completion.

use crate::decision::Decision;
use crate::statistics::value_objects::percentage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why voting is (or is not) considered complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    AllVoted,
    DeadlineExpired,
    ManualCompletion,
    NotComplete,
}

impl CompletionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionReason::AllVoted => "all_voted",
            CompletionReason::DeadlineExpired => "deadline_expired",
            CompletionReason::ManualCompletion => "manual_completion",
            CompletionReason::NotComplete => "not_complete",
        }
    }
}

impl std::fmt::Display for CompletionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one completion check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionStatus {
    pub is_complete: bool,
    pub reason: CompletionReason,
    pub vote_count: u32,
    pub eligible_count: u32,
    pub participation_rate: f64,
    pub deadline_expired: bool,
}

impl CompletionStatus {
    /// Classify a decision that is in `voting`.
    ///
    /// `all_voted` takes precedence over `deadline_expired`; a decision with
    /// no eligible voters can only complete through its deadline.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::Utc;
    /// use quorum_domain::completion::{CompletionReason, CompletionStatus};
    /// use quorum_domain::decision::{Decision, DecisionKind};
    ///
    /// let decision = Decision::new("res-1", DecisionKind::Resolution, 3, 50.0, 75.0);
    /// let status = CompletionStatus::classify(&decision, 3, Utc::now());
    /// assert!(status.is_complete);
    /// assert_eq!(status.reason, CompletionReason::AllVoted);
    /// ```
    pub fn classify(decision: &Decision, vote_count: u32, now: DateTime<Utc>) -> Self {
        let eligible_count = decision.total_eligible_voters;
        let deadline_expired = decision.deadline_expired(now);

        let reason = if eligible_count > 0 && vote_count >= eligible_count {
            CompletionReason::AllVoted
        } else if deadline_expired {
            CompletionReason::DeadlineExpired
        } else {
            CompletionReason::NotComplete
        };

        Self::with_reason(decision, vote_count, deadline_expired, reason)
    }

    /// Completion forced by an administrator, regardless of votes or deadline.
    pub fn manual(decision: &Decision, vote_count: u32, now: DateTime<Utc>) -> Self {
        Self::with_reason(
            decision,
            vote_count,
            decision.deadline_expired(now),
            CompletionReason::ManualCompletion,
        )
    }

    /// A decision the detector does not act on (already terminal, draft, ...).
    pub fn not_voting(decision: &Decision, vote_count: u32, now: DateTime<Utc>) -> Self {
        Self::with_reason(
            decision,
            vote_count,
            decision.deadline_expired(now),
            CompletionReason::NotComplete,
        )
    }

    fn with_reason(
        decision: &Decision,
        vote_count: u32,
        deadline_expired: bool,
        reason: CompletionReason,
    ) -> Self {
        Self {
            is_complete: reason != CompletionReason::NotComplete,
            reason,
            vote_count,
            eligible_count: decision.total_eligible_voters,
            participation_rate: percentage(vote_count, decision.total_eligible_voters),
            deadline_expired,
        }
    }
}
