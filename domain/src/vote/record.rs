//! Vote records

use super::choice::VoteChoice;
use crate::decision::DecisionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of the member who cast a vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub title: Option<String>,
}

impl Voter {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// One member's vote on one decision.
///
/// There is at most one record per (decision, voter) pair; re-voting
/// replaces the earlier record.
///
/// # Example
///
/// ```
/// use quorum_domain::vote::{VoteChoice, VoteRecord, Voter};
///
/// let vote = VoteRecord::new("res-1", Voter::new("u1", "Ada", "ada@board.org"), VoteChoice::Approve)
///     .with_comment("Well prepared.");
/// assert!(vote.has_comment());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub decision_id: DecisionId,
    pub voter: Voter,
    pub choice: VoteChoice,
    #[serde(default)]
    pub comment: Option<String>,
    pub cast_at: DateTime<Utc>,
}

impl VoteRecord {
    pub fn new(decision_id: impl Into<DecisionId>, voter: Voter, choice: VoteChoice) -> Self {
        Self {
            decision_id: decision_id.into(),
            voter,
            choice,
            comment: None,
            cast_at: Utc::now(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn cast_at(mut self, at: DateTime<Utc>) -> Self {
        self.cast_at = at;
        self
    }

    /// The comment trimmed, or `None` when absent or blank.
    pub fn comment_text(&self) -> Option<&str> {
        self.comment
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    pub fn has_comment(&self) -> bool {
        self.comment_text().is_some()
    }
}
