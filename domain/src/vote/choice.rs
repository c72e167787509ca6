//! Vote values and legacy synonym resolution

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A member's vote on a decision.
///
/// Raw values are normalized exactly once, through [`VOTE_SYNONYMS`], when
/// they are parsed. Everything downstream matches on the enum.
///
/// # Example
///
/// ```
/// use quorum_domain::vote::VoteChoice;
///
/// assert_eq!("for".parse::<VoteChoice>().unwrap(), VoteChoice::Approve);
/// assert_eq!("AGAINST".parse::<VoteChoice>().unwrap(), VoteChoice::Reject);
/// assert!("maybe".parse::<VoteChoice>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum VoteChoice {
    Approve,
    Reject,
    Abstain,
}

/// Accepted raw vote values, including the legacy `for`/`against` pair.
pub const VOTE_SYNONYMS: &[(&str, VoteChoice)] = &[
    ("approve", VoteChoice::Approve),
    ("reject", VoteChoice::Reject),
    ("abstain", VoteChoice::Abstain),
    ("for", VoteChoice::Approve),
    ("against", VoteChoice::Reject),
];

impl VoteChoice {
    pub const ALL: [VoteChoice; 3] = [VoteChoice::Approve, VoteChoice::Reject, VoteChoice::Abstain];

    pub fn as_str(&self) -> &'static str {
        match self {
            VoteChoice::Approve => "approve",
            VoteChoice::Reject => "reject",
            VoteChoice::Abstain => "abstain",
        }
    }

    /// Approve and reject are decisive; abstain is not.
    pub fn is_decisive(&self) -> bool {
        !matches!(self, VoteChoice::Abstain)
    }
}

impl std::fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VoteChoice {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        VOTE_SYNONYMS
            .iter()
            .find(|(raw, _)| *raw == normalized)
            .map(|(_, choice)| *choice)
            .ok_or(DomainError::UnknownVoteValue(normalized))
    }
}

impl TryFrom<String> for VoteChoice {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
