//! Statistics value objects - immutable results of a statistics computation.
//!
//! # Counts
//! - [`VoteTally`] - approve/reject/abstain counts
//!
//! # Rules
//! - [`QuorumStatus`] - participation against the minimum quorum
//! - [`OutcomeReason`] - why a vote passed or failed
//!
//! # Shape of the result
//! - [`Margin`] / [`MarginKind`] - distance between approve and reject
//! - [`Unanimity`] - whether every cast vote agreed
//! - [`ConsensusLevel`] - coarse agreement classification

use crate::vote::{VoteChoice, VoteRecord};
use serde::{Deserialize, Serialize};

/// Scale then divide to a percentage, 0 when the denominator is 0.
///
/// Scaling first keeps whole-number results exact (29 of 100 is `29.0`,
/// not `28.999...`), so `>=` comparisons against thresholds hold at the
/// boundary.
pub(crate) fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// Vote counts per choice.
///
/// `approve + reject + abstain == total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub approve: u32,
    pub reject: u32,
    pub abstain: u32,
    pub total: u32,
}

impl VoteTally {
    pub fn from_votes(votes: &[VoteRecord]) -> Self {
        votes.iter().fold(Self::default(), |mut tally, vote| {
            tally.record(vote.choice);
            tally
        })
    }

    pub fn record(&mut self, choice: VoteChoice) {
        match choice {
            VoteChoice::Approve => self.approve += 1,
            VoteChoice::Reject => self.reject += 1,
            VoteChoice::Abstain => self.abstain += 1,
        }
        self.total += 1;
    }

    /// Approve plus reject.
    pub fn decisive(&self) -> u32 {
        self.approve + self.reject
    }

    pub fn count(&self, choice: VoteChoice) -> u32 {
        match choice {
            VoteChoice::Approve => self.approve,
            VoteChoice::Reject => self.reject,
            VoteChoice::Abstain => self.abstain,
        }
    }

    /// Generate a visual vote summary (e.g., "[●●○·]")
    pub fn vote_summary(&self) -> String {
        let mut summary = String::from("[");
        summary.extend(std::iter::repeat_n('●', self.approve as usize));
        summary.extend(std::iter::repeat_n('○', self.reject as usize));
        summary.extend(std::iter::repeat_n('·', self.abstain as usize));
        summary.push(']');
        summary
    }
}

/// Participation measured against the minimum quorum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuorumStatus {
    pub met: bool,
    /// Votes counted toward quorum (excludes abstentions when configured so)
    pub counted_votes: u32,
    pub participation_rate: f64,
    pub minimum_quorum: f64,
    pub required_votes: u32,
    /// Additional counted votes needed; 0 once quorum is met
    pub votes_short: u32,
}

/// Direction of the approve/reject difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginKind {
    Victory,
    Defeat,
    Tie,
}

impl std::fmt::Display for MarginKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarginKind::Victory => write!(f, "victory"),
            MarginKind::Defeat => write!(f, "defeat"),
            MarginKind::Tie => write!(f, "tie"),
        }
    }
}

/// Distance between approve and reject votes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub absolute: u32,
    /// Share of decisive votes (approve + reject), abstentions excluded
    pub percentage: f64,
    pub kind: MarginKind,
}

impl Margin {
    pub fn from_tally(tally: &VoteTally) -> Self {
        let absolute = tally.approve.abs_diff(tally.reject);
        let kind = match tally.approve.cmp(&tally.reject) {
            std::cmp::Ordering::Greater => MarginKind::Victory,
            std::cmp::Ordering::Less => MarginKind::Defeat,
            std::cmp::Ordering::Equal => MarginKind::Tie,
        };

        Self {
            absolute,
            percentage: percentage(absolute, tally.decisive()),
            kind,
        }
    }
}

/// Whether every cast vote agreed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unanimity {
    pub is_unanimous: bool,
    pub unanimous_type: Option<VoteChoice>,
}

impl Unanimity {
    /// Unanimous when all cast votes approve, or all reject, and at least
    /// one vote was cast.
    pub fn from_tally(tally: &VoteTally) -> Self {
        let unanimous_type = if tally.total == 0 {
            None
        } else if tally.approve == tally.total {
            Some(VoteChoice::Approve)
        } else if tally.reject == tally.total {
            Some(VoteChoice::Reject)
        } else {
            None
        };

        Self {
            is_unanimous: unanimous_type.is_some(),
            unanimous_type,
        }
    }
}

/// Coarse agreement classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusLevel {
    High,
    Moderate,
    Low,
    Polarized,
}

impl ConsensusLevel {
    pub fn classify(unanimity: &Unanimity, margin: &Margin) -> Self {
        if unanimity.is_unanimous || margin.percentage >= 60.0 {
            ConsensusLevel::High
        } else if margin.percentage >= 30.0 {
            ConsensusLevel::Moderate
        } else if margin.percentage >= 10.0 {
            ConsensusLevel::Low
        } else {
            ConsensusLevel::Polarized
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsensusLevel::High => "high",
            ConsensusLevel::Moderate => "moderate",
            ConsensusLevel::Low => "low",
            ConsensusLevel::Polarized => "polarized",
        }
    }
}

impl std::fmt::Display for ConsensusLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a vote passed or failed.
///
/// Exactly one reason applies, chosen in priority order:
/// quorum failure, approval failure, unanimous approval, majority approval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutcomeReason {
    QuorumNotMet {
        participation_rate: f64,
        minimum_quorum: f64,
    },
    ApprovalThresholdNotMet {
        approval_percentage: f64,
        approval_threshold: f64,
    },
    UnanimousApproval,
    MajorityApproval {
        approval_percentage: f64,
        approval_threshold: f64,
    },
}

impl OutcomeReason {
    pub fn is_passing(&self) -> bool {
        matches!(
            self,
            OutcomeReason::UnanimousApproval | OutcomeReason::MajorityApproval { .. }
        )
    }
}

impl std::fmt::Display for OutcomeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutcomeReason::QuorumNotMet {
                participation_rate,
                minimum_quorum,
            } => write!(
                f,
                "Quorum not met: {:.1}% participation, {:.1}% required",
                participation_rate, minimum_quorum
            ),
            OutcomeReason::ApprovalThresholdNotMet {
                approval_percentage,
                approval_threshold,
            } => write!(
                f,
                "Approval threshold not met: {:.1}% approval, {:.1}% required",
                approval_percentage, approval_threshold
            ),
            OutcomeReason::UnanimousApproval => write!(f, "Unanimous approval"),
            OutcomeReason::MajorityApproval {
                approval_percentage,
                approval_threshold,
            } => write!(
                f,
                "Approved with {:.1}% approval ({:.1}% required)",
                approval_percentage, approval_threshold
            ),
        }
    }
}
