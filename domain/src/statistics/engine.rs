//! Statistics engine
//!
//! Turns a vote list and a [`VotingConfiguration`] into
//! [`AdvancedStatistics`]: tallies, quorum, margin, unanimity, comment
//! engagement and the pass/fail outcome.

use super::comments::CommentAnalysis;
use super::config::VotingConfiguration;
use super::value_objects::{
    ConsensusLevel, Margin, OutcomeReason, QuorumStatus, Unanimity, VoteTally, percentage,
};
use crate::vote::{VoteChoice, VoteRecord};
use serde::{Deserialize, Serialize};

/// Full statistics and outcome for one set of votes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedStatistics {
    pub tally: VoteTally,
    pub total_eligible_voters: u32,
    /// Voters in the eligible pool who have not voted
    pub remaining_voters: u32,
    pub participation_rate: f64,
    pub approval_percentage: f64,
    pub rejection_percentage: f64,
    pub abstention_percentage: f64,
    pub approval_threshold: f64,
    pub approval_met: bool,
    pub quorum: QuorumStatus,
    pub margin: Margin,
    pub unanimity: Unanimity,
    pub comments: CommentAnalysis,
    /// 0-100
    pub engagement_score: u8,
    pub consensus_level: ConsensusLevel,
    pub passed: bool,
    pub reason: OutcomeReason,
}

impl AdvancedStatistics {
    /// Human-readable reason string.
    pub fn reason_text(&self) -> String {
        self.reason.to_string()
    }
}

/// Pure vote statistics computation.
///
/// Stateless; safe to call repeatedly and from any thread.
///
/// # Example
///
/// ```
/// use quorum_domain::statistics::{StatisticsEngine, VotingConfiguration};
/// use quorum_domain::vote::{VoteChoice, VoteRecord, Voter};
///
/// let votes: Vec<VoteRecord> = (0..4)
///     .map(|i| VoteRecord::new("res-1", Voter::new(format!("u{i}"), "M", "m@board.org"), VoteChoice::Approve))
///     .collect();
/// let config = VotingConfiguration::new(6, 50.0, 75.0).unwrap();
///
/// let stats = StatisticsEngine::compute_outcome(&votes, &config);
/// assert!(stats.passed);
/// assert!(stats.unanimity.is_unanimous);
/// ```
pub struct StatisticsEngine;

impl StatisticsEngine {
    pub fn compute_outcome(votes: &[VoteRecord], config: &VotingConfiguration) -> AdvancedStatistics {
        let tally = VoteTally::from_votes(votes);
        let eligible = config.total_eligible_voters();

        let participation_rate = percentage(tally.total, eligible);
        let approval_percentage = percentage(tally.approve, tally.total);
        let quorum = Self::quorum_status(&tally, config);
        let approval_met = approval_percentage >= config.approval_threshold();

        let margin = Margin::from_tally(&tally);
        let unanimity = Unanimity::from_tally(&tally);
        let comments = CommentAnalysis::from_votes(votes);

        let passed = quorum.met && approval_met;
        let reason = Self::reason(&quorum, &unanimity, approval_percentage, config);

        AdvancedStatistics {
            tally,
            total_eligible_voters: eligible,
            remaining_voters: eligible.saturating_sub(tally.total),
            participation_rate,
            approval_percentage,
            rejection_percentage: percentage(tally.reject, tally.total),
            abstention_percentage: percentage(tally.abstain, tally.total),
            approval_threshold: config.approval_threshold(),
            approval_met,
            quorum,
            engagement_score: Self::engagement_score(
                participation_rate,
                comments.comment_participation_rate,
            ),
            consensus_level: ConsensusLevel::classify(&unanimity, &margin),
            margin,
            unanimity,
            comments,
            passed,
            reason,
        }
    }

    fn quorum_status(tally: &VoteTally, config: &VotingConfiguration) -> QuorumStatus {
        let counted_votes = if config.abstentions_count_toward_quorum() {
            tally.total
        } else {
            tally.decisive()
        };
        let participation_rate = percentage(counted_votes, config.total_eligible_voters());
        let met = participation_rate >= config.minimum_quorum();
        let required_votes = config.required_votes_for_quorum();

        QuorumStatus {
            met,
            counted_votes,
            participation_rate,
            minimum_quorum: config.minimum_quorum(),
            required_votes,
            votes_short: if met {
                0
            } else {
                required_votes.saturating_sub(counted_votes)
            },
        }
    }

    fn reason(
        quorum: &QuorumStatus,
        unanimity: &Unanimity,
        approval_percentage: f64,
        config: &VotingConfiguration,
    ) -> OutcomeReason {
        if !quorum.met {
            OutcomeReason::QuorumNotMet {
                participation_rate: quorum.participation_rate,
                minimum_quorum: quorum.minimum_quorum,
            }
        } else if approval_percentage < config.approval_threshold() {
            OutcomeReason::ApprovalThresholdNotMet {
                approval_percentage,
                approval_threshold: config.approval_threshold(),
            }
        } else if unanimity.unanimous_type == Some(VoteChoice::Approve) {
            OutcomeReason::UnanimousApproval
        } else {
            OutcomeReason::MajorityApproval {
                approval_percentage,
                approval_threshold: config.approval_threshold(),
            }
        }
    }

    /// `round(0.7 * participation + 0.3 * min(comment participation * 2, 100))`
    fn engagement_score(participation_rate: f64, comment_participation_rate: f64) -> u8 {
        let score = 0.7 * participation_rate.min(100.0)
            + 0.3 * (comment_participation_rate * 2.0).min(100.0);
        score.round().clamp(0.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vote::Voter;

    fn votes(approve: usize, reject: usize, abstain: usize) -> Vec<VoteRecord> {
        let choices = std::iter::repeat_n(VoteChoice::Approve, approve)
            .chain(std::iter::repeat_n(VoteChoice::Reject, reject))
            .chain(std::iter::repeat_n(VoteChoice::Abstain, abstain));
        choices
            .enumerate()
            .map(|(i, choice)| {
                let voter = Voter::new(format!("u{i}"), format!("Member {i}"), format!("m{i}@board.org"));
                VoteRecord::new("d-1", voter, choice)
            })
            .collect()
    }

    fn config(eligible: u32, quorum: f64, threshold: f64) -> VotingConfiguration {
        VotingConfiguration::new(eligible, quorum, threshold).unwrap()
    }

    #[test]
    fn test_tally_sums_to_total() {
        for (a, r, x) in [(0, 0, 0), (3, 1, 2), (0, 5, 0), (7, 7, 7), (1, 0, 9)] {
            let stats = StatisticsEngine::compute_outcome(&votes(a, r, x), &config(30, 50.0, 50.0));
            let t = stats.tally;
            assert_eq!(t.approve + t.reject + t.abstain, t.total);
            assert_eq!(t.total as usize, a + r + x);
        }
    }

    #[test]
    fn test_zero_eligible_has_zero_participation() {
        let stats = StatisticsEngine::compute_outcome(&votes(2, 1, 0), &config(0, 50.0, 50.0));
        assert_eq!(stats.participation_rate, 0.0);
        assert_eq!(stats.quorum.participation_rate, 0.0);
        assert!(!stats.participation_rate.is_nan());
        assert!(!stats.quorum.met);
    }

    #[test]
    fn test_no_votes_has_zero_approval() {
        let stats = StatisticsEngine::compute_outcome(&[], &config(10, 0.0, 50.0));
        assert_eq!(stats.approval_percentage, 0.0);
        assert_eq!(stats.margin.percentage, 0.0);
        assert!(!stats.passed);
        assert!(matches!(stats.reason, OutcomeReason::ApprovalThresholdNotMet { .. }));
    }

    #[test]
    fn test_quorum_boundary() {
        let cfg = config(10, 50.0, 0.0);

        let met = StatisticsEngine::compute_outcome(&votes(5, 0, 0), &cfg);
        assert!(met.quorum.met);
        assert_eq!(met.quorum.votes_short, 0);

        let short = StatisticsEngine::compute_outcome(&votes(4, 0, 0), &cfg);
        assert!(!short.quorum.met);
        assert_eq!(short.quorum.required_votes, 5);
        assert_eq!(short.quorum.votes_short, 1);
    }

    #[test]
    fn test_approval_boundary() {
        let cfg = config(4, 50.0, 75.0);

        let exact = StatisticsEngine::compute_outcome(&votes(3, 1, 0), &cfg);
        assert_eq!(exact.approval_percentage, 75.0);
        assert!(exact.approval_met);
        assert!(exact.passed);

        let half = StatisticsEngine::compute_outcome(&votes(2, 2, 0), &cfg);
        assert_eq!(half.approval_percentage, 50.0);
        assert!(!half.approval_met);
        assert!(!half.passed);
    }

    #[test]
    fn test_quorum_met_at_exact_percentage() {
        let stats = StatisticsEngine::compute_outcome(&votes(29, 0, 0), &config(100, 29.0, 0.0));
        assert_eq!(stats.quorum.participation_rate, 29.0);
        assert!(stats.quorum.met);
        assert_eq!(stats.quorum.required_votes, 29);
        assert_eq!(stats.quorum.votes_short, 0);

        let short = StatisticsEngine::compute_outcome(&votes(28, 0, 0), &config(100, 29.0, 0.0));
        assert!(!short.quorum.met);
        assert_eq!(short.quorum.votes_short, 1);
    }

    #[test]
    fn test_approval_met_at_exact_percentage() {
        let stats = StatisticsEngine::compute_outcome(&votes(29, 71, 0), &config(100, 50.0, 29.0));
        assert_eq!(stats.approval_percentage, 29.0);
        assert!(stats.approval_met);
        assert!(stats.passed);

        let below = StatisticsEngine::compute_outcome(&votes(28, 72, 0), &config(100, 50.0, 29.0));
        assert!(!below.approval_met);
        assert!(!below.passed);
    }

    #[test]
    fn test_unanimous_approval() {
        let stats = StatisticsEngine::compute_outcome(&votes(4, 0, 0), &config(4, 50.0, 75.0));
        assert!(stats.unanimity.is_unanimous);
        assert_eq!(stats.unanimity.unanimous_type, Some(VoteChoice::Approve));
        assert_eq!(stats.reason, OutcomeReason::UnanimousApproval);
        assert_eq!(stats.consensus_level, ConsensusLevel::High);
    }

    #[test]
    fn test_reason_priority_quorum_before_approval() {
        // Both quorum and approval fail; quorum wins.
        let stats = StatisticsEngine::compute_outcome(&votes(0, 2, 0), &config(10, 50.0, 75.0));
        assert!(matches!(stats.reason, OutcomeReason::QuorumNotMet { .. }));
        assert!(stats.reason_text().starts_with("Quorum not met"));
    }

    #[test]
    fn test_reason_majority_approval() {
        let stats = StatisticsEngine::compute_outcome(&votes(5, 1, 0), &config(10, 50.0, 75.0));
        assert!(stats.passed);
        assert!(matches!(stats.reason, OutcomeReason::MajorityApproval { .. }));
        assert!((stats.approval_percentage - 83.333).abs() < 0.01);
    }

    #[test]
    fn test_reason_is_deterministic() {
        let v = votes(3, 2, 1);
        let cfg = config(8, 50.0, 60.0);
        let first = StatisticsEngine::compute_outcome(&v, &cfg);
        let second = StatisticsEngine::compute_outcome(&v, &cfg);
        assert_eq!(first, second);
    }

    #[test]
    fn test_abstentions_excluded_from_quorum() {
        let cfg = config(10, 50.0, 50.0).with_abstentions_count_toward_quorum(false);
        let stats = StatisticsEngine::compute_outcome(&votes(3, 1, 2), &cfg);
        assert_eq!(stats.participation_rate, 60.0);
        assert_eq!(stats.quorum.counted_votes, 4);
        assert!(!stats.quorum.met);
        assert!(!stats.passed);
    }

    #[test]
    fn test_engagement_score() {
        // participation 60%, 3 of 6 votes commented → 50% → min(100, 100)
        let mut v = votes(5, 1, 0);
        for vote in v.iter_mut().take(3) {
            vote.comment = Some("noted".to_string());
        }
        let stats = StatisticsEngine::compute_outcome(&v, &config(10, 50.0, 75.0));
        assert_eq!(stats.engagement_score, 72); // 0.7*60 + 0.3*100
    }

    #[test]
    fn test_engagement_score_caps_participation() {
        // More votes than eligible (stale snapshot) must not exceed 100
        let stats = StatisticsEngine::compute_outcome(&votes(12, 0, 0), &config(10, 50.0, 50.0));
        assert!(stats.participation_rate > 100.0);
        assert_eq!(stats.engagement_score, 70);
    }

    #[test]
    fn test_remaining_voters() {
        let stats = StatisticsEngine::compute_outcome(&votes(2, 1, 0), &config(10, 50.0, 50.0));
        assert_eq!(stats.remaining_voters, 7);
    }

    #[test]
    fn test_polarized_vote() {
        let stats = StatisticsEngine::compute_outcome(&votes(5, 5, 0), &config(10, 50.0, 50.0));
        assert_eq!(stats.margin.kind, super::super::MarginKind::Tie);
        assert_eq!(stats.consensus_level, ConsensusLevel::Polarized);
        assert!(stats.passed);
    }
}
