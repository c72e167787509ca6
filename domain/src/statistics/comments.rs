//! Comment engagement analysis

use super::value_objects::percentage;
use crate::vote::{VoteChoice, VoteRecord};
use serde::{Deserialize, Serialize};

/// Lowercase keywords that flag a comment as raising a concern.
pub const CONCERN_KEYWORDS: &[&str] = &[
    "concern", "worried", "issue", "problem", "disagree", "oppose", "against", "risk",
];

/// Comment counts per vote choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentBreakdown {
    pub approve: u32,
    pub reject: u32,
    pub abstain: u32,
}

/// Engagement metrics over the free-text comments attached to votes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentAnalysis {
    pub total_comments: u32,
    pub by_choice: CommentBreakdown,
    /// Mean length in characters of the non-empty comments
    pub average_length: f64,
    /// Share of cast votes that carry a comment
    pub comment_participation_rate: f64,
    pub has_concerns: bool,
}

impl CommentAnalysis {
    pub fn from_votes(votes: &[VoteRecord]) -> Self {
        let mut by_choice = CommentBreakdown::default();
        let mut total_length = 0usize;
        let mut keyword_hit = false;

        for (choice, text) in votes
            .iter()
            .filter_map(|v| v.comment_text().map(|text| (v.choice, text)))
        {
            match choice {
                VoteChoice::Approve => by_choice.approve += 1,
                VoteChoice::Reject => by_choice.reject += 1,
                VoteChoice::Abstain => by_choice.abstain += 1,
            }
            total_length += text.chars().count();
            keyword_hit = keyword_hit || mentions_concern(text);
        }

        let total_comments = by_choice.approve + by_choice.reject + by_choice.abstain;
        let average_length = if total_comments == 0 {
            0.0
        } else {
            total_length as f64 / total_comments as f64
        };

        Self {
            total_comments,
            by_choice,
            average_length,
            comment_participation_rate: percentage(total_comments, votes.len() as u32),
            has_concerns: by_choice.reject > 0 || keyword_hit,
        }
    }
}

/// Case-insensitive substring match against [`CONCERN_KEYWORDS`].
pub fn mentions_concern(text: &str) -> bool {
    let lower = text.to_lowercase();
    CONCERN_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}
