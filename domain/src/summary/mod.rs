//! Outcome summary handed to the renderer
//!
//! The summary carries fully computed statistics; rendering never computes
//! anything beyond presentation.

use crate::completion::CompletionReason;
use crate::decision::{Decision, DecisionId, DecisionKind, DecisionStatus};
use crate::statistics::{AdvancedStatistics, mentions_concern};
use crate::vote::{VoteChoice, VoteRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound on comments quoted in a summary.
pub const MAX_HIGHLIGHTED_COMMENTS: usize = 5;

/// A quoted vote comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentExcerpt {
    pub voter_name: String,
    pub voter_title: Option<String>,
    pub choice: VoteChoice,
    pub text: String,
}

impl CommentExcerpt {
    fn from_vote(vote: &VoteRecord) -> Option<Self> {
        vote.comment_text().map(|text| Self {
            voter_name: vote.voter.name.clone(),
            voter_title: vote.voter.title.clone(),
            choice: vote.choice,
            text: text.to_string(),
        })
    }

    /// Reject comments and comments that mention a concern keyword.
    pub fn is_concern(&self) -> bool {
        self.choice == VoteChoice::Reject || mentions_concern(&self.text)
    }
}

/// Everything a notification template needs about a completed decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeSummary {
    pub decision_id: DecisionId,
    pub title: String,
    pub kind: DecisionKind,
    pub final_status: DecisionStatus,
    pub completion_reason: CompletionReason,
    pub completed_at: DateTime<Utc>,
    pub statistics: AdvancedStatistics,
    pub highlighted_comments: Vec<CommentExcerpt>,
    pub concerns: Vec<CommentExcerpt>,
}

impl OutcomeSummary {
    pub fn build(
        decision: &Decision,
        final_status: DecisionStatus,
        completion_reason: CompletionReason,
        completed_at: DateTime<Utc>,
        statistics: AdvancedStatistics,
        votes: &[VoteRecord],
    ) -> Self {
        let mut ordered: Vec<&VoteRecord> = votes.iter().collect();
        ordered.sort_by_key(|v| v.cast_at);

        let excerpts: Vec<CommentExcerpt> = ordered
            .into_iter()
            .filter_map(CommentExcerpt::from_vote)
            .collect();

        let concerns: Vec<CommentExcerpt> = excerpts
            .iter()
            .filter(|c| c.is_concern())
            .take(MAX_HIGHLIGHTED_COMMENTS)
            .cloned()
            .collect();

        let mut highlighted_comments = excerpts;
        highlighted_comments.truncate(MAX_HIGHLIGHTED_COMMENTS);

        Self {
            decision_id: decision.id.clone(),
            title: decision.title.clone(),
            kind: decision.kind,
            final_status,
            completion_reason,
            completed_at,
            statistics,
            highlighted_comments,
            concerns,
        }
    }

    /// Short label used in subjects and logs, e.g. "Resolution approved".
    pub fn headline(&self) -> String {
        let kind = match self.kind {
            DecisionKind::Resolution => "Resolution",
            DecisionKind::Minutes => "Minutes",
        };
        format!("{} {}", kind, self.final_status)
    }
}

/// Output of the template renderer for one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedMessage {
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}
