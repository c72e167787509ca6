//! Vote statistics domain
//!
//! Pure computation over a vote list: the [`StatisticsEngine`] produces
//! [`AdvancedStatistics`] from votes and a [`VotingConfiguration`].
//!
//! # Pass rule
//!
//! ```text
//! passed = participation_rate >= minimum_quorum
//!       && approval_percentage >= approval_threshold
//! ```
//!
//! Every percentage divides through a zero-guard, so an empty vote list or
//! an empty eligible pool yields 0 rather than NaN.

pub mod comments;
pub mod config;
pub mod engine;
pub mod value_objects;

pub use comments::{CONCERN_KEYWORDS, CommentAnalysis, CommentBreakdown, mentions_concern};
pub use config::VotingConfiguration;
pub use engine::{AdvancedStatistics, StatisticsEngine};
pub use value_objects::{
    ConsensusLevel, Margin, MarginKind, OutcomeReason, QuorumStatus, Unanimity, VoteTally,
};
