//! Domain layer for quorum-ballot
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Decision
//!
//! A resolution or minutes item voted on by a fixed pool of eligible members.
//! Its status moves one way: once it leaves `voting` it never returns.
//!
//! ## Statistics
//!
//! - **Quorum**: minimum participation for a vote to be valid
//! - **Approval threshold**: minimum share of approve votes among votes cast
//!
//! ## Completion
//!
//! Voting completes when everyone eligible has voted, the deadline passes,
//! or an administrator forces it.

pub mod completion;
pub mod core;
pub mod decision;
pub mod delivery;
pub mod recipient;
pub mod statistics;
pub mod summary;
pub mod vote;

// Re-export commonly used types
pub use completion::{CompletionReason, CompletionStatus};
pub use crate::core::error::DomainError;
pub use crate::core::output_format::OutputFormat;
pub use decision::{Decision, DecisionId, DecisionKind, DecisionStatus};
pub use delivery::{BulkDeliveryReport, DeliveryResult};
pub use recipient::{
    DigestFrequency, EmailRecipient, NotificationKind, NotificationPreferences, validate_email,
};
pub use statistics::{
    AdvancedStatistics, CommentAnalysis, ConsensusLevel, Margin, MarginKind, OutcomeReason,
    QuorumStatus, StatisticsEngine, Unanimity, VoteTally, VotingConfiguration,
};
pub use summary::{CommentExcerpt, OutcomeSummary, RenderedMessage};
pub use vote::{VoteChoice, VoteRecord, Voter};
