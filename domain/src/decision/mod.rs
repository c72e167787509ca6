//! Decision domain
//!
//! A [`Decision`] is a votable item: either a resolution or a minutes record.
//! Its [`DecisionStatus`] is the durable record of completion.
//!
//! ```text
//! draft ─▶ published ─▶ voting ─┬─▶ approved | rejected   (resolution)
//!                               └─▶ passed   | failed     (minutes)
//! ```
//!
//! `voting` is the only state the completion detector acts on, and a
//! decision that has left `voting` never returns to it.

pub mod entities;

pub use entities::{Decision, DecisionId, DecisionKind, DecisionStatus};
