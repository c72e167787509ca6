//! Vote types
//!
//! This module defines the voting primitives: the normalized [`VoteChoice`]
//! and the per-member [`VoteRecord`].

pub mod choice;
pub mod record;

pub use choice::{VOTE_SYNONYMS, VoteChoice};
pub use record::{VoteRecord, Voter};
