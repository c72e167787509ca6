//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod bulk_delivery;
pub mod check_completion;
pub mod deadline_scheduler;
pub mod notify_outcome;
pub(crate) mod shared;

#[cfg(test)]
pub(crate) mod test_support;
