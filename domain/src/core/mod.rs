//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`output_format::OutputFormat`]: how reports are rendered for humans or machines

pub mod error;
pub mod output_format;
