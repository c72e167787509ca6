//! Summary renderer port
//!
//! Turns a fully computed [`OutcomeSummary`] into a subject and bodies for
//! one recipient. Presentation only; no statistics are computed here.

use quorum_domain::{OutcomeSummary, RenderedMessage};
use thiserror::Error;

/// Errors that can occur while rendering a summary
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(String),

    #[error("Missing field: {0}")]
    MissingField(String),
}

/// Renders outcome summaries into messages
pub trait SummaryRenderer: Send + Sync {
    fn render(
        &self,
        summary: &OutcomeSummary,
        recipient_name: &str,
    ) -> Result<RenderedMessage, RenderError>;
}
