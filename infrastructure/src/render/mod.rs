//! Summary renderer adapters

mod text;

pub use text::PlainSummaryRenderer;
