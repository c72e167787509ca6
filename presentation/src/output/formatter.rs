//! Output formatter trait

use quorum_application::{CompletionReport, SweepReport};
use quorum_domain::BulkDeliveryReport;

/// Trait for formatting ballot results
pub trait OutputFormatter {
    /// Format a completion check result
    fn format_completion(&self, report: &CompletionReport) -> String;

    /// Format a deadline sweep result
    fn format_sweep(&self, report: &SweepReport) -> String;

    /// Format a bulk delivery report
    fn format_delivery(&self, report: &BulkDeliveryReport) -> String;
}
