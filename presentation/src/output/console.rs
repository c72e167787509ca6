//! Console output formatter for vote outcomes and delivery reports

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use quorum_application::{CompletionReport, SweepReport};
use quorum_domain::{AdvancedStatistics, BulkDeliveryReport, Decision, DecisionStatus};
use serde::Serialize;

/// Formats ballot results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the live statistics of a decision
    pub fn format_statistics(decision: &Decision, stats: &AdvancedStatistics) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Decision {}", decision.id)));
        output.push('\n');
        if !decision.title.is_empty() {
            output.push_str(&format!("{} {}\n", "Title:".cyan().bold(), decision.title));
        }
        output.push_str(&format!(
            "{} {} ({})\n",
            "Status:".cyan().bold(),
            Self::status(decision.status),
            decision.kind
        ));
        if let Some(deadline) = decision.voting_deadline {
            output.push_str(&format!(
                "{} {}\n",
                "Deadline:".cyan().bold(),
                deadline.format("%Y-%m-%d %H:%M UTC")
            ));
        }

        output.push_str(&Self::statistics_body(stats));
        output.push_str(&Self::footer());
        output
    }

    /// Format the result of a completion check or manual completion
    pub fn format_completion(report: &CompletionReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Decision {}", report.decision_id)));
        output.push('\n');

        let completion = &report.completion;
        output.push_str(&format!(
            "{} {} ({}/{} voted, {:.1}%)\n",
            "Completion:".cyan().bold(),
            if completion.is_complete {
                completion.reason.as_str().green()
            } else {
                completion.reason.as_str().yellow()
            },
            completion.vote_count,
            completion.eligible_count,
            completion.participation_rate
        ));

        match (report.transitioned, report.final_status) {
            (true, Some(status)) => output.push_str(&format!(
                "{} {} -> {}\n",
                "Status:".cyan().bold(),
                report.previous_status,
                Self::status(status)
            )),
            _ => output.push_str(&format!(
                "{} {} (unchanged)\n",
                "Status:".cyan().bold(),
                Self::status(report.previous_status)
            )),
        }

        if let Some(stats) = &report.statistics {
            output.push_str(&Self::statistics_body(stats));
        }

        if let Some(delivery) = &report.delivery {
            output.push_str(&Self::section_header("Notification"));
            output.push_str(&Self::delivery_body(delivery));
        }

        if let Some(error) = &report.notification_error {
            output.push_str(&format!(
                "\n{} {}\n",
                "Notification failed:".red().bold(),
                error
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format the outcome of a deadline sweep
    pub fn format_sweep(report: &SweepReport) -> String {
        let mut output = format!(
            "{} {} expired, {} completed, {} failed\n",
            "Deadline sweep:".cyan().bold(),
            report.checked,
            report.transitioned.len(),
            report.failed.len()
        );

        for id in &report.transitioned {
            output.push_str(&format!("  {} {}\n", "v".green(), id));
        }
        for (id, error) in &report.failed {
            output.push_str(&format!("  {} {}: {}\n", "x".red(), id, error));
        }

        output
    }

    /// Format a bulk delivery report on its own
    pub fn format_delivery(report: &BulkDeliveryReport) -> String {
        let mut output = Self::section_header("Notification");
        output.push_str(&Self::delivery_body(report));
        output
    }

    /// Format any serializable report as pretty JSON
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn statistics_body(stats: &AdvancedStatistics) -> String {
        let mut output = Self::section_header("Votes");

        output.push_str(&format!(
            "  {} ({} of {} eligible, {} remaining)\n",
            stats.tally.vote_summary(),
            stats.tally.total,
            stats.total_eligible_voters,
            stats.remaining_voters
        ));
        output.push_str(&format!(
            "  Approve {:.1}%  Reject {:.1}%  Abstain {:.1}%\n",
            stats.approval_percentage, stats.rejection_percentage, stats.abstention_percentage
        ));

        output.push_str(&Self::section_header("Outcome"));
        output.push_str(&format!(
            "  {} {:.1}% participation, {:.1}% required ({} of {} counted votes)\n",
            Self::check_mark(stats.quorum.met),
            stats.quorum.participation_rate,
            stats.quorum.minimum_quorum,
            stats.quorum.counted_votes,
            stats.quorum.required_votes
        ));
        output.push_str(&format!(
            "  {} {:.1}% approval, {:.1}% required\n",
            Self::check_mark(stats.approval_met),
            stats.approval_percentage,
            stats.approval_threshold
        ));
        output.push_str(&format!(
            "  Margin: {} by {} ({:.1}%), consensus {}\n",
            stats.margin.kind, stats.margin.absolute, stats.margin.percentage, stats.consensus_level
        ));
        if stats.unanimity.is_unanimous {
            output.push_str("  Unanimous\n");
        }
        output.push_str(&format!("  Engagement: {}/100\n", stats.engagement_score));

        if stats.comments.total_comments > 0 {
            output.push_str(&format!(
                "  Comments: {} ({:.1}% of voters){}\n",
                stats.comments.total_comments,
                stats.comments.comment_participation_rate,
                if stats.comments.has_concerns {
                    ", concerns raised".yellow().to_string()
                } else {
                    String::new()
                }
            ));
        }

        let verdict = if stats.passed {
            stats.reason_text().green().bold()
        } else {
            stats.reason_text().red().bold()
        };
        output.push_str(&format!("\n  {}\n", verdict));
        output
    }

    fn delivery_body(report: &BulkDeliveryReport) -> String {
        let mut output = format!(
            "  {} delivered, {} failed, {} skipped by preference\n",
            report.successful_deliveries.to_string().green(),
            report.failed_deliveries.to_string().red(),
            report.skipped_by_preference
        );
        output.push_str(&format!(
            "  {:.0} ms average, {} ms total\n",
            report.average_delivery_ms, report.total_duration_ms
        ));
        if report.cancelled {
            output.push_str(&format!("  {}\n", "Cancelled before all batches ran".yellow()));
        }
        for result in report.failed_results() {
            output.push_str(&format!(
                "  {} {} <{}> after {} attempt(s): {}\n",
                "x".red(),
                result.recipient_name,
                result.email,
                result.attempts,
                result.error.as_deref().unwrap_or("Unknown")
            ));
        }
        output
    }

    fn status(status: DecisionStatus) -> String {
        if !status.is_terminal() {
            status.as_str().yellow().to_string()
        } else if status.is_positive_outcome() {
            status.as_str().green().bold().to_string()
        } else {
            status.as_str().red().bold().to_string()
        }
    }

    fn check_mark(ok: bool) -> colored::ColoredString {
        if ok { "v".green() } else { "x".red() }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_completion(&self, report: &CompletionReport) -> String {
        Self::format_completion(report)
    }

    fn format_sweep(&self, report: &SweepReport) -> String {
        Self::format_sweep(report)
    }

    fn format_delivery(&self, report: &BulkDeliveryReport) -> String {
        Self::format_delivery(report)
    }
}
