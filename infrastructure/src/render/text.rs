//! Plain text and minimal HTML rendering of outcome summaries.

use quorum_application::ports::summary_renderer::{RenderError, SummaryRenderer};
use quorum_domain::{CommentExcerpt, CompletionReason, OutcomeSummary, RenderedMessage};
use std::fmt::Write;

/// Renders an [`OutcomeSummary`] without a template engine.
///
/// The subject carries the organization name and the headline; both bodies
/// hold the same content: outcome, results table and quoted comments.
pub struct PlainSummaryRenderer {
    organization: String,
}

impl PlainSummaryRenderer {
    pub fn new(organization: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
        }
    }

    fn subject(&self, summary: &OutcomeSummary) -> String {
        let title = display_title(summary);
        if self.organization.is_empty() {
            format!("{}: {}", summary.headline(), title)
        } else {
            format!("[{}] {}: {}", self.organization, summary.headline(), title)
        }
    }

    fn result_rows(summary: &OutcomeSummary) -> Vec<(String, String)> {
        let stats = &summary.statistics;
        let quorum = if stats.quorum.met {
            format!("met ({} of {} required)", stats.quorum.counted_votes, stats.quorum.required_votes)
        } else {
            format!(
                "not met ({} of {} required)",
                stats.quorum.counted_votes, stats.quorum.required_votes
            )
        };

        vec![
            (
                "Approve".to_string(),
                format!("{} ({:.1}%)", stats.tally.approve, stats.approval_percentage),
            ),
            (
                "Reject".to_string(),
                format!("{} ({:.1}%)", stats.tally.reject, stats.rejection_percentage),
            ),
            (
                "Abstain".to_string(),
                format!("{} ({:.1}%)", stats.tally.abstain, stats.abstention_percentage),
            ),
            (
                "Participation".to_string(),
                format!(
                    "{} of {} eligible ({:.1}%)",
                    stats.tally.total, stats.total_eligible_voters, stats.participation_rate
                ),
            ),
            ("Quorum".to_string(), quorum),
            (
                "Approval threshold".to_string(),
                format!("{:.1}%", stats.approval_threshold),
            ),
            ("Consensus".to_string(), stats.consensus_level.to_string()),
        ]
    }

    fn text_body(&self, summary: &OutcomeSummary, recipient_name: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Dear {},", recipient_name);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Voting on \"{}\" has closed ({}).",
            display_title(summary),
            reason_phrase(summary.completion_reason)
        );
        let _ = writeln!(out, "Outcome: {}", summary.final_status.as_str().to_uppercase());
        let _ = writeln!(out, "{}", summary.statistics.reason_text());
        let _ = writeln!(out);
        let _ = writeln!(out, "Results");
        for (label, value) in Self::result_rows(summary) {
            let _ = writeln!(out, "  {:<20} {}", format!("{}:", label), value);
        }

        write_text_comments(&mut out, "Comments", &summary.highlighted_comments);
        write_text_comments(&mut out, "Concerns raised", &summary.concerns);

        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Completed {}",
            summary.completed_at.format("%Y-%m-%d %H:%M UTC")
        );
        if !self.organization.is_empty() {
            let _ = writeln!(out, "{}", self.organization);
        }
        out
    }

    fn html_body(&self, summary: &OutcomeSummary, recipient_name: &str) -> String {
        let mut out = String::new();
        let _ = write!(out, "<p>Dear {},</p>", escape_html(recipient_name));
        let _ = write!(
            out,
            "<p>Voting on <strong>{}</strong> has closed ({}).</p>",
            escape_html(&display_title(summary)),
            reason_phrase(summary.completion_reason)
        );
        let _ = write!(
            out,
            "<h2>{}</h2><p>{}</p>",
            summary.final_status.as_str().to_uppercase(),
            escape_html(&summary.statistics.reason_text())
        );

        out.push_str("<table>");
        for (label, value) in Self::result_rows(summary) {
            let _ = write!(
                out,
                "<tr><th align=\"left\">{}</th><td>{}</td></tr>",
                label,
                escape_html(&value)
            );
        }
        out.push_str("</table>");

        write_html_comments(&mut out, "Comments", &summary.highlighted_comments);
        write_html_comments(&mut out, "Concerns raised", &summary.concerns);

        let _ = write!(
            out,
            "<p><small>Completed {}</small></p>",
            summary.completed_at.format("%Y-%m-%d %H:%M UTC")
        );
        out
    }
}

impl Default for PlainSummaryRenderer {
    fn default() -> Self {
        Self::new("")
    }
}

impl SummaryRenderer for PlainSummaryRenderer {
    fn render(
        &self,
        summary: &OutcomeSummary,
        recipient_name: &str,
    ) -> Result<RenderedMessage, RenderError> {
        if recipient_name.trim().is_empty() {
            return Err(RenderError::MissingField("recipient_name".to_string()));
        }

        Ok(RenderedMessage {
            subject: self.subject(summary),
            html_body: self.html_body(summary, recipient_name),
            text_body: self.text_body(summary, recipient_name),
        })
    }
}

fn display_title(summary: &OutcomeSummary) -> String {
    if summary.title.trim().is_empty() {
        summary.decision_id.to_string()
    } else {
        summary.title.clone()
    }
}

fn reason_phrase(reason: CompletionReason) -> &'static str {
    match reason {
        CompletionReason::AllVoted => "all eligible members have voted",
        CompletionReason::DeadlineExpired => "the voting deadline has passed",
        CompletionReason::ManualCompletion => "completed by an administrator",
        CompletionReason::NotComplete => "still open",
    }
}

fn attribution(comment: &CommentExcerpt) -> String {
    match &comment.voter_title {
        Some(title) => format!("{}, {}", comment.voter_name, title),
        None => comment.voter_name.clone(),
    }
}

fn write_text_comments(out: &mut String, heading: &str, comments: &[CommentExcerpt]) {
    if comments.is_empty() {
        return;
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", heading);
    for comment in comments {
        let _ = writeln!(
            out,
            "  - \"{}\" ({}, {})",
            comment.text,
            attribution(comment),
            comment.choice.as_str()
        );
    }
}

fn write_html_comments(out: &mut String, heading: &str, comments: &[CommentExcerpt]) {
    if comments.is_empty() {
        return;
    }
    let _ = write!(out, "<h3>{}</h3><ul>", heading);
    for comment in comments {
        let _ = write!(
            out,
            "<li>&ldquo;{}&rdquo; <em>({}, {})</em></li>",
            escape_html(&comment.text),
            escape_html(&attribution(comment)),
            comment.choice.as_str()
        );
    }
    out.push_str("</ul>");
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use quorum_domain::{
        Decision, DecisionKind, DecisionStatus, StatisticsEngine, VoteChoice, VoteRecord, Voter,
    };

    fn summary() -> OutcomeSummary {
        let decision = Decision::new("res-7", DecisionKind::Resolution, 4, 50.0, 75.0)
            .with_title("Budget <2027>");
        let votes = vec![
            VoteRecord::new("res-7", Voter::new("a", "Ada", "ada@board.org").with_title("Chair"), VoteChoice::Approve)
                .with_comment("Well prepared."),
            VoteRecord::new("res-7", Voter::new("b", "Ben", "ben@board.org"), VoteChoice::Approve),
            VoteRecord::new("res-7", Voter::new("c", "Cy", "cy@board.org"), VoteChoice::Approve),
            VoteRecord::new("res-7", Voter::new("d", "Di", "di@board.org"), VoteChoice::Reject)
                .with_comment("Too expensive"),
        ];
        let stats = StatisticsEngine::compute_outcome(&votes, &decision.voting_configuration().unwrap());
        OutcomeSummary::build(
            &decision,
            DecisionStatus::Approved,
            CompletionReason::AllVoted,
            Utc::now(),
            stats,
            &votes,
        )
    }

    #[test]
    fn test_subject_includes_organization_and_headline() {
        let renderer = PlainSummaryRenderer::new("Harbor Board");
        let message = renderer.render(&summary(), "Ada").unwrap();
        assert_eq!(
            message.subject,
            "[Harbor Board] Resolution approved: Budget <2027>"
        );
    }

    #[test]
    fn test_text_body_contents() {
        let message = PlainSummaryRenderer::default().render(&summary(), "Ada").unwrap();
        let text = &message.text_body;
        assert!(text.starts_with("Dear Ada,"));
        assert!(text.contains("all eligible members have voted"));
        assert!(text.contains("Outcome: APPROVED"));
        assert!(text.contains("3 (75.0%)"));
        assert!(text.contains("\"Well prepared.\" (Ada, Chair, approve)"));
        assert!(text.contains("Concerns raised"));
        assert!(text.contains("\"Too expensive\" (Di, reject)"));
    }

    #[test]
    fn test_html_body_is_escaped() {
        let message = PlainSummaryRenderer::default().render(&summary(), "Ada").unwrap();
        assert!(message.html_body.contains("Budget &lt;2027&gt;"));
        assert!(!message.html_body.contains("<2027>"));
    }

    #[test]
    fn test_missing_recipient_name() {
        let err = PlainSummaryRenderer::default().render(&summary(), "  ").unwrap_err();
        assert!(matches!(err, RenderError::MissingField(_)));
    }
}
