//! Check Completion use case
//!
//! Decides whether voting on a decision is over, computes the final outcome
//! and moves the decision to its terminal status. The status write is a
//! compare-and-swap on `voting`, so when several callers race on the same
//! decision exactly one of them wins, and only the winner sends the outcome
//! notification.

use crate::ports::audit_logger::{AuditEvent, AuditLogger, NoAuditLogger};
use crate::ports::decision_store::{DecisionStore, StoreError};
use crate::use_cases::notify_outcome::{NoOutcomeNotifier, OutcomeNotifier};
use chrono::{DateTime, Utc};
use quorum_domain::{
    AdvancedStatistics, BulkDeliveryReport, CompletionStatus, Decision, DecisionId,
    DecisionStatus, DomainError, OutcomeSummary, StatisticsEngine, VoteRecord,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while checking completion
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid voting configuration: {0}")]
    Configuration(#[from] DomainError),
}

/// Result of one completion check
#[derive(Debug, Clone, Serialize)]
pub struct CompletionReport {
    pub decision_id: DecisionId,
    pub completion: CompletionStatus,
    /// Status read from the store before the check
    pub previous_status: DecisionStatus,
    /// True only for the caller whose status write succeeded
    pub transitioned: bool,
    /// Terminal status written, when `transitioned`
    pub final_status: Option<DecisionStatus>,
    /// Outcome statistics, present whenever voting was judged complete
    pub statistics: Option<AdvancedStatistics>,
    pub delivery: Option<BulkDeliveryReport>,
    /// Set when the transition succeeded but the notification could not run
    pub notification_error: Option<String>,
}

impl CompletionReport {
    fn unchanged(decision: &Decision, completion: CompletionStatus) -> Self {
        Self {
            decision_id: decision.id.clone(),
            completion,
            previous_status: decision.status,
            transitioned: false,
            final_status: None,
            statistics: None,
            delivery: None,
            notification_error: None,
        }
    }
}

/// Outcome of a deadline sweep
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepReport {
    /// Expired decisions found in `voting`
    pub checked: usize,
    /// Decisions this sweep moved to a terminal status
    pub transitioned: Vec<DecisionId>,
    /// Decisions whose check failed, with the error message
    pub failed: Vec<(DecisionId, String)>,
}

/// Use case for detecting and finalizing completed votes
pub struct CompletionDetector {
    store: Arc<dyn DecisionStore>,
    notifier: Arc<dyn OutcomeNotifier>,
    audit: Arc<dyn AuditLogger>,
}

impl CompletionDetector {
    pub fn new(store: Arc<dyn DecisionStore>) -> Self {
        Self {
            store,
            notifier: Arc::new(NoOutcomeNotifier),
            audit: Arc::new(NoAuditLogger),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn OutcomeNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_audit_logger(mut self, audit: Arc<dyn AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    /// Check one decision and finalize it if voting is over.
    ///
    /// Decisions that are not in `voting` are reported as not complete and
    /// left untouched, which makes repeated calls harmless.
    pub async fn check_completion(
        &self,
        id: &DecisionId,
    ) -> Result<CompletionReport, CompletionError> {
        let decision = self.store.get_decision(id).await?;
        let votes = self.store.get_votes(id).await?;
        let now = Utc::now();
        let vote_count = votes.len() as u32;

        if !decision.is_voting() {
            debug!("{} is {}, nothing to check", id, decision.status);
            let status = CompletionStatus::not_voting(&decision, vote_count, now);
            return Ok(CompletionReport::unchanged(&decision, status));
        }

        let status = CompletionStatus::classify(&decision, vote_count, now);
        if !status.is_complete {
            debug!(
                "{} still voting: {}/{} votes",
                id, status.vote_count, status.eligible_count
            );
            return Ok(CompletionReport::unchanged(&decision, status));
        }

        self.finalize(decision, votes, status, now).await
    }

    /// Force completion of a decision still in `voting`.
    ///
    /// The outcome is computed from the votes present at the time of the
    /// call; quorum still applies.
    pub async fn manually_complete(
        &self,
        id: &DecisionId,
    ) -> Result<CompletionReport, CompletionError> {
        let decision = self.store.get_decision(id).await?;
        let votes = self.store.get_votes(id).await?;
        let now = Utc::now();
        let vote_count = votes.len() as u32;

        if !decision.is_voting() {
            info!(
                "Manual completion of {} ignored: status is {}",
                id, decision.status
            );
            let status = CompletionStatus::not_voting(&decision, vote_count, now);
            return Ok(CompletionReport::unchanged(&decision, status));
        }

        let status = CompletionStatus::manual(&decision, vote_count, now);
        self.finalize(decision, votes, status, now).await
    }

    /// Check every voting decision whose deadline has passed.
    ///
    /// A failure on one decision is recorded and the sweep moves on.
    pub async fn check_expired_deadlines(&self) -> Result<SweepReport, CompletionError> {
        let expired = self
            .store
            .list_expired_voting_decisions(Utc::now())
            .await?;

        let mut sweep = SweepReport {
            checked: expired.len(),
            ..SweepReport::default()
        };

        for decision in expired {
            match self.check_completion(&decision.id).await {
                Ok(report) if report.transitioned => sweep.transitioned.push(decision.id),
                Ok(_) => {}
                Err(e) => {
                    warn!("Deadline check for {} failed: {}", decision.id, e);
                    sweep.failed.push((decision.id, e.to_string()));
                }
            }
        }

        if sweep.checked > 0 {
            info!(
                "Deadline sweep: {} expired, {} completed, {} failed",
                sweep.checked,
                sweep.transitioned.len(),
                sweep.failed.len()
            );
        }
        Ok(sweep)
    }

    async fn finalize(
        &self,
        decision: Decision,
        votes: Vec<VoteRecord>,
        status: CompletionStatus,
        now: DateTime<Utc>,
    ) -> Result<CompletionReport, CompletionError> {
        let config = decision.voting_configuration()?;
        let statistics = StatisticsEngine::compute_outcome(&votes, &config);
        let final_status = DecisionStatus::terminal_for(decision.kind, statistics.passed);

        let won = self
            .store
            .update_decision_status(&decision.id, DecisionStatus::Voting, final_status, now)
            .await?;

        let mut report = CompletionReport::unchanged(&decision, status.clone());
        report.statistics = Some(statistics.clone());

        if !won {
            info!("{} was completed by another caller", decision.id);
            return Ok(report);
        }

        info!(
            "{} completed ({}): {} - {}",
            decision.id,
            status.reason,
            final_status,
            statistics.reason_text()
        );
        report.transitioned = true;
        report.final_status = Some(final_status);

        self.audit.log(AuditEvent::new(
            "decision_completed",
            json!({
                "decision_id": decision.id.as_str(),
                "kind": decision.kind,
                "reason": status.reason,
                "final_status": final_status,
                "passed": statistics.passed,
                "vote_count": status.vote_count,
                "eligible_count": status.eligible_count,
                "completed_at": now.to_rfc3339(),
            }),
        ));

        let summary = OutcomeSummary::build(
            &decision,
            final_status,
            status.reason,
            now,
            statistics,
            &votes,
        );

        // The transition is already persisted; a failed notification never undoes it
        match self.notifier.notify(&summary).await {
            Ok(delivery) => {
                info!(
                    "Outcome notification for {}: {}/{} delivered",
                    decision.id, delivery.successful_deliveries, delivery.total_recipients
                );
                report.delivery = Some(delivery);
            }
            Err(e) => {
                warn!("Outcome notification for {} failed: {}", decision.id, e);
                self.audit.log(AuditEvent::new(
                    "notification_failed",
                    json!({
                        "decision_id": decision.id.as_str(),
                        "error": e.to_string(),
                    }),
                ));
                report.notification_error = Some(e.to_string());
            }
        }

        Ok(report)
    }
}
