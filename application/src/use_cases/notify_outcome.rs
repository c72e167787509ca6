//! Notify Outcome use case
//!
//! Delivers a decision's outcome summary to every eligible member and
//! judges the resulting report against the [`NotificationPolicy`].

use crate::config::{DeliveryOptions, NotificationPolicy};
use crate::ports::audit_logger::{AuditEvent, AuditLogger, NoAuditLogger};
use crate::ports::delivery_progress::{DeliveryProgressNotifier, NoDeliveryProgress};
use crate::ports::recipient_resolver::RecipientError;
use crate::use_cases::bulk_delivery::BulkDeliveryUseCase;
use async_trait::async_trait;
use quorum_domain::{BulkDeliveryReport, OutcomeSummary};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Errors that prevent an outcome notification from running at all
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Recipient resolution failed: {0}")]
    Recipients(#[from] RecipientError),
}

/// Sends the outcome of a completed decision.
///
/// Called by the completion detector at most once per decision, and only
/// after its status transition has been persisted.
#[async_trait]
pub trait OutcomeNotifier: Send + Sync {
    async fn notify(&self, summary: &OutcomeSummary) -> Result<BulkDeliveryReport, NotifyError>;
}

/// Notifier that sends nothing; used for dry runs and tests
pub struct NoOutcomeNotifier;

#[async_trait]
impl OutcomeNotifier for NoOutcomeNotifier {
    async fn notify(&self, _summary: &OutcomeSummary) -> Result<BulkDeliveryReport, NotifyError> {
        Ok(BulkDeliveryReport::begin(0, 0).finish())
    }
}

/// Use case for notifying members of a decision outcome
pub struct NotifyOutcomeUseCase {
    delivery: Arc<BulkDeliveryUseCase>,
    options: DeliveryOptions,
    policy: NotificationPolicy,
    audit: Arc<dyn AuditLogger>,
    progress: Arc<dyn DeliveryProgressNotifier>,
    cancellation: Option<CancellationToken>,
}

impl NotifyOutcomeUseCase {
    pub fn new(delivery: Arc<BulkDeliveryUseCase>, options: DeliveryOptions) -> Self {
        Self {
            delivery,
            options,
            policy: NotificationPolicy::default(),
            audit: Arc::new(NoAuditLogger),
            progress: Arc::new(NoDeliveryProgress),
            cancellation: None,
        }
    }

    pub fn with_policy(mut self, policy: NotificationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_audit_logger(mut self, audit: Arc<dyn AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn DeliveryProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Whether a report satisfies the configured success ratio.
    pub fn accepts(&self, report: &BulkDeliveryReport) -> bool {
        report.meets_success_ratio(self.policy.min_success_ratio)
    }
}

#[async_trait]
impl OutcomeNotifier for NotifyOutcomeUseCase {
    async fn notify(&self, summary: &OutcomeSummary) -> Result<BulkDeliveryReport, NotifyError> {
        let report = self
            .delivery
            .deliver_to_eligible(
                summary.clone(),
                self.options.clone(),
                self.cancellation.clone(),
                self.progress.as_ref(),
            )
            .await?;

        self.audit.log(AuditEvent::from_record("delivery_report", &report));

        if self.accepts(&report) {
            info!(
                "Outcome of {} delivered: {:.0}% success",
                summary.decision_id,
                report.success_ratio() * 100.0
            );
        } else {
            warn!(
                "Outcome of {} below acceptable delivery rate: {:.0}% < {:.0}% (failed: {})",
                summary.decision_id,
                report.success_ratio() * 100.0,
                self.policy.min_success_ratio * 100.0,
                report.failed_recipient_ids().join(", ")
            );
        }

        Ok(report)
    }
}
