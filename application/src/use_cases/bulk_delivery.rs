//! Bulk delivery use case
//!
//! Sends one outcome summary to many recipients. Recipients are split into
//! batches that run one after another; inside a batch, sends run
//! concurrently up to [`DeliveryOptions::max_concurrent`]. Each recipient
//! gets its own retry loop, so one address failing never affects another.

use crate::config::DeliveryOptions;
use crate::ports::audit_logger::{AuditEvent, AuditLogger, NoAuditLogger};
use crate::ports::delivery_progress::{DeliveryProgressNotifier, NoDeliveryProgress};
use crate::ports::notification_transport::{NotificationTransport, TransportError};
use crate::ports::recipient_resolver::{RecipientError, RecipientResolver};
use crate::ports::summary_renderer::SummaryRenderer;
use crate::use_cases::shared::{is_cancelled, retry_with_backoff};
use futures::stream::{FuturesUnordered, StreamExt};
use quorum_domain::{
    BulkDeliveryReport, DeliveryResult, EmailRecipient, NotificationKind, OutcomeSummary,
    RenderedMessage, validate_email,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Input for the bulk delivery use case
#[derive(Debug, Clone)]
pub struct BulkDeliveryInput {
    /// Candidate recipients, before preference filtering
    pub recipients: Vec<EmailRecipient>,
    /// Summary rendered once per recipient
    pub summary: OutcomeSummary,
    pub options: DeliveryOptions,
    /// Checked between batches; sends already in flight are not interrupted
    pub cancellation: Option<CancellationToken>,
}

impl BulkDeliveryInput {
    pub fn new(recipients: Vec<EmailRecipient>, summary: OutcomeSummary) -> Self {
        Self {
            recipients,
            summary,
            options: DeliveryOptions::default(),
            cancellation: None,
        }
    }

    pub fn with_options(mut self, options: DeliveryOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Use case for delivering an outcome summary to many recipients
pub struct BulkDeliveryUseCase {
    transport: Arc<dyn NotificationTransport>,
    renderer: Arc<dyn SummaryRenderer>,
    resolver: Arc<dyn RecipientResolver>,
    audit: Arc<dyn AuditLogger>,
}

impl BulkDeliveryUseCase {
    pub fn new(
        transport: Arc<dyn NotificationTransport>,
        renderer: Arc<dyn SummaryRenderer>,
        resolver: Arc<dyn RecipientResolver>,
    ) -> Self {
        Self {
            transport,
            renderer,
            resolver,
            audit: Arc::new(NoAuditLogger),
        }
    }

    pub fn with_audit_logger(mut self, audit: Arc<dyn AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: BulkDeliveryInput) -> BulkDeliveryReport {
        self.execute_with_progress(input, &NoDeliveryProgress).await
    }

    /// Resolve the eligible recipients and deliver to them.
    pub async fn deliver_to_eligible(
        &self,
        summary: OutcomeSummary,
        options: DeliveryOptions,
        cancellation: Option<CancellationToken>,
        progress: &dyn DeliveryProgressNotifier,
    ) -> Result<BulkDeliveryReport, RecipientError> {
        let recipients = self.resolver.eligible_recipients().await?;
        let input = BulkDeliveryInput {
            recipients,
            summary,
            options,
            cancellation,
        };
        Ok(self.execute_with_progress(input, progress).await)
    }

    /// Execute the use case with progress callbacks.
    ///
    /// Never fails as a whole: every per-recipient failure is captured in
    /// the returned report.
    pub async fn execute_with_progress(
        &self,
        input: BulkDeliveryInput,
        progress: &dyn DeliveryProgressNotifier,
    ) -> BulkDeliveryReport {
        let kind = NotificationKind::for_decision(input.summary.kind);
        let candidates = input.recipients.len();
        let (targets, skipped) =
            self.apply_preferences(input.recipients, kind, input.options.respect_preferences);

        let mut report = BulkDeliveryReport::begin(targets.len() as u32, skipped);
        info!(
            "Delivering '{}' to {} recipient(s) ({} candidate(s), {} opted out)",
            input.summary.headline(),
            targets.len(),
            candidates,
            skipped
        );

        // Malformed and placeholder addresses fail without a send attempt
        let mut sendable = Vec::with_capacity(targets.len());
        for recipient in targets {
            match validate_email(&recipient.email) {
                Ok(()) => sendable.push(recipient),
                Err(e) => {
                    let result = DeliveryResult::failure(
                        &recipient.id,
                        &recipient.name,
                        &recipient.email,
                        0,
                        e.to_string(),
                        0,
                    );
                    self.record(&mut report, result, &input.summary, &input.options, progress);
                }
            }
        }

        let (max_concurrent, batch_size) = input.options.effective_limits();
        let slots = Semaphore::new(max_concurrent);
        let batches: Vec<&[EmailRecipient]> = sendable.chunks(batch_size).collect();
        let total_batches = batches.len();

        for (index, batch) in batches.into_iter().enumerate() {
            let number = index + 1;
            if is_cancelled(&input.cancellation) {
                info!(
                    "Delivery cancelled before batch {}/{}",
                    number, total_batches
                );
                report.mark_cancelled();
                break;
            }

            debug!(
                "Batch {}/{}: {} recipient(s)",
                number,
                total_batches,
                batch.len()
            );
            progress.on_batch_start(number, total_batches, batch.len());

            let mut in_flight: FuturesUnordered<_> = batch
                .iter()
                .map(|recipient| {
                    self.deliver_one(recipient, &input.summary, &input.options, &slots, progress)
                })
                .collect();

            while let Some(result) = in_flight.next().await {
                self.record(&mut report, result, &input.summary, &input.options, progress);
            }

            progress.on_batch_complete(number);

            if number < total_batches {
                self.pause_between_batches(input.options.batch_delay, &input.cancellation)
                    .await;
            }
        }

        let report = report.finish();
        info!(
            "Delivery finished: {}/{} succeeded, {} failed in {}ms{}",
            report.successful_deliveries,
            report.total_recipients,
            report.failed_deliveries,
            report.total_duration_ms,
            if report.cancelled { " (cancelled)" } else { "" }
        );
        report
    }

    fn apply_preferences(
        &self,
        recipients: Vec<EmailRecipient>,
        kind: NotificationKind,
        respect_preferences: bool,
    ) -> (Vec<EmailRecipient>, u32) {
        if !respect_preferences {
            return (recipients, 0);
        }

        let before = recipients.len();
        let kept: Vec<EmailRecipient> = recipients
            .into_iter()
            .filter(|r| self.resolver.should_receive(r, kind))
            .collect();
        let skipped = (before - kept.len()) as u32;
        (kept, skipped)
    }

    /// Render, then send with retries. Always yields a final result.
    async fn deliver_one(
        &self,
        recipient: &EmailRecipient,
        summary: &OutcomeSummary,
        options: &DeliveryOptions,
        slots: &Semaphore,
        progress: &dyn DeliveryProgressNotifier,
    ) -> DeliveryResult {
        let started = Instant::now();

        let message = match self.renderer.render(summary, &recipient.name) {
            Ok(message) => message,
            Err(e) => {
                return DeliveryResult::failure(
                    &recipient.id,
                    &recipient.name,
                    &recipient.email,
                    0,
                    format!("Render failed: {}", e),
                    0,
                );
            }
        };

        let email = recipient.email.as_str();
        let message = &message;
        let send_timeout = options.send_timeout;

        let outcome = retry_with_backoff(
            &options.retry,
            move |_| self.attempt_send(email, message, send_timeout, slots),
            |attempt, error: &TransportError| {
                debug!(
                    "Attempt {} to {} failed, retrying: {}",
                    attempt, recipient.email, error
                );
                progress.on_retry(&recipient.id, attempt, &error.to_string());
            },
        )
        .await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match outcome.result {
            Ok(()) => DeliveryResult::success(
                &recipient.id,
                &recipient.name,
                &recipient.email,
                outcome.attempts,
                elapsed_ms,
            ),
            Err(e) => DeliveryResult::failure(
                &recipient.id,
                &recipient.name,
                &recipient.email,
                outcome.attempts,
                e.to_string(),
                elapsed_ms,
            ),
        }
    }

    /// One attempt: wait for a free slot, then send under a timeout.
    ///
    /// The slot is released before any backoff delay.
    async fn attempt_send(
        &self,
        to: &str,
        message: &RenderedMessage,
        send_timeout: Duration,
        slots: &Semaphore,
    ) -> Result<(), TransportError> {
        let _permit = slots
            .acquire()
            .await
            .map_err(|_| TransportError::Other("Send slots closed".to_string()))?;

        let send = self.transport.send(
            to,
            &message.subject,
            &message.html_body,
            &message.text_body,
        );

        match tokio::time::timeout(send_timeout, send).await {
            Err(_) => Err(TransportError::Timeout),
            Ok(Err(e)) => Err(e),
            Ok(Ok(false)) => Err(TransportError::Rejected(
                "transport reported non-success".to_string(),
            )),
            Ok(Ok(true)) => Ok(()),
        }
    }

    fn record(
        &self,
        report: &mut BulkDeliveryReport,
        result: DeliveryResult,
        summary: &OutcomeSummary,
        options: &DeliveryOptions,
        progress: &dyn DeliveryProgressNotifier,
    ) {
        if result.success {
            debug!(
                "Delivered to {} after {} attempt(s)",
                result.email, result.attempts
            );
        } else {
            warn!(
                "Delivery to {} failed after {} attempt(s): {}",
                result.email,
                result.attempts,
                result.error.as_deref().unwrap_or("unknown error")
            );
        }

        progress.on_recipient_complete(&result);

        if options.record_delivery_status {
            self.audit.log(AuditEvent::new(
                "delivery_result",
                json!({
                    "decision_id": summary.decision_id.as_str(),
                    "recipient_id": &result.recipient_id,
                    "email": &result.email,
                    "success": result.success,
                    "attempts": result.attempts,
                    "error": &result.error,
                    "elapsed_ms": result.elapsed_ms,
                }),
            ));
        }

        report.record(result);
    }

    async fn pause_between_batches(&self, delay: Duration, cancellation: &Option<CancellationToken>) {
        if delay.is_zero() {
            return;
        }
        match cancellation {
            Some(token) => {
                tokio::select! {
                    _ = token.cancelled() => {}
                    _ = tokio::time::sleep(delay) => {}
                }
            }
            None => tokio::time::sleep(delay).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryPolicy;
    use crate::use_cases::test_support::{
        MockTransport, PlainRenderer, RecordingAudit, RecordingProgress, StaticResolver,
        recipients, summary,
    };
    use quorum_domain::NotificationPreferences;

    fn use_case(transport: Arc<MockTransport>) -> BulkDeliveryUseCase {
        BulkDeliveryUseCase::new(
            transport,
            Arc::new(PlainRenderer),
            Arc::new(StaticResolver(vec![])),
        )
    }

    fn fast_options() -> DeliveryOptions {
        DeliveryOptions::default()
            .with_batch_delay(Duration::ZERO)
            .with_retry(RetryPolicy::new(3, Duration::from_millis(1)))
    }

    #[tokio::test]
    async fn test_one_failing_recipient_does_not_affect_others() {
        let transport = Arc::new(MockTransport::new().always_failing("m4@board.org"));
        let delivery = use_case(transport.clone());

        let input = BulkDeliveryInput::new(recipients(10), summary())
            .with_options(fast_options().with_max_concurrent(3));
        let report = delivery.execute(input).await;

        assert_eq!(report.total_recipients, 10);
        assert_eq!(report.successful_deliveries, 9);
        assert_eq!(report.failed_deliveries, 1);
        assert_eq!(report.results.len(), 10);
        assert_eq!(report.failed_recipient_ids(), vec!["m4".to_string()]);
        assert_eq!(transport.attempts_for("m4@board.org"), 3);
        assert!(!report.cancelled);
    }

    #[tokio::test]
    async fn test_fails_twice_then_succeeds() {
        let transport = Arc::new(MockTransport::new().failing("m1@board.org", 2));
        let delivery = use_case(transport.clone());

        let report = delivery
            .execute(BulkDeliveryInput::new(recipients(1), summary()).with_options(fast_options()))
            .await;

        assert_eq!(report.successful_deliveries, 1);
        let result = &report.results[0];
        assert!(result.success);
        assert_eq!(result.attempts, 3);
        assert!(result.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrency_never_exceeds_limit() {
        let transport =
            Arc::new(MockTransport::new().with_latency(Duration::from_millis(50)));
        let delivery = use_case(transport.clone());

        let options = fast_options().with_max_concurrent(3).with_batch_size(10);
        let report = delivery
            .execute(BulkDeliveryInput::new(recipients(10), summary()).with_options(options))
            .await;

        assert_eq!(report.successful_deliveries, 10);
        assert_eq!(transport.peak_in_flight(), 3);
    }

    #[tokio::test]
    async fn test_batches_run_in_order() {
        let transport = Arc::new(MockTransport::new());
        let delivery = use_case(transport);
        let progress = RecordingProgress::default();

        let options = fast_options().with_batch_size(2).with_max_concurrent(1);
        delivery
            .execute_with_progress(
                BulkDeliveryInput::new(recipients(5), summary()).with_options(options),
                &progress,
            )
            .await;

        let events = progress.events.lock().unwrap().clone();
        let markers: Vec<&String> = events
            .iter()
            .filter(|e| e.starts_with("start") || e.starts_with("end"))
            .collect();
        assert_eq!(
            markers,
            vec![
                "start 1/3 (2)", "end 1", "start 2/3 (2)", "end 2", "start 3/3 (1)", "end 3"
            ]
        );
        // Every recipient of batch 1 finishes before batch 2 starts
        let second_start = events.iter().position(|e| e == "start 2/3 (2)").unwrap();
        assert!(events[..second_start].contains(&"done m1 true".to_string()));
        assert!(events[..second_start].contains(&"done m2 true".to_string()));
    }

    #[tokio::test]
    async fn test_invalid_emails_fail_without_send() {
        let transport = Arc::new(MockTransport::new());
        let delivery = use_case(transport.clone());

        let mut list = recipients(2);
        list.push(EmailRecipient::new("bad", "Bad Address", "not-an-address"));
        list.push(EmailRecipient::new("seed", "Seeded", "seed@example.com"));

        let report = delivery
            .execute(BulkDeliveryInput::new(list, summary()).with_options(fast_options()))
            .await;

        assert_eq!(report.total_recipients, 4);
        assert_eq!(report.successful_deliveries, 2);
        assert_eq!(report.failed_deliveries, 2);
        for result in report.failed_results() {
            assert_eq!(result.attempts, 0);
        }
        assert_eq!(transport.total_attempts(), 2);
    }

    #[tokio::test]
    async fn test_preferences_filter_recipients() {
        let transport = Arc::new(MockTransport::new());
        let delivery = use_case(transport.clone());

        let mut list = recipients(3);
        list[0].preferences = NotificationPreferences {
            resolution_outcomes: false,
            ..NotificationPreferences::default()
        };
        list[1] = list[1].clone().inactive();

        let report = delivery
            .execute(BulkDeliveryInput::new(list.clone(), summary()).with_options(fast_options()))
            .await;
        assert_eq!(report.total_recipients, 1);
        assert_eq!(report.skipped_by_preference, 2);
        assert_eq!(report.successful_deliveries, 1);

        let report = delivery
            .execute(
                BulkDeliveryInput::new(list, summary())
                    .with_options(fast_options().with_respect_preferences(false)),
            )
            .await;
        assert_eq!(report.total_recipients, 3);
        assert_eq!(report.skipped_by_preference, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_send_times_out() {
        let transport = Arc::new(MockTransport::new().hanging("m2@board.org"));
        let delivery = use_case(transport.clone());

        let options = fast_options()
            .with_send_timeout(Duration::from_secs(5))
            .with_retry(RetryPolicy::new(2, Duration::from_secs(1)));
        let report = delivery
            .execute(BulkDeliveryInput::new(recipients(2), summary()).with_options(options))
            .await;

        assert_eq!(report.successful_deliveries, 1);
        let failed: Vec<_> = report.failed_results().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].attempts, 2);
        assert_eq!(failed[0].error.as_deref(), Some("Timeout"));
    }

    #[tokio::test]
    async fn test_cancellation_between_batches() {
        let transport = Arc::new(MockTransport::new());
        let delivery = use_case(transport.clone());
        let token = CancellationToken::new();

        struct CancelAfterFirstBatch(CancellationToken);
        impl DeliveryProgressNotifier for CancelAfterFirstBatch {
            fn on_batch_start(&self, _: usize, _: usize, _: usize) {}
            fn on_recipient_complete(&self, _: &DeliveryResult) {}
            fn on_batch_complete(&self, _: usize) {
                self.0.cancel();
            }
        }

        let input = BulkDeliveryInput::new(recipients(6), summary())
            .with_options(fast_options().with_batch_size(2))
            .with_cancellation(token.clone());
        let report = delivery
            .execute_with_progress(input, &CancelAfterFirstBatch(token))
            .await;

        assert!(report.cancelled);
        assert_eq!(report.total_recipients, 6);
        assert_eq!(report.successful_deliveries, 2);
        assert_eq!(report.results.len(), 2);
        assert_eq!(transport.total_attempts(), 2);
    }

    #[tokio::test]
    async fn test_retry_progress_and_audit() {
        let transport = Arc::new(MockTransport::new().failing("m1@board.org", 1));
        let audit = Arc::new(RecordingAudit::default());
        let delivery = use_case(transport).with_audit_logger(audit.clone());
        let progress = RecordingProgress::default();

        delivery
            .execute_with_progress(
                BulkDeliveryInput::new(recipients(2), summary()).with_options(fast_options()),
                &progress,
            )
            .await;

        assert!(progress
            .events
            .lock()
            .unwrap()
            .contains(&"retry m1 1".to_string()));
        assert_eq!(audit.count("delivery_result"), 2);

        let quiet = use_case(Arc::new(MockTransport::new())).with_audit_logger(audit.clone());
        quiet
            .execute(
                BulkDeliveryInput::new(recipients(2), summary())
                    .with_options(fast_options().with_record_delivery_status(false)),
            )
            .await;
        assert_eq!(audit.count("delivery_result"), 2);
    }

    #[tokio::test]
    async fn test_deliver_to_eligible_uses_resolver() {
        let transport = Arc::new(MockTransport::new());
        let delivery = BulkDeliveryUseCase::new(
            transport.clone(),
            Arc::new(PlainRenderer),
            Arc::new(StaticResolver(recipients(4))),
        );

        let report = delivery
            .deliver_to_eligible(summary(), fast_options(), None, &NoDeliveryProgress)
            .await
            .unwrap();
        assert_eq!(report.successful_deliveries, 4);
        assert_eq!(transport.total_attempts(), 4);
    }

    #[tokio::test]
    async fn test_empty_recipient_list() {
        let delivery = use_case(Arc::new(MockTransport::new()));
        let report = delivery
            .execute(BulkDeliveryInput::new(vec![], summary()))
            .await;
        assert_eq!(report.total_recipients, 0);
        assert!(report.results.is_empty());
        assert_eq!(report.success_ratio(), 1.0);
    }
}
