//! Delivery results and the aggregate bulk delivery report
//!
//! A [`BulkDeliveryReport`] is built incrementally: each finished send is
//! recorded as soon as it completes, so a run abandoned between batches
//! still holds accurate counts for everything that was attempted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of delivering to one recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryResult {
    pub recipient_id: String,
    pub recipient_name: String,
    pub email: String,
    pub success: bool,
    /// Send attempts made; 0 when the address was rejected before sending
    pub attempts: u32,
    pub error: Option<String>,
    /// Wall time across all attempts, including backoff
    pub elapsed_ms: u64,
    pub finished_at: DateTime<Utc>,
}

impl DeliveryResult {
    pub fn success(
        recipient_id: impl Into<String>,
        recipient_name: impl Into<String>,
        email: impl Into<String>,
        attempts: u32,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            recipient_id: recipient_id.into(),
            recipient_name: recipient_name.into(),
            email: email.into(),
            success: true,
            attempts,
            error: None,
            elapsed_ms,
            finished_at: Utc::now(),
        }
    }

    pub fn failure(
        recipient_id: impl Into<String>,
        recipient_name: impl Into<String>,
        email: impl Into<String>,
        attempts: u32,
        error: impl Into<String>,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            recipient_id: recipient_id.into(),
            recipient_name: recipient_name.into(),
            email: email.into(),
            success: false,
            attempts,
            error: Some(error.into()),
            elapsed_ms,
            finished_at: Utc::now(),
        }
    }
}

/// Aggregate report for one bulk delivery run.
///
/// The report never judges the run; callers decide acceptance through
/// [`meets_success_ratio`](Self::meets_success_ratio).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkDeliveryReport {
    /// Recipients in scope after preference filtering
    pub total_recipients: u32,
    pub successful_deliveries: u32,
    pub failed_deliveries: u32,
    /// Recipients dropped by the preference filter before delivery
    pub skipped_by_preference: u32,
    pub results: Vec<DeliveryResult>,
    pub average_delivery_ms: f64,
    pub failure_ratio: f64,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub total_duration_ms: u64,
    /// Set when the run was abandoned before every recipient was attempted
    pub cancelled: bool,
}

impl BulkDeliveryReport {
    pub fn begin(total_recipients: u32, skipped_by_preference: u32) -> Self {
        Self {
            total_recipients,
            successful_deliveries: 0,
            failed_deliveries: 0,
            skipped_by_preference,
            results: Vec::with_capacity(total_recipients as usize),
            average_delivery_ms: 0.0,
            failure_ratio: 0.0,
            started_at: Utc::now(),
            finished_at: None,
            total_duration_ms: 0,
            cancelled: false,
        }
    }

    /// Record one finished delivery and refresh the aggregates.
    pub fn record(&mut self, result: DeliveryResult) {
        if result.success {
            self.successful_deliveries += 1;
        } else {
            self.failed_deliveries += 1;
        }
        self.results.push(result);

        let attempted = self.results.len() as f64;
        let total_ms: u64 = self.results.iter().map(|r| r.elapsed_ms).sum();
        self.average_delivery_ms = total_ms as f64 / attempted;
        self.failure_ratio = self.failed_deliveries as f64 / attempted;
    }

    pub fn mark_cancelled(&mut self) {
        self.cancelled = true;
    }

    pub fn finish(mut self) -> Self {
        let now = Utc::now();
        self.total_duration_ms = (now - self.started_at).num_milliseconds().max(0) as u64;
        self.finished_at = Some(now);
        self
    }

    /// Number of recipients with a recorded result.
    pub fn attempted(&self) -> u32 {
        self.results.len() as u32
    }

    /// Successes over recipients in scope; 1.0 for an empty run.
    pub fn success_ratio(&self) -> f64 {
        if self.total_recipients == 0 {
            1.0
        } else {
            self.successful_deliveries as f64 / self.total_recipients as f64
        }
    }

    pub fn meets_success_ratio(&self, minimum: f64) -> bool {
        self.success_ratio() >= minimum
    }

    pub fn failed_results(&self) -> impl Iterator<Item = &DeliveryResult> {
        self.results.iter().filter(|r| !r.success)
    }

    /// Recipient ids to retry in a follow-up run.
    pub fn failed_recipient_ids(&self) -> Vec<String> {
        self.failed_results().map(|r| r.recipient_id.clone()).collect()
    }
}
