//! Test doubles shared by the use case tests.

use crate::ports::audit_logger::{AuditEvent, AuditLogger};
use crate::ports::decision_store::{DecisionStore, StoreError};
use crate::ports::delivery_progress::DeliveryProgressNotifier;
use crate::ports::notification_transport::{NotificationTransport, TransportError};
use crate::ports::recipient_resolver::{RecipientError, RecipientResolver};
use crate::ports::summary_renderer::{RenderError, SummaryRenderer};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quorum_domain::{
    CompletionReason, Decision, DecisionId, DecisionKind, DecisionStatus, DeliveryResult,
    EmailRecipient, OutcomeSummary, RenderedMessage, StatisticsEngine, VoteChoice, VoteRecord,
    Voter,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

// ==================== Fixtures ====================

pub fn recipients(count: usize) -> Vec<EmailRecipient> {
    (1..=count)
        .map(|i| EmailRecipient::new(format!("m{i}"), format!("Member {i}"), format!("m{i}@board.org")))
        .collect()
}

pub fn vote(decision: &str, voter: &str, choice: VoteChoice) -> VoteRecord {
    VoteRecord::new(
        decision,
        Voter::new(voter, format!("Voter {voter}"), format!("{voter}@board.org")),
        choice,
    )
}

pub fn summary() -> OutcomeSummary {
    let decision = Decision::new("res-1", DecisionKind::Resolution, 3, 50.0, 75.0)
        .with_title("Adopt budget");
    let votes = vec![
        vote("res-1", "a", VoteChoice::Approve),
        vote("res-1", "b", VoteChoice::Approve),
    ];
    let config = decision.voting_configuration().unwrap();
    let statistics = StatisticsEngine::compute_outcome(&votes, &config);
    OutcomeSummary::build(
        &decision,
        DecisionStatus::Approved,
        CompletionReason::AllVoted,
        Utc::now(),
        statistics,
        &votes,
    )
}

// ==================== Transport ====================

/// Transport that fails a configurable number of attempts per address.
#[derive(Default)]
pub struct MockTransport {
    failures_before_success: HashMap<String, u32>,
    hanging: Vec<String>,
    latency: Duration,
    attempts: Mutex<HashMap<String, u32>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, email: &str, times: u32) -> Self {
        self.failures_before_success.insert(email.to_string(), times);
        self
    }

    pub fn always_failing(self, email: &str) -> Self {
        self.failing(email, u32::MAX)
    }

    /// Sends to this address never return.
    pub fn hanging(mut self, email: &str) -> Self {
        self.hanging.push(email.to_string());
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn attempts_for(&self, email: &str) -> u32 {
        self.attempts.lock().unwrap().get(email).copied().unwrap_or(0)
    }

    pub fn total_attempts(&self) -> u32 {
        self.attempts.lock().unwrap().values().sum()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationTransport for MockTransport {
    async fn send(
        &self,
        to: &str,
        _subject: &str,
        _html_body: &str,
        _text_body: &str,
    ) -> Result<bool, TransportError> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            let count = attempts.entry(to.to_string()).or_insert(0);
            *count += 1;
            *count
        };

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        if self.hanging.iter().any(|h| h == to) {
            std::future::pending::<()>().await;
        }
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let failures = self.failures_before_success.get(to).copied().unwrap_or(0);
        if attempt <= failures {
            Err(TransportError::ConnectionError(format!("{to} unreachable")))
        } else {
            Ok(true)
        }
    }
}

// ==================== Resolver / Renderer ====================

pub struct StaticResolver(pub Vec<EmailRecipient>);

#[async_trait]
impl RecipientResolver for StaticResolver {
    async fn eligible_recipients(&self) -> Result<Vec<EmailRecipient>, RecipientError> {
        Ok(self.0.clone())
    }
}

pub struct UnavailableResolver;

#[async_trait]
impl RecipientResolver for UnavailableResolver {
    async fn eligible_recipients(&self) -> Result<Vec<EmailRecipient>, RecipientError> {
        Err(RecipientError::Unavailable("member directory offline".to_string()))
    }
}

pub struct PlainRenderer;

impl SummaryRenderer for PlainRenderer {
    fn render(
        &self,
        summary: &OutcomeSummary,
        recipient_name: &str,
    ) -> Result<RenderedMessage, RenderError> {
        Ok(RenderedMessage {
            subject: summary.headline(),
            html_body: format!("<p>Dear {recipient_name}</p>"),
            text_body: format!("Dear {recipient_name}"),
        })
    }
}

// ==================== Audit / Progress ====================

#[derive(Default)]
pub struct RecordingAudit {
    events: Mutex<Vec<(String, Value)>>,
}

impl RecordingAudit {
    pub fn event_types(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(t, _)| t.clone())
            .collect()
    }

    pub fn count(&self, event_type: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _)| t == event_type)
            .count()
    }
}

impl AuditLogger for RecordingAudit {
    fn log(&self, event: AuditEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type.to_string(), event.payload));
    }
}

#[derive(Default)]
pub struct RecordingProgress {
    pub events: Mutex<Vec<String>>,
}

impl DeliveryProgressNotifier for RecordingProgress {
    fn on_batch_start(&self, batch: usize, total_batches: usize, size: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("start {batch}/{total_batches} ({size})"));
    }

    fn on_recipient_complete(&self, result: &DeliveryResult) {
        self.events
            .lock()
            .unwrap()
            .push(format!("done {} {}", result.recipient_id, result.success));
    }

    fn on_batch_complete(&self, batch: usize) {
        self.events.lock().unwrap().push(format!("end {batch}"));
    }

    fn on_retry(&self, recipient_id: &str, attempt: u32, _error: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("retry {recipient_id} {attempt}"));
    }
}

// ==================== Store ====================

/// Minimal CAS-honoring store.
#[derive(Default)]
pub struct MemoryStore {
    pub decisions: Mutex<HashMap<DecisionId, Decision>>,
    pub votes: Mutex<HashMap<DecisionId, Vec<VoteRecord>>>,
    pub status_writes: AtomicUsize,
}

impl MemoryStore {
    pub fn with_decision(self, decision: Decision, votes: Vec<VoteRecord>) -> Self {
        self.votes.lock().unwrap().insert(decision.id.clone(), votes);
        self.decisions
            .lock()
            .unwrap()
            .insert(decision.id.clone(), decision);
        self
    }

    pub fn status_of(&self, id: &str) -> DecisionStatus {
        self.decisions.lock().unwrap()[&DecisionId::new(id)].status
    }

    pub fn writes(&self) -> usize {
        self.status_writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DecisionStore for MemoryStore {
    async fn get_decision(&self, id: &DecisionId) -> Result<Decision, StoreError> {
        self.decisions
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    async fn get_votes(&self, id: &DecisionId) -> Result<Vec<VoteRecord>, StoreError> {
        Ok(self.votes.lock().unwrap().get(id).cloned().unwrap_or_default())
    }

    async fn update_decision_status(
        &self,
        id: &DecisionId,
        expected: DecisionStatus,
        new: DecisionStatus,
        completed_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let mut decisions = self.decisions.lock().unwrap();
        let decision = decisions
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        if decision.status != expected {
            return Ok(false);
        }
        decision.status = new;
        decision.completed_at = Some(completed_at);
        self.status_writes.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }

    async fn list_expired_voting_decisions(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Decision>, StoreError> {
        let mut expired: Vec<Decision> = self
            .decisions
            .lock()
            .unwrap()
            .values()
            .filter(|d| d.is_voting() && d.deadline_expired(now))
            .cloned()
            .collect();
        expired.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        Ok(expired)
    }
}
