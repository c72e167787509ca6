//! Periodic deadline sweep
//!
//! Runs [`CompletionDetector::check_expired_deadlines`] on a fixed interval
//! until cancelled. The first sweep happens immediately.

use crate::use_cases::check_completion::{CompletionDetector, SweepReport};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Drives the deadline sweep on an interval
pub struct DeadlineScheduler {
    detector: Arc<CompletionDetector>,
    interval: Duration,
}

impl DeadlineScheduler {
    pub fn new(detector: Arc<CompletionDetector>, interval: Duration) -> Self {
        Self {
            detector,
            // tokio::time::interval panics on a zero period
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    /// Sweep until `cancellation` fires, returning the number of sweeps run.
    ///
    /// A failed sweep is logged and the loop keeps going. A sweep already
    /// in progress finishes before cancellation is observed.
    pub async fn run(&self, cancellation: CancellationToken) -> usize {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut sweeps = 0;

        info!("Deadline scheduler started (every {:?})", self.interval);
        loop {
            tokio::select! {
                biased;
                _ = cancellation.cancelled() => break,
                _ = ticker.tick() => {}
            }

            sweeps += 1;
            match self.detector.check_expired_deadlines().await {
                Ok(report) => log_sweep(&report),
                Err(e) => error!("Deadline sweep failed: {}", e),
            }
        }

        info!("Deadline scheduler stopped after {} sweep(s)", sweeps);
        sweeps
    }

    /// Run the loop on a background task.
    pub fn spawn(self, cancellation: CancellationToken) -> JoinHandle<usize> {
        tokio::spawn(async move { self.run(cancellation).await })
    }
}

fn log_sweep(report: &SweepReport) {
    for id in &report.transitioned {
        info!("Deadline sweep completed {}", id);
    }
}
