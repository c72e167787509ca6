//! Shared utilities for use cases.
//!
//! Contains the structured retry helper and cancellation checking used by
//! bulk delivery and the deadline sweep.

use crate::config::RetryPolicy;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Result of running an operation under a [`RetryPolicy`].
#[derive(Debug)]
pub(crate) struct RetryOutcome<T, E> {
    pub result: Result<T, E>,
    /// Attempts made, including the successful one
    pub attempts: u32,
}

/// Run `operation` until it succeeds or the policy's attempts are exhausted.
///
/// `operation` receives the 1-based attempt number. Between attempts the
/// helper calls `on_retry(failed_attempt, &error)` and then waits
/// [`RetryPolicy::delay_after`]. No delay follows the final attempt.
pub(crate) async fn retry_with_backoff<T, E, F, Fut, R>(
    policy: &RetryPolicy,
    mut operation: F,
    mut on_retry: R,
) -> RetryOutcome<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: FnMut(u32, &E),
{
    let max_attempts = policy.attempts();
    let mut attempt = 1;

    loop {
        match operation(attempt).await {
            Ok(value) => {
                return RetryOutcome {
                    result: Ok(value),
                    attempts: attempt,
                };
            }
            Err(error) if attempt >= max_attempts => {
                return RetryOutcome {
                    result: Err(error),
                    attempts: attempt,
                };
            }
            Err(error) => {
                on_retry(attempt, &error);
                tokio::time::sleep(policy.delay_after(attempt)).await;
                attempt += 1;
            }
        }
    }
}

/// Check if cancellation has been requested.
pub(crate) fn is_cancelled(token: &Option<CancellationToken>) -> bool {
    token.as_ref().is_some_and(CancellationToken::is_cancelled)
}
