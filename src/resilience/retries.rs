//! Retry logic.
//!
//! # Responsibilities
//! - Run a fallible async operation up to `1 + max_retries` times
//! - Sleep a fixed delay between attempts
//! - Hand back a typed failure carrying the last error once exhausted
//!
//! # Design Decisions
//! - Explicit bounded loop; the attempt count is a plain parameter
//! - Fixed delay, no jitter: one wallet talks to the API at a time

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::config::RetryConfig;
use crate::observability::metrics;

/// Bounded fixed-delay retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first failure.
    pub max_retries: u32,
    /// Delay between consecutive attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// Total number of attempts this policy allows.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(3))
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(config.max_retries, Duration::from_secs(config.delay_secs))
    }
}

/// Returned when every attempt failed.
#[derive(Debug, Error)]
#[error("{operation} failed after {attempts} attempts: {last}")]
pub struct RetryError<E> {
    /// Name of the operation, for logs.
    pub operation: &'static str,
    /// Attempts made, always `policy.max_attempts()`.
    pub attempts: u32,
    /// Error from the final attempt.
    pub last: E,
}

/// Run `op` until it succeeds or the policy is exhausted.
pub async fn retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    operation: &'static str,
    mut op: F,
) -> Result<T, RetryError<E>>
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = policy.max_attempts();
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_attempts => {
                let retries_left = max_attempts - attempt - 1;
                tracing::error!(operation, attempt, error = %e, "Request failed");
                tracing::warn!(operation, retries_left, "Retrying in {:?}", policy.delay);
                metrics::record_retry(operation);
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(e) => {
                tracing::error!(operation, attempts = attempt, error = %e, "Giving up after retries");
                return Err(RetryError {
                    operation,
                    attempts: attempt,
                    last: e,
                });
            }
        }
    }
}
