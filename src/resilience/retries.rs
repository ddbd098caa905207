//! Retry logic.
//!
//! # Responsibilities
//! - Re-run a failed async operation a bounded number of times
//! - Wait a fixed delay between attempts
//! - Hand back the last failure untouched once the bound is reached
//!
//! # Design Decisions
//! - Every failure is retryable; classification happens above this layer
//! - No jitter or growth: origin fetches are short and per-request
//! - No shared budget: each request owns its own attempts

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::config::RetryConfig;
use crate::observability::metrics;

/// Bounded retry with a fixed inter-attempt delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Sleep between two attempts.
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
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(config.max_retries, Duration::from_millis(config.delay_ms))
    }
}

/// Run `operation` until it succeeds or the policy is exhausted.
///
/// The operation is invoked once, then up to `max_retries` more times with
/// `delay` slept before each retry. After the final failure that error is
/// returned as-is.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt <= policy.max_retries => {
                tracing::info!(
                    attempt,
                    max_attempts = policy.max_attempts(),
                    delay = ?policy.delay,
                    error = %e,
                    "Retrying after failure"
                );
                metrics::record_retry();
                tokio::time::sleep(policy.delay).await;
            }
            Err(e) => {
                tracing::warn!(attempts = attempt, error = %e, "Retries exhausted");
                return Err(e);
            }
        }
    }
}
