//! Retry logic.
//!
//! # Responsibilities
//! - Retry upstream attempts that were rate limited (HTTP 429)
//! - Wait a fixed delay between attempts, up to a retry cap
//! - Convert an exhausted budget into `ServiceUnavailable`
//!
//! # Design Decisions
//! - Only rate limiting is retried; every other failure returns immediately
//! - Fixed delay, no exponential growth and no jitter
//! - Applies to GET, POST and DELETE alike

use std::future::Future;
use std::time::Duration;

use crate::config::RetryConfig;
use crate::employee::error::{EmployeeError, EmployeeResult};
use crate::observability::metrics;

/// Outcome of a single failed upstream attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptError {
    /// Upstream answered 429; the string describes the response.
    RateLimited(String),
    /// Any other classified failure. Never retried.
    Failed(EmployeeError),
}

impl From<EmployeeError> for AttemptError {
    fn from(err: EmployeeError) -> Self {
        Self::Failed(err)
    }
}

/// Fixed-delay retry policy for rate-limited attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    delay: Duration,
}

impl RetryPolicy {
    pub fn fixed(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::fixed(config.max_retries, config.delay())
    }

    /// Run `attempt` until it succeeds, fails for a reason other than rate
    /// limiting, or the retry budget runs out.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut attempt: F) -> EmployeeResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AttemptError>>,
    {
        let mut retries = 0u32;
        loop {
            match attempt().await {
                Ok(value) => {
                    if retries > 0 {
                        tracing::debug!(operation, retries, "Upstream call succeeded after retries");
                    }
                    return Ok(value);
                }
                Err(AttemptError::Failed(err)) => return Err(err),
                Err(AttemptError::RateLimited(reason)) => {
                    if retries >= self.max_retries {
                        tracing::error!(
                            operation,
                            retries,
                            reason = %reason,
                            "Retry budget exhausted"
                        );
                        return Err(EmployeeError::service_unavailable(operation, reason));
                    }
                    retries += 1;
                    tracing::warn!(
                        operation,
                        attempt = retries,
                        max_retries = self.max_retries,
                        delay = ?self.delay,
                        reason = %reason,
                        "Upstream rate limited, retrying"
                    );
                    metrics::record_retry(operation);
                    tokio::time::sleep(self.delay).await;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    fn rate_limited() -> AttemptError {
        AttemptError::RateLimited("429 Too Many Requests".to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn test_sustained_rate_limit_exhausts_budget() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);
        let started = Instant::now();

        let result: EmployeeResult<()> = policy
            .run("fetch employees", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(rate_limited()) }
            })
            .await;

        // One initial attempt plus five retries, 3s apart.
        assert_eq!(calls.load(Ordering::SeqCst), 6);
        assert_eq!(started.elapsed(), Duration::from_secs(15));
        let err = result.unwrap_err();
        assert!(matches!(err, EmployeeError::ServiceUnavailable { .. }));
        assert_eq!(err.message(), "429 Too Many Requests");
        assert_eq!(err.operation(), "fetch employees");
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_rate_limit_then_success() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);
        let started = Instant::now();

        let result = policy
            .run("fetch employees", || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(rate_limited())
                    } else {
                        Ok("body")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "body");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(started.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_failures_not_retried() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);
        let started = Instant::now();

        let result: EmployeeResult<()> = policy
            .run("create employee", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(AttemptError::Failed(EmployeeError::creation_failed(
                        "create employee",
                        "Failed to create employee",
                    )))
                }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
        assert!(matches!(result, Err(EmployeeError::CreationFailed { .. })));
    }

    #[tokio::test]
    async fn test_zero_retries_fails_on_first_rate_limit() {
        let policy = RetryPolicy::fixed(0, Duration::from_secs(3));
        let calls = AtomicU32::new(0);

        let result: EmployeeResult<()> = policy
            .run("delete employee", || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(rate_limited()) }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(EmployeeError::ServiceUnavailable { .. })));
    }
}
