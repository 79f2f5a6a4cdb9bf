//! Bounded timeout and retry around calls to external providers.
//!
//! Each attempt gets its own timeout. Only errors that report themselves as
//! retryable are retried; the wait doubles after every failed attempt. When
//! the attempts run out the last error is converted with
//! [`Retryable::exhausted`].

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, timeout};
use tracing::warn;

/// Errors that can take part in a [`RetryPolicy`].
pub trait Retryable: Sized {
    /// Whether another attempt might succeed.
    fn is_retryable(&self) -> bool;

    /// The error to report when an attempt exceeds its timeout.
    fn timed_out(after: Duration) -> Self;

    /// Convert the final error once all attempts have failed.
    fn exhausted(self, attempts: u32) -> Self;
}

/// Timeout and retry settings for one class of external call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Time budget for a single attempt. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Additional attempts after the first one.
    pub max_retries: u32,
    /// Wait before the first retry; doubled for each further one.
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(60)),
            max_retries: 1,
            initial_backoff: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// A policy with a single attempt and no timeout.
    pub fn none() -> Self {
        Self {
            timeout: None,
            max_retries: 0,
            initial_backoff: Duration::ZERO,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_backoff(mut self, backoff: Duration) -> Self {
        self.initial_backoff = backoff;
        self
    }

    /// Backoff before retry number `retry` (0-based).
    pub fn backoff(&self, retry: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(2u32.saturating_pow(retry))
    }

    /// Run `operation` under this policy.
    ///
    /// `label` only appears in log lines.
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, E>
    where
        E: Retryable + Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt: u32 = 0;
        loop {
            let outcome = match self.timeout {
                Some(limit) => match timeout(limit, operation()).await {
                    Ok(result) => result,
                    Err(_) => Err(E::timed_out(limit)),
                },
                None => operation().await,
            };

            let error = match outcome {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            if !error.is_retryable() {
                return Err(error);
            }

            if attempt >= self.max_retries {
                return Err(error.exhausted(attempt + 1));
            }

            let wait = self.backoff(attempt);
            warn!(
                "{} failed (attempt {}): {}; retrying in {:?}",
                label,
                attempt + 1,
                error,
                wait
            );
            sleep(wait).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BrainError;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy::none()
            .with_max_retries(max_retries)
            .with_initial_backoff(Duration::from_millis(1))
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(0), Duration::from_millis(500));
        assert_eq!(policy.backoff(1), Duration::from_millis(1000));
        assert_eq!(policy.backoff(2), Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, BrainError> = fast_policy(1)
            .run("test", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(7)
            })
            .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_once_then_succeeds() {
        let calls = AtomicU32::new(0);
        let result: Result<&str, BrainError> = fast_policy(1)
            .run("test", || async {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(BrainError::Network("reset".to_string()))
                } else {
                    Ok("ok")
                }
            })
            .await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_exhaustion_reports_provider_unavailable() {
        let calls = AtomicU32::new(0);
        let result: Result<(), BrainError> = fast_policy(1)
            .run("test", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(BrainError::Network("down".to_string()))
            })
            .await;

        assert!(matches!(result, Err(BrainError::ProviderUnavailable(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_non_retryable_error_stops_immediately() {
        let calls = AtomicU32::new(0);
        let result: Result<(), BrainError> = fast_policy(3)
            .run("test", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(BrainError::Api {
                    status: 401,
                    message: "invalid key".to_string(),
                })
            })
            .await;

        assert!(matches!(result, Err(BrainError::Api { status: 401, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timeout_counts_as_retryable_failure() {
        let policy = fast_policy(1).with_timeout(Duration::from_millis(5));
        let result: Result<(), BrainError> = policy
            .run("test", || async {
                sleep(Duration::from_millis(200)).await;
                Ok(())
            })
            .await;

        match result {
            Err(BrainError::ProviderUnavailable(msg)) => assert!(msg.contains("timed out")),
            other => panic!("Expected ProviderUnavailable, got {:?}", other),
        }
    }
}
