//! Retry with exponential backoff for provider calls
//!
//! An explicit, injectable policy object: total attempt count, backoff
//! schedule, and a `Retryable` classification supplied by the error type.
//! Only idempotent operations should be wrapped.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry policy with exponential backoff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry in milliseconds (default: 500ms)
    #[serde(default = "default_initial_delay")]
    pub initial_delay_ms: u64,

    /// Maximum delay between retries in milliseconds (default: 10s)
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,

    /// Multiplier for exponential backoff (default: 2.0)
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Whether to add jitter to prevent thundering herd (default: true)
    #[serde(default = "default_true")]
    pub jitter_enabled: bool,

    /// Maximum jitter factor (0.0 to 1.0, default: 0.1 = 10%)
    #[serde(default = "default_jitter_factor")]
    pub jitter_factor: f64,
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_initial_delay() -> u64 {
    500
}

const fn default_max_delay() -> u64 {
    10_000
}

const fn default_multiplier() -> f64 {
    2.0
}

const fn default_true() -> bool {
    true
}

const fn default_jitter_factor() -> f64 {
    0.1
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay(),
            max_delay_ms: default_max_delay(),
            multiplier: default_multiplier(),
            jitter_enabled: default_true(),
            jitter_factor: default_jitter_factor(),
        }
    }
}

impl RetryPolicy {
    /// Disable jitter, for deterministic schedules in tests
    #[must_use]
    pub const fn without_jitter(mut self) -> Self {
        self.jitter_enabled = false;
        self
    }

    /// Delay before the retry following attempt `attempt` (0-indexed)
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base_delay = (self.initial_delay_ms as f64) * self.multiplier.powi(attempt as i32);
        let capped_delay = base_delay.min(self.max_delay_ms as f64);

        let final_delay = if self.jitter_enabled {
            let jitter_range = capped_delay * self.jitter_factor;
            let jitter = rand::rng().random_range(-jitter_range..=jitter_range);
            (capped_delay + jitter).max(0.0)
        } else {
            capped_delay
        };

        Duration::from_millis(final_delay as u64)
    }
}

/// Classification of errors into retryable and terminal
pub trait Retryable {
    /// Whether another attempt could succeed
    fn is_retryable(&self) -> bool;
}

/// Execute an async operation under a retry policy.
///
/// Retries only while the error is retryable and attempts remain; the
/// caller sees a single final result, never intermediate failures.
pub async fn with_retry<F, Fut, T, E>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
{
    let mut attempts = 0u32;

    loop {
        attempts += 1;
        match operation().await {
            Ok(value) => {
                if attempts > 1 {
                    debug!(attempts, "Operation succeeded after retries");
                }
                return Ok(value);
            },
            Err(err) => {
                if !err.is_retryable() {
                    debug!(attempts, error = %err, "Terminal error, not retrying");
                    return Err(err);
                }
                if attempts >= policy.max_attempts {
                    warn!(
                        attempts,
                        max_attempts = policy.max_attempts,
                        error = %err,
                        "Retries exhausted"
                    );
                    return Err(err);
                }

                let delay = policy.delay_for_attempt(attempts - 1);
                warn!(
                    attempt = attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "Attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug)]
    struct TestError {
        retryable: bool,
    }

    impl std::fmt::Display for TestError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "test error")
        }
    }

    impl Retryable for TestError {
        fn is_retryable(&self) -> bool {
            self.retryable
        }
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            initial_delay_ms: 1,
            max_delay_ms: 10,
            ..RetryPolicy::default()
        }
        .without_jitter()
    }

    #[test]
    fn policy_defaults_match_provider_contract() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.initial_delay_ms, 500);
        assert!((policy.multiplier - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn backoff_doubles_without_jitter() {
        let policy = RetryPolicy::default().without_jitter();
        assert_eq!(policy.delay_for_attempt(0).as_millis(), 500);
        assert_eq!(policy.delay_for_attempt(1).as_millis(), 1000);
        assert_eq!(policy.delay_for_attempt(2).as_millis(), 2000);
    }

    #[test]
    fn backoff_capped_at_max_delay() {
        let policy = RetryPolicy::default().without_jitter();
        assert_eq!(policy.delay_for_attempt(10).as_millis(), 10_000);
    }

    #[test]
    fn jitter_stays_in_range() {
        let policy = RetryPolicy {
            initial_delay_ms: 1000,
            max_delay_ms: 1000,
            multiplier: 1.0,
            jitter_factor: 0.1,
            ..RetryPolicy::default()
        };
        for _ in 0..20 {
            let delay = policy.delay_for_attempt(0).as_millis();
            assert!((900..=1100).contains(&delay), "delay {delay} out of range");
        }
    }

    #[test]
    fn policy_deserializes_with_defaults() {
        let policy: RetryPolicy = serde_json::from_str("{\"max_attempts\":5}").expect("parse");
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.initial_delay_ms, 500);
    }

    #[tokio::test]
    async fn succeeds_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let result = with_retry(&fast_policy(), || {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, TestError>(7)
            }
        })
        .await;
        assert_eq!(result.expect("ok"), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_transient_failure_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let result = with_retry(&fast_policy(), || {
            let calls = Arc::clone(&calls);
            async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(TestError { retryable: true })
                } else {
                    Ok(7)
                }
            }
        })
        .await;
        assert_eq!(result.expect("ok"), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn stops_at_max_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let result: Result<i32, TestError> = with_retry(&fast_policy(), || {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(TestError { retryable: true })
            }
        })
        .await;
        assert!(result.is_err());
        // 3 total attempts, not 3 retries
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn terminal_error_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let result: Result<i32, TestError> = with_retry(&fast_policy(), || {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(TestError { retryable: false })
            }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
