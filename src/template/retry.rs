//! Bounded retry for write requests.
//!
//! The retry loop repeats a single-attempt operation while its failures match
//! the policy's predicate, waiting between attempts, until the attempt
//! succeeds or the attempt budget is spent. Only status-classified failures
//! are ever retried under the default predicate; transport faults and client
//! failures propagate on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::template::errors::{HttpError, RetriesExhaustedError};
use crate::template::response::Response;

/// How long to wait between attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaitStrategy {
    /// The same delay before every retry.
    Fixed(Duration),
    /// A delay that doubles after each failed attempt, capped at `max`.
    ExponentialBackoff {
        /// Delay after the first failed attempt.
        initial: Duration,
        /// Upper bound on any single delay.
        max: Duration,
    },
}

impl WaitStrategy {
    /// Returns the delay to apply after the given 1-based attempt fails.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match self {
            Self::Fixed(delay) => *delay,
            Self::ExponentialBackoff { initial, max } => {
                let multiplier = 2u32.saturating_pow(attempt.saturating_sub(1));
                let millis = initial
                    .as_millis()
                    .saturating_mul(u128::from(multiplier))
                    .min(max.as_millis());
                Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
            }
        }
    }
}

/// Retry policy for write requests.
///
/// Immutable after construction; a template holds one policy and applies it
/// to every retried operation.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use http_template::{RetryPolicy, WaitStrategy};
///
/// let policy = RetryPolicy {
///     max_attempts: 3,
///     wait: WaitStrategy::ExponentialBackoff {
///         initial: Duration::from_millis(250),
///         max: Duration::from_secs(8),
///     },
///     ..RetryPolicy::default()
/// };
/// assert_eq!(policy.max_attempts, 3);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first. Must be at least 1.
    pub max_attempts: u32,
    /// Wait applied between attempts.
    pub wait: WaitStrategy,
    /// Decides whether a failed attempt should be retried.
    pub retry_on: fn(&HttpError) -> bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            wait: WaitStrategy::Fixed(Duration::from_secs(1)),
            retry_on: is_retryable_failure,
        }
    }
}

/// The default retry predicate: only transient gateway statuses are retried.
#[must_use]
pub fn is_retryable_failure(error: &HttpError) -> bool {
    matches!(error, HttpError::RetryableStatus(_))
}

/// Runs `attempt` under `policy`, retrying failures the predicate accepts.
///
/// A failure the predicate rejects propagates immediately. When the attempt
/// budget runs out on a retryable status, the last failure is wrapped in
/// [`RetriesExhaustedError`]; a policy allowing only a single attempt
/// surfaces the raw failure instead.
pub(crate) async fn call_with_retry<F, Fut>(
    policy: &RetryPolicy,
    mut attempt: F,
) -> Result<Response, HttpError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Response, HttpError>>,
{
    let mut tries: u32 = 0;
    loop {
        tries += 1;
        let error = match attempt().await {
            Ok(response) => return Ok(response),
            Err(error) => error,
        };

        if !(policy.retry_on)(&error) {
            return Err(error);
        }

        if tries >= policy.max_attempts {
            return Err(match error {
                HttpError::RetryableStatus(last) if policy.max_attempts > 1 => {
                    RetriesExhaustedError {
                        attempts: tries,
                        last,
                    }
                    .into()
                }
                other => other,
            });
        }

        let delay = policy.wait.delay_after(tries);
        tracing::warn!(
            attempt = tries,
            max_attempts = policy.max_attempts,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "attempt failed, retrying: {error}"
        );
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::errors::RetryableStatusError;
    use crate::template::headers::Headers;
    use std::cell::Cell;

    fn transient(code: u16) -> HttpError {
        RetryableStatusError {
            code,
            method: "POST".to_string(),
            uri: "http://example.com/things".to_string(),
            message: String::new(),
        }
        .into()
    }

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            wait: WaitStrategy::Fixed(Duration::from_millis(10)),
            ..RetryPolicy::default()
        }
    }

    fn ok_response(code: u16) -> Response {
        Response::new(code, "hello", Headers::new())
    }

    #[test]
    fn test_fixed_wait_is_constant() {
        let wait = WaitStrategy::Fixed(Duration::from_millis(10));
        assert_eq!(wait.delay_after(1), Duration::from_millis(10));
        assert_eq!(wait.delay_after(4), Duration::from_millis(10));
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let wait = WaitStrategy::ExponentialBackoff {
            initial: Duration::from_millis(250),
            max: Duration::from_secs(1),
        };
        assert_eq!(wait.delay_after(1), Duration::from_millis(250));
        assert_eq!(wait.delay_after(2), Duration::from_millis(500));
        assert_eq!(wait.delay_after(3), Duration::from_millis(1000));
        assert_eq!(wait.delay_after(10), Duration::from_millis(1000));
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.wait, WaitStrategy::Fixed(Duration::from_secs(1)));
        assert!((policy.retry_on)(&transient(502)));
    }

    #[test]
    fn test_default_predicate_only_accepts_retryable_status() {
        assert!(is_retryable_failure(&transient(503)));
        assert!(!is_retryable_failure(&HttpError::Config(
            crate::error::ConfigError::MissingCodec
        )));
    }

    #[tokio::test]
    async fn test_success_on_first_attempt_makes_one_call() {
        let calls = Cell::new(0u32);
        let result = call_with_retry(&fast_policy(5), || {
            calls.set(calls.get() + 1);
            async { Ok(ok_response(201)) }
        })
        .await;

        assert_eq!(result.unwrap().code(), 201);
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let calls = Cell::new(0u32);
        let result = call_with_retry(&fast_policy(5), || {
            calls.set(calls.get() + 1);
            let outcome = if calls.get() < 3 {
                Err(transient(502))
            } else {
                Ok(ok_response(201))
            };
            async move { outcome }
        })
        .await;

        assert_eq!(result.unwrap().code(), 201);
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_wraps_last_failure() {
        let calls = Cell::new(0u32);
        let result = call_with_retry(&fast_policy(5), || {
            calls.set(calls.get() + 1);
            async { Err(transient(503)) }
        })
        .await;

        assert_eq!(calls.get(), 5);
        match result {
            Err(HttpError::RetriesExhausted(e)) => {
                assert_eq!(e.attempts, 5);
                assert_eq!(e.last.code, 503);
            }
            other => panic!("expected RetriesExhausted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_single_attempt_policy_surfaces_raw_failure() {
        let result = call_with_retry(&fast_policy(1), || async { Err(transient(502)) }).await;

        match result {
            Err(HttpError::RetryableStatus(e)) => assert_eq!(e.code, 502),
            other => panic!("expected RetryableStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_retryable_failure_propagates_immediately() {
        let calls = Cell::new(0u32);
        let result = call_with_retry(&fast_policy(5), || {
            calls.set(calls.get() + 1);
            async { Err(HttpError::Config(crate::error::ConfigError::MissingCodec)) }
        })
        .await;

        assert_eq!(calls.get(), 1);
        assert!(matches!(result, Err(HttpError::Config(_))));
    }

    #[tokio::test]
    async fn test_custom_predicate_controls_retry() {
        fn never(_: &HttpError) -> bool {
            false
        }

        let calls = Cell::new(0u32);
        let policy = RetryPolicy {
            retry_on: never,
            ..fast_policy(5)
        };
        let result = call_with_retry(&policy, || {
            calls.set(calls.get() + 1);
            async { Err(transient(502)) }
        })
        .await;

        assert_eq!(calls.get(), 1);
        assert!(matches!(result, Err(HttpError::RetryableStatus(_))));
    }
}
