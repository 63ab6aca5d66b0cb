// src/error_recovery.rs
//! Retry with exponential backoff for API operations.

use crate::error::AppError;
use std::time::Duration;

/// How hard the transport tries before giving up on a request.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(16),
        }
    }
}

/// Whether an error is transient: rate limits, 5xx, dropped connections.
pub fn is_transient(error: &AppError) -> bool {
    match error {
        AppError::NotionService { code, .. } => code.is_retryable(),
        AppError::NetworkFailure(e) => e.is_timeout() || e.is_connect() || e.is_request(),
        _ => false,
    }
}

/// Retries an async operation with exponential backoff.
///
/// Only transient errors are retried; anything else is returned at once.
pub async fn retry_with_backoff<F, T, Fut>(mut operation: F, policy: RetryPolicy) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, AppError>>,
{
    let mut delay = policy.initial_delay;
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if attempt < policy.max_attempts && is_transient(&e) => {
                log::warn!(
                    "Attempt {} failed ({}), retrying after {:?}",
                    attempt,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                delay = std::cmp::min(delay * 2, policy.max_delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotionErrorCode;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        }
    }

    fn rate_limited() -> AppError {
        AppError::NotionService {
            code: NotionErrorCode::RateLimited,
            message: "slow down".into(),
            status: reqwest::StatusCode::TOO_MANY_REQUESTS,
        }
    }

    #[tokio::test]
    async fn transient_errors_are_retried_until_success() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = retry_with_backoff(
            move || async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(rate_limited())
                } else {
                    Ok("done")
                }
            },
            fast_policy(),
        )
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn permanent_errors_fail_immediately() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), AppError> = retry_with_backoff(
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(AppError::MalformedResponse("bad".into()))
            },
            fast_policy(),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), AppError> = retry_with_backoff(
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(rate_limited())
            },
            fast_policy(),
        )
        .await;

        assert!(matches!(result, Err(AppError::NotionService { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
