// src/utils/retry.rs

//! Bounded retry with a fixed backoff.

use std::future::Future;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::FetchConfig;

/// Attempt budget and delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &FetchConfig) -> Self {
        Self::new(config.max_attempts, config.retry_delay())
    }
}

/// Run `operation` until it succeeds or the budget is spent.
///
/// Non-retryable errors (see [`AppError::is_retryable`]) end the loop early.
/// Running out of attempts yields [`AppError::RetryExhausted`] wrapping the
/// last error, so callers can skip the unit of work and move on.
pub async fn retry<T, F, Fut>(policy: &RetryPolicy, context: &str, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt < policy.max_attempts && error.is_retryable() => {
                log::warn!(
                    "{} attempt {}/{} failed: {}",
                    context,
                    attempt,
                    policy.max_attempts,
                    error
                );
                if !policy.delay.is_zero() {
                    tokio::time::sleep(policy.delay).await;
                }
            }
            Err(error) => {
                return Err(AppError::RetryExhausted {
                    context: context.to_string(),
                    attempts: attempt,
                    last: Box::new(error),
                });
            }
        }
    }
}
