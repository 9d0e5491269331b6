// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use tracing::warn;

/// How the delay between attempts grows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    Fixed,
    /// Delay is multiplied by `multiplier` after every failed attempt
    Exponential { multiplier: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first; treated as at least 1
    pub attempts: u32,
    pub delay: Duration,
    pub backoff: Backoff,
    /// Upper bound for any single delay
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn fixed(attempts: u32, delay: Duration) -> Self {
        Self {
            attempts,
            delay,
            backoff: Backoff::Fixed,
            max_delay: delay,
        }
    }

    pub fn exponential(attempts: u32, delay: Duration, multiplier: f64, max_delay: Duration) -> Self {
        Self {
            attempts,
            delay,
            backoff: Backoff::Exponential { multiplier },
            max_delay,
        }
    }

    /// Delay before the attempt following failed attempt number `attempt` (0-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = match self.backoff {
            Backoff::Fixed => 1.0,
            Backoff::Exponential { multiplier } => {
                multiplier.max(1.0).powi(i32::try_from(attempt).unwrap_or(i32::MAX))
            }
        };

        let nanos = self.delay.as_nanos() as f64 * factor;
        if nanos >= self.max_delay.as_nanos() as f64 {
            self.max_delay
        } else {
            Duration::from_nanos(nanos as u64)
        }
    }
}

/// Run `operation` until it succeeds or the policy's attempts are used up.
///
/// Returns the last error when every attempt fails.
pub async fn retry<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> anyhow::Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let attempts = policy.attempts.max(1);
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt + 1 >= attempts => {
                return Err(error.context(format!("gave up after {} attempts", attempts)))
            }
            Err(error) => {
                let delay = policy.delay_after(attempt);
                warn!(
                    attempt = attempt + 1,
                    attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %format!("{:#}", error),
                    "Attempt failed; retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// Fail with an error if `operation` does not finish within `duration`.
pub async fn with_timeout<T, Fut>(duration: Duration, operation: Fut) -> anyhow::Result<T>
where
    Fut: Future<Output = anyhow::Result<T>>,
{
    tokio::time::timeout(duration, operation)
        .await
        .with_context(|| format!("operation timed out after {}ms", duration.as_millis()))?
}

pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
