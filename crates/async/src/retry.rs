//! Retry logic with optional exponential backoff.
//!
//! Repeats an asynchronous outcome-producing operation under a bounded
//! number of attempts. The first success returns immediately; after the
//! attempts are exhausted the last observed failure is returned verbatim,
//! never a synthesized "retries exhausted" error. Delay growth happens
//! strictly after a failed attempt, never before the first one.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use shunt_core::{ErrorCode, Failure, Outcome};

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first. Must be positive.
    pub max_attempts: u32,
    /// Delay between unsuccessful attempts.
    pub delay: Duration,
    /// Multiplier applied to the delay after every failed attempt. Must be
    /// positive; `1.0` keeps the delay fixed.
    pub backoff_multiplier: f64,
    /// Cap on delay growth.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(100),
            backoff_multiplier: 2.0,
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub const fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub const fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    #[must_use]
    pub const fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Run `operation` under this policy.
    ///
    /// # Panics
    ///
    /// Panics when `max_attempts` is zero or `backoff_multiplier` is not
    /// positive - both are programmer errors at the call site, not
    /// failures to hand back down the pipeline.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Outcome<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Outcome<T>>,
    {
        assert!(self.max_attempts > 0, "max_attempts must be positive");
        assert!(
            self.backoff_multiplier > 0.0,
            "backoff_multiplier must be positive"
        );

        let mut delay = self.delay;
        let mut last_failure = None;

        for attempt in 1..=self.max_attempts {
            match operation().await {
                success @ Outcome::Success(_) => {
                    if attempt > 1 {
                        debug!(attempt, "operation succeeded after retry");
                    }
                    return success;
                }
                Outcome::Failure(failure) => {
                    warn!(
                        attempt,
                        remaining = self.max_attempts - attempt,
                        code = %failure.code,
                        "attempt failed"
                    );
                    last_failure = Some(failure);
                    if attempt < self.max_attempts {
                        if !delay.is_zero() {
                            debug!(attempt, delay_ms = delay.as_millis() as u64, "waiting before retry");
                            tokio::time::sleep(delay).await;
                        }
                        if self.backoff_multiplier != 1.0 {
                            delay = delay.mul_f64(self.backoff_multiplier).min(self.max_delay);
                        }
                    }
                }
            }
        }

        // max_attempts > 0 guarantees at least one recorded failure.
        Outcome::Failure(last_failure.unwrap_or_else(|| Failure::new(ErrorCode::UNKNOWN)))
    }
}

/// Retry with a fixed optional delay between attempts.
pub async fn retry<T, F, Fut>(operation: F, max_attempts: u32, delay: Option<Duration>) -> Outcome<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Outcome<T>>,
{
    let delay = delay.unwrap_or(Duration::ZERO);
    RetryPolicy {
        max_attempts,
        delay,
        backoff_multiplier: 1.0,
        max_delay: delay,
    }
    .run(operation)
    .await
}

/// Retry with the delay multiplied by `backoff_multiplier` after every
/// failed attempt.
pub async fn retry_with_backoff<T, F, Fut>(
    operation: F,
    max_attempts: u32,
    initial_delay: Duration,
    backoff_multiplier: f64,
) -> Outcome<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Outcome<T>>,
{
    RetryPolicy::default()
        .with_max_attempts(max_attempts)
        .with_delay(initial_delay)
        .with_backoff_multiplier(backoff_multiplier)
        .run(operation)
        .await
}
