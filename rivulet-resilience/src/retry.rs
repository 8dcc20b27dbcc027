// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Retry controller with capped exponential backoff.

use rivulet_core::{ConfigError, Result, RivuletError};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Configuration for [`retry_with_backoff`].
///
/// The delay before retry *n* (1-indexed) is
/// `min(base_delay * backoff_multiplier^(n-1), max_delay)`.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    max_attempts: u32,
    base_delay: Duration,
    backoff_multiplier: f64,
    max_delay: Duration,
}

impl RetryConfig {
    /// Default backoff multiplier: doubling delays.
    pub const DEFAULT_MULTIPLIER: f64 = 2.0;

    /// Default delay cap.
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

    /// Creates a config allowing `max_attempts` retries after the initial
    /// attempt, with the default multiplier and cap.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_attempts` is zero.
    pub fn new(max_attempts: u32, base_delay: Duration) -> std::result::Result<Self, ConfigError> {
        if max_attempts == 0 {
            return Err(ConfigError::NotPositive {
                field: "max_attempts",
            });
        }
        Ok(Self {
            max_attempts,
            base_delay,
            backoff_multiplier: Self::DEFAULT_MULTIPLIER,
            max_delay: Self::DEFAULT_MAX_DELAY,
        })
    }

    /// Replaces the backoff multiplier.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `multiplier` is below 1.0 — that would
    /// shrink delays instead of growing them.
    pub fn with_backoff_multiplier(
        mut self,
        multiplier: f64,
    ) -> std::result::Result<Self, ConfigError> {
        if !multiplier.is_finite() || multiplier < 1.0 {
            return Err(ConfigError::MultiplierTooSmall(multiplier));
        }
        self.backoff_multiplier = multiplier;
        Ok(self)
    }

    /// Replaces the delay cap.
    #[must_use]
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Maximum number of retries after the initial attempt.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before the first retry.
    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Growth factor between consecutive retry delays.
    pub fn backoff_multiplier(&self) -> f64 {
        self.backoff_multiplier
    }

    /// Upper bound on any single delay.
    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// Computes the delay before retry `retry` (1-indexed).
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(i32::MAX as u32) as i32;
        let scaled = self.base_delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);

        if !scaled.is_finite() || scaled >= self.max_delay.as_secs_f64() {
            self.max_delay
        } else {
            Duration::from_secs_f64(scaled)
        }
    }
}

/// Invokes `operation`, retrying failures with capped exponential backoff.
///
/// On failure, if fewer than `config.max_attempts()` retries have been made,
/// waits the computed backoff delay and re-invokes. Once the attempt budget
/// is exhausted, surfaces [`RivuletError::RetriesExhausted`] carrying the
/// last underlying failure. A success resets nothing — this is a single
/// bounded-attempt policy, not a circuit.
///
/// # Errors
///
/// Returns `RetriesExhausted` wrapping the final failure once all retries
/// have been spent.
///
/// # Example
///
/// ```rust
/// use rivulet_resilience::{retry_with_backoff, RetryConfig};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> anyhow::Result<()> {
/// let config = RetryConfig::new(3, Duration::from_millis(100))?;
/// let value = retry_with_backoff(&config, || async { Ok(42) }).await?;
/// assert_eq!(value, 42);
/// # Ok(())
/// # }
/// ```
pub async fn retry_with_backoff<T, F, Fut>(config: &RetryConfig, operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    retry_with_backoff_observed(config, operation, |_, _| {}).await
}

/// [`retry_with_backoff`] with an observability hook.
///
/// `on_retry(attempt, &error)` is invoked before each backoff wait, with the
/// 1-indexed retry number about to run. The controller itself performs no
/// logging; the hook is the integration point for telemetry.
///
/// # Errors
///
/// Returns `RetriesExhausted` wrapping the final failure once all retries
/// have been spent.
pub async fn retry_with_backoff_observed<T, F, Fut, O>(
    config: &RetryConfig,
    mut operation: F,
    mut on_retry: O,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    O: FnMut(u32, &RivuletError),
{
    let mut retries = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if retries >= config.max_attempts() {
                    return Err(RivuletError::retries_exhausted(retries, err));
                }
                retries += 1;
                on_retry(retries, &err);
                sleep(config.delay_for_retry(retries)).await;
            }
        }
    }
}
