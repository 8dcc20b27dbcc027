// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Failure-counting circuit breaker guarding a wrapped operation.

use parking_lot::Mutex;
use rivulet_core::{ConfigError, Result, RivuletError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// The breaker's position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CircuitState {
    /// Calls flow through; consecutive failures are being counted
    Closed,
    /// Calls fail fast until the recovery timeout elapses
    Open {
        /// When the circuit opened (or last refreshed on failure)
        opened_at: Instant,
    },
    /// The recovery timeout elapsed; the next call probes the dependency
    HalfOpen,
}

struct BreakerState {
    circuit: CircuitState,
    consecutive_failures: u32,
}

/// A circuit breaker that fails fast after repeated failures and
/// periodically re-probes recovery.
///
/// The breaker is shared deliberately: clone it (cheap, `Arc` inside) and
/// guard every call to one dependency with the same instance. State
/// transitions are applied atomically under one lock; the wrapped operation
/// itself runs outside the lock, so concurrent calls never serialize on the
/// dependency.
///
/// # Example
///
/// ```rust
/// use rivulet_resilience::CircuitBreaker;
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> anyhow::Result<()> {
/// let breaker = CircuitBreaker::new(5, Duration::from_secs(60))?;
/// let value = breaker.call(|| async { Ok("response") }).await?;
/// assert_eq!(value, "response");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CircuitBreaker {
    state: Arc<Mutex<BreakerState>>,
    failure_threshold: u32,
    recovery_timeout: Duration,
}

impl CircuitBreaker {
    /// Creates a closed breaker.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `failure_threshold` is zero.
    pub fn new(
        failure_threshold: u32,
        recovery_timeout: Duration,
    ) -> std::result::Result<Self, ConfigError> {
        if failure_threshold == 0 {
            return Err(ConfigError::NotPositive {
                field: "failure_threshold",
            });
        }
        Ok(Self {
            state: Arc::new(Mutex::new(BreakerState {
                circuit: CircuitState::Closed,
                consecutive_failures: 0,
            })),
            failure_threshold,
            recovery_timeout,
        })
    }

    /// Runs `operation` through the breaker.
    ///
    /// While Open and unexpired, fails immediately with
    /// [`RivuletError::CircuitOpen`] **without invoking the operation**. An
    /// expired Open transitions to HalfOpen and the call proceeds as a
    /// probe. A success resets the failure count and closes the circuit; a
    /// failure increments the count, refreshes the open timestamp where
    /// applicable, and re-surfaces the original error unchanged — the
    /// breaker never masks the underlying failure.
    ///
    /// # Errors
    ///
    /// `CircuitOpen` on fail-fast rejection, otherwise whatever the
    /// operation returned.
    pub async fn call<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.admit()?;

        match operation().await {
            Ok(value) => {
                self.record_success();
                Ok(value)
            }
            Err(err) => {
                self.record_failure();
                Err(err)
            }
        }
    }

    /// The current state.
    pub fn state(&self) -> CircuitState {
        self.state.lock().circuit
    }

    /// The current consecutive-failure count.
    pub fn consecutive_failures(&self) -> u32 {
        self.state.lock().consecutive_failures
    }

    fn admit(&self) -> Result<()> {
        let mut state = self.state.lock();
        match state.circuit {
            CircuitState::Closed | CircuitState::HalfOpen => Ok(()),
            CircuitState::Open { opened_at } => {
                if opened_at.elapsed() >= self.recovery_timeout {
                    state.circuit = CircuitState::HalfOpen;
                    Ok(())
                } else {
                    Err(RivuletError::CircuitOpen)
                }
            }
        }
    }

    fn record_success(&self) {
        let mut state = self.state.lock();
        state.consecutive_failures = 0;
        state.circuit = CircuitState::Closed;
    }

    fn record_failure(&self) {
        let mut state = self.state.lock();
        state.consecutive_failures += 1;

        state.circuit = match state.circuit {
            // A failed probe, or a failure racing an already-open circuit,
            // refreshes the open timestamp
            CircuitState::HalfOpen | CircuitState::Open { .. } => CircuitState::Open {
                opened_at: Instant::now(),
            },
            CircuitState::Closed => {
                if state.consecutive_failures >= self.failure_threshold {
                    CircuitState::Open {
                        opened_at: Instant::now(),
                    }
                } else {
                    CircuitState::Closed
                }
            }
        };
    }
}
