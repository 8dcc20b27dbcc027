// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Polling driver that repeats an operation on an interval.

use futures::Stream;
use rivulet_core::{ConfigError, Result, StreamItem};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

type StopCondition<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Configuration for the [`poll`] driver.
pub struct PollingConfig<T> {
    interval: Duration,
    max_attempts: Option<u32>,
    stop_condition: Option<StopCondition<T>>,
}

impl<T> PollingConfig<T> {
    /// Creates a config polling every `interval`, unbounded and without a
    /// stop condition.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
            stop_condition: None,
        }
    }

    /// Caps the number of attempts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_attempts` is zero.
    pub fn with_max_attempts(
        mut self,
        max_attempts: u32,
    ) -> std::result::Result<Self, ConfigError> {
        if max_attempts == 0 {
            return Err(ConfigError::NotPositive {
                field: "max_attempts",
            });
        }
        self.max_attempts = Some(max_attempts);
        Ok(self)
    }

    /// Stops polling once an emitted value satisfies `condition`
    /// (inclusive: that value is still emitted).
    #[must_use]
    pub fn with_stop_condition<F>(mut self, condition: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.stop_condition = Some(Box::new(condition));
        self
    }

    /// The wait between consecutive attempts.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The attempt cap, if any.
    pub fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    fn should_stop(&self, value: &T) -> bool {
        self.stop_condition
            .as_ref()
            .is_some_and(|condition| condition(value))
    }
}

impl<T> fmt::Debug for PollingConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollingConfig")
            .field("interval", &self.interval)
            .field("max_attempts", &self.max_attempts)
            .field("stop_condition", &self.stop_condition.is_some())
            .finish()
    }
}

/// Repeats `factory` on an interval, emitting each result.
///
/// Attempt 1 runs immediately (no initial delay); `config.interval()`
/// elapses between subsequent attempts. The stream terminates after
/// emitting a value that satisfies the stop condition, after
/// `config.max_attempts()` attempts, or after emitting an operation failure
/// on the failure channel. Dropping the stream stops scheduling and aborts
/// the in-flight attempt's continuation.
///
/// # Example
///
/// ```rust
/// use rivulet_resilience::{poll, PollingConfig};
/// use futures::StreamExt;
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> anyhow::Result<()> {
/// let config = PollingConfig::new(Duration::from_millis(50))
///     .with_max_attempts(3)?
///     .with_stop_condition(|n: &u32| *n >= 2);
///
/// let mut attempts = 0u32;
/// let results: Vec<u32> = poll(
///     move || {
///         attempts += 1;
///         let current = attempts;
///         async move { Ok(current) }
///     },
///     config,
/// )
/// .map(|item| item.unwrap())
/// .collect()
/// .await;
///
/// assert_eq!(results, vec![1, 2]);
/// # Ok(())
/// # }
/// ```
pub fn poll<T, F, Fut>(factory: F, config: PollingConfig<T>) -> impl Stream<Item = StreamItem<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    struct PollState<F, T> {
        factory: F,
        config: PollingConfig<T>,
        attempt: u32,
        done: bool,
    }

    let state = PollState {
        factory,
        config,
        attempt: 0,
        done: false,
    };

    futures::stream::unfold(state, |mut state| async move {
        if state.done {
            return None;
        }
        if state
            .config
            .max_attempts()
            .is_some_and(|max| state.attempt >= max)
        {
            return None;
        }

        // Attempt 1 is immediate; later attempts wait out the interval
        if state.attempt > 0 {
            sleep(state.config.interval()).await;
        }
        state.attempt += 1;

        match (state.factory)().await {
            Ok(value) => {
                if state.config.should_stop(&value) {
                    state.done = true;
                }
                Some((StreamItem::Value(value), state))
            }
            Err(err) => {
                state.done = true;
                Some((StreamItem::Error(err), state))
            }
        }
    })
}
