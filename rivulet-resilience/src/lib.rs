// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod auto_refresh;
pub mod circuit_breaker;
pub mod optimistic;
pub mod poll;
pub mod progress;
pub mod retry;

pub use self::auto_refresh::auto_refresh;
pub use self::circuit_breaker::{CircuitBreaker, CircuitState};
pub use self::optimistic::optimistic_update;
pub use self::poll::{poll, PollingConfig};
pub use self::progress::progress_tracker;
pub use self::retry::{retry_with_backoff, retry_with_backoff_observed, RetryConfig};
