// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Rivulet: resilience and flow-control combinators for async streams.
//!
//! This facade crate re-exports the whole public surface of the workspace:
//!
//! - [`rivulet_core`] — `StreamItem`, errors, cancellation, subjects
//! - [`rivulet_stream`] — untimed operators, multicast share, state machines
//! - [`rivulet_stream_time`] — debounce/throttle/audit/timeout/heartbeat,
//!   rate limiting, batching, typeahead and field validation
//! - [`rivulet_resilience`] — retry with backoff, circuit breaking, polling,
//!   optimistic updates, progress tracking, auto-refresh
//!
//! # Example
//!
//! ```rust
//! use rivulet_rx::prelude::*;
//! use rivulet_rx::StreamItem;
//! use futures::{stream, StreamExt};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let distinct: Vec<i32> = stream::iter(vec![1, 1, 2])
//!     .stream_items()
//!     .distinct_until_changed()
//!     .map(StreamItem::unwrap)
//!     .collect()
//!     .await;
//! assert_eq!(distinct, vec![1, 2]);
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub use rivulet_core::{
    CancellationToken, ConfigError, Result, RivuletError, RivuletSubject, RivuletTask, StreamItem,
    SubjectError,
};
pub use rivulet_resilience::{
    auto_refresh, optimistic_update, poll, progress_tracker, retry_with_backoff,
    retry_with_backoff_observed, CircuitBreaker, CircuitState, PollingConfig, RetryConfig,
};
pub use rivulet_stream::{
    run_state_machine, switch_on, Changed, ShareLatest, SharedStream, StateMachineSpec,
    WithPrevious,
};
pub use rivulet_stream_time::{
    heartbeat, search_stream, typeahead, validate_field, BatchSpec, RateLimitStrategy,
    SearchFailurePolicy, ValidationOutcome,
};

/// Everything needed to compose pipelines: all operator extension traits
/// plus the free-function entry points.
pub mod prelude {
    pub use rivulet_stream::prelude::*;
    pub use rivulet_stream_time::prelude::*;

    pub use rivulet_resilience::{
        auto_refresh, optimistic_update, poll, progress_tracker, retry_with_backoff,
        retry_with_backoff_observed,
    };
    pub use rivulet_stream::{run_state_machine, switch_on};
    pub use rivulet_stream_time::{heartbeat, search_stream, typeahead, validate_field};
}
