// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Interval-driven re-execution gated by a cancellation token.

use futures::Stream;
use rivulet_core::{CancellationToken, Result, StreamItem};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Re-runs `factory` immediately and then every `interval` until `cancel`
/// fires.
///
/// Cancellation is observed before any further delivery: a token cancelled
/// mid-wait or mid-operation ends the stream without emitting again. A
/// failure propagates through the failure channel and ends the stream.
pub fn auto_refresh<T, F, Fut>(
    factory: F,
    interval: Duration,
    cancel: CancellationToken,
) -> impl Stream<Item = StreamItem<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    struct RefreshState<F> {
        factory: F,
        interval: Duration,
        cancel: CancellationToken,
        first: bool,
        done: bool,
    }

    let state = RefreshState {
        factory,
        interval,
        cancel,
        first: true,
        done: false,
    };

    futures::stream::unfold(state, |mut state| async move {
        if state.done || state.cancel.is_cancelled() {
            return None;
        }

        let cancel = state.cancel.clone();

        if !state.first {
            tokio::select! {
                () = cancel.cancelled() => return None,
                () = sleep(state.interval) => {}
            }
        }
        state.first = false;

        let result = tokio::select! {
            () = cancel.cancelled() => return None,
            result = (state.factory)() => result,
        };

        match result {
            Ok(value) => Some((StreamItem::Value(value), state)),
            Err(err) => {
                state.done = true;
                Some((StreamItem::Error(err), state))
            }
        }
    })
}
