// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Scan operator for stateful accumulation.

use futures::{Stream, StreamExt};
use parking_lot::Mutex;
use rivulet_core::StreamItem;
use std::sync::Arc;

/// Extension trait providing the `scan_items` fold operator.
pub trait ScanStreamExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Accumulates state across stream items, emitting each intermediate
    /// result.
    ///
    /// The accumulator function receives the current state and each incoming
    /// value and returns the output for that value. State updates are
    /// serialized per operator instance; errors are propagated without
    /// touching the accumulator.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rivulet_stream::{IntoStreamItems, ScanStreamExt};
    /// use futures::{stream, StreamExt};
    ///
    /// # async fn example() {
    /// let sums: Vec<i32> = stream::iter(vec![1, 2, 3])
    ///     .stream_items()
    ///     .scan_items(0, |acc, value| {
    ///         *acc += value;
    ///         *acc
    ///     })
    ///     .map(|item| item.unwrap())
    ///     .collect()
    ///     .await;
    /// assert_eq!(sums, vec![1, 3, 6]);
    /// # }
    /// ```
    fn scan_items<Acc, Out, F>(self, initial: Acc, f: F) -> impl Stream<Item = StreamItem<Out>>
    where
        F: FnMut(&mut Acc, &T) -> Out;
}

impl<S, T> ScanStreamExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn scan_items<Acc, Out, F>(self, initial: Acc, f: F) -> impl Stream<Item = StreamItem<Out>>
    where
        F: FnMut(&mut Acc, &T) -> Out,
    {
        let state = Arc::new(Mutex::new((initial, f)));

        self.map(move |item| {
            let state = Arc::clone(&state);
            match item {
                StreamItem::Value(value) => {
                    let mut guard = state.lock();
                    let (acc, f) = &mut *guard;
                    StreamItem::Value(f(acc, &value))
                }
                StreamItem::Error(e) => StreamItem::Error(e),
            }
        })
    }
}
