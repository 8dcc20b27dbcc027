// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Distinct-until-changed operator that filters consecutive duplicates.

use futures::future::ready;
use futures::{Stream, StreamExt};
use parking_lot::Mutex;
use rivulet_core::StreamItem;
use std::sync::Arc;

/// Extension trait providing the `distinct_until_changed` operator.
pub trait DistinctUntilChangedExt<T>: Stream<Item = StreamItem<T>> + Sized
where
    T: Clone + PartialEq,
{
    /// Emits values only when they differ from the previously emitted value.
    ///
    /// # Behavior
    ///
    /// - The first value is always emitted (no previous value to compare)
    /// - Subsequent values are compared to the last emitted value
    /// - Errors are always propagated immediately and do not disturb the
    ///   comparison state
    ///
    /// # Example
    ///
    /// ```rust
    /// use rivulet_stream::{DistinctUntilChangedExt, IntoStreamItems};
    /// use futures::{stream, StreamExt};
    ///
    /// # async fn example() {
    /// let source = stream::iter(vec![1, 1, 2, 2, 3, 2]).stream_items();
    /// let distinct: Vec<i32> = source
    ///     .distinct_until_changed()
    ///     .map(|item| item.unwrap())
    ///     .collect()
    ///     .await;
    /// assert_eq!(distinct, vec![1, 2, 3, 2]);
    /// # }
    /// ```
    fn distinct_until_changed(self) -> impl Stream<Item = StreamItem<T>>;
}

impl<S, T> DistinctUntilChangedExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
    T: Clone + PartialEq,
{
    fn distinct_until_changed(self) -> impl Stream<Item = StreamItem<T>> {
        let last_value: Arc<Mutex<Option<T>>> = Arc::new(Mutex::new(None));

        self.filter_map(move |item| {
            let last_value = Arc::clone(&last_value);
            ready(match item {
                StreamItem::Value(value) => {
                    let mut last = last_value.lock();
                    let should_emit = match last.as_ref() {
                        None => true,
                        Some(prev) => value != *prev,
                    };

                    if should_emit {
                        *last = Some(value.clone());
                        Some(StreamItem::Value(value))
                    } else {
                        None
                    }
                }
                StreamItem::Error(e) => Some(StreamItem::Error(e)),
            })
        })
    }
}
