// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Combine-with-previous operator that pairs each value with its predecessor.

use futures::future::ready;
use futures::{Stream, StreamExt};
use rivulet_core::StreamItem;

/// A value paired with its previous value in the stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithPrevious<T> {
    /// The previous value in the stream, if any
    pub previous: Option<T>,
    /// The current value in the stream
    pub current: T,
}

impl<T> WithPrevious<T> {
    /// Creates a new pairing of previous and current values.
    pub fn new(previous: Option<T>, current: T) -> Self {
        Self { previous, current }
    }

    /// Returns `true` if there is a previous value.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Returns references to `(previous, current)` if a previous value exists.
    pub fn as_pair(&self) -> Option<(&T, &T)> {
        self.previous.as_ref().map(|prev| (prev, &self.current))
    }
}

/// Extension trait providing the `combine_with_previous` operator.
pub trait CombineWithPreviousExt<T>: Stream<Item = StreamItem<T>> + Sized
where
    T: Clone,
{
    /// Pairs each stream element with its previous element.
    ///
    /// The first element is emitted with `previous = None`; every later
    /// element carries the one before it. Errors pass through without
    /// touching the pairing state.
    fn combine_with_previous(self) -> impl Stream<Item = StreamItem<WithPrevious<T>>>;
}

impl<S, T> CombineWithPreviousExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
    T: Clone,
{
    fn combine_with_previous(self) -> impl Stream<Item = StreamItem<WithPrevious<T>>> {
        self.scan(None, |state: &mut Option<T>, item: StreamItem<T>| {
            ready(Some(match item {
                StreamItem::Value(current) => {
                    let previous = state.take();
                    *state = Some(current.clone());
                    StreamItem::Value(WithPrevious::new(previous, current))
                }
                StreamItem::Error(e) => StreamItem::Error(e),
            }))
        })
    }
}
