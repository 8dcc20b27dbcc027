// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Comparison operator that emits previous/current pairs when values change.

use crate::combine_with_previous::CombineWithPreviousExt;
use futures::future::ready;
use futures::{Stream, StreamExt};
use rivulet_core::StreamItem;

/// A change notification carrying the value before and after the transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Changed<T> {
    /// The value before the change
    pub previous: T,
    /// The value after the change
    pub current: T,
}

/// Extension trait providing the `changes` comparison operator.
pub trait ChangesExt<T>: Stream<Item = StreamItem<T>> + Sized
where
    T: Clone,
{
    /// Emits `Changed { previous, current }` pairs whenever two consecutive
    /// values differ under `PartialEq`.
    ///
    /// The first value produces no pair (there is nothing to compare it to).
    fn changes(self) -> impl Stream<Item = StreamItem<Changed<T>>>
    where
        T: PartialEq,
    {
        self.changes_by(|previous, current| previous == current)
    }

    /// Emits `Changed` pairs using a caller-supplied comparer.
    ///
    /// `comparer(previous, current)` returns `true` when the two values are
    /// considered equal; pairs are emitted only for values the comparer does
    /// not consider equal.
    fn changes_by<F>(self, comparer: F) -> impl Stream<Item = StreamItem<Changed<T>>>
    where
        F: Fn(&T, &T) -> bool;
}

impl<S, T> ChangesExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
    T: Clone,
{
    fn changes_by<F>(self, comparer: F) -> impl Stream<Item = StreamItem<Changed<T>>>
    where
        F: Fn(&T, &T) -> bool,
    {
        self.combine_with_previous().filter_map(move |item| {
            ready(match item {
                StreamItem::Value(pair) => match pair.previous {
                    Some(previous) if !comparer(&previous, &pair.current) => {
                        Some(StreamItem::Value(Changed {
                            previous,
                            current: pair.current,
                        }))
                    }
                    _ => None,
                },
                StreamItem::Error(e) => Some(StreamItem::Error(e)),
            })
        })
    }
}
