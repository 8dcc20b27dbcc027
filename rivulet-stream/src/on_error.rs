// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! On-error operator for handling stream failures with handler functions.

use futures::future::ready;
use futures::{Stream, StreamExt};
use rivulet_core::{RivuletError, StreamItem};

/// Extension trait providing the `on_error` operator.
pub trait OnErrorExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Handles errors in the stream with a handler function.
    ///
    /// The handler receives a reference to each error and returns:
    /// - `true` to consume the error (remove it from the stream)
    /// - `false` to propagate the error downstream
    ///
    /// Consuming an error here is the explicit, per-call-site fallback
    /// choice; no operator in this library swallows failures on its own.
    /// Multiple `on_error` operators can be chained to form a chain of
    /// responsibility.
    fn on_error<F>(self, mut handler: F) -> impl Stream<Item = StreamItem<T>>
    where
        F: FnMut(&RivuletError) -> bool,
    {
        self.filter_map(move |item| {
            ready(match item {
                StreamItem::Error(err) => {
                    if handler(&err) {
                        None
                    } else {
                        Some(StreamItem::Error(err))
                    }
                }
                other => Some(other),
            })
        })
    }
}

impl<S, T> OnErrorExt<T> for S where S: Stream<Item = StreamItem<T>> {}
