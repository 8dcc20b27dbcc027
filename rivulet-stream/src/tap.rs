// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Tap operator for observing values without consuming them.

use futures::{Stream, StreamExt};
use rivulet_core::StreamItem;

/// Extension trait providing the `tap_items` side-effect operator.
pub trait TapExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Invokes `f` on each value as it passes through, leaving the stream
    /// unchanged.
    ///
    /// Errors pass through untouched; use
    /// [`OnErrorExt`](crate::on_error::OnErrorExt) to observe those.
    fn tap_items<F>(self, mut f: F) -> impl Stream<Item = StreamItem<T>>
    where
        F: FnMut(&T),
    {
        self.map(move |item| {
            if let StreamItem::Value(value) = &item {
                f(value);
            }
            item
        })
    }
}

impl<S, T> TapExt<T> for S where S: Stream<Item = StreamItem<T>> {}
