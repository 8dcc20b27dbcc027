// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Start-with operator that prepends an initial value.

use futures::{stream, Stream, StreamExt};
use rivulet_core::StreamItem;

/// Extension trait providing the `start_with` operator.
pub trait StartWithExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Emits `initial` before any value from the source stream.
    fn start_with(self, initial: T) -> impl Stream<Item = StreamItem<T>> {
        stream::iter([StreamItem::Value(initial)]).chain(self)
    }
}

impl<S, T> StartWithExt<T> for S where S: Stream<Item = StreamItem<T>> {}
