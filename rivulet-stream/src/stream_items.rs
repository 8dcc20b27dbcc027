// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Adapters from plain value streams into the `StreamItem` item type.

use futures::{Stream, StreamExt};
use rivulet_core::StreamItem;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Extension trait lifting a plain value stream into the rivulet item type.
///
/// Every operator in this workspace consumes `Stream<Item = StreamItem<T>>`
/// so the failure channel can travel with the values. Sources that cannot
/// fail (channels, iterators) are lifted with this adapter.
pub trait IntoStreamItems<T>: Stream<Item = T> + Sized {
    /// Wraps every value in `StreamItem::Value`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rivulet_stream::IntoStreamItems;
    /// use futures::{stream, StreamExt};
    ///
    /// # async fn example() {
    /// let mut items = stream::iter(vec![1, 2]).stream_items();
    /// assert_eq!(items.next().await.unwrap().unwrap(), 1);
    /// # }
    /// ```
    fn stream_items(self) -> impl Stream<Item = StreamItem<T>> {
        self.map(StreamItem::Value)
    }
}

impl<S, T> IntoStreamItems<T> for S where S: Stream<Item = T> {}

/// Lifts a tokio unbounded receiver into a stream of `StreamItem<T>`.
///
/// The most common production entry point: values pushed from other tasks
/// become a rivulet pipeline source.
pub fn from_unbounded_receiver<T>(
    receiver: tokio::sync::mpsc::UnboundedReceiver<T>,
) -> impl Stream<Item = StreamItem<T>> {
    UnboundedReceiverStream::new(receiver).map(StreamItem::Value)
}
