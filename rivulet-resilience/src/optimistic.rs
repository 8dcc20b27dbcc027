// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Optimistic update with explicit rollback.

use futures::{stream, Stream};
use rivulet_core::{Result, StreamItem};
use std::future::Future;

/// Emits `optimistic` synchronously, then the outcome of `operation`.
///
/// On success the operation's result supersedes the optimistic value for
/// consumers that care about final state. On failure, `rollback` is emitted
/// if provided; otherwise the failure surfaces through the failure channel.
/// Passing a rollback value is the explicit, per-call-site choice to absorb
/// the failure.
///
/// # Example
///
/// ```rust
/// use rivulet_resilience::optimistic_update;
/// use futures::StreamExt;
///
/// # #[tokio::main]
/// # async fn main() {
/// let updates: Vec<i32> = optimistic_update(1, async { Ok(2) }, None)
///     .map(|item| item.unwrap())
///     .collect()
///     .await;
/// assert_eq!(updates, vec![1, 2]);
/// # }
/// ```
pub fn optimistic_update<T, Fut>(
    optimistic: T,
    operation: Fut,
    rollback: Option<T>,
) -> impl Stream<Item = StreamItem<T>>
where
    Fut: Future<Output = Result<T>>,
{
    stream::iter([StreamItem::Value(optimistic)]).chain(stream::once(async move {
        match operation.await {
            Ok(value) => StreamItem::Value(value),
            Err(err) => match rollback {
                Some(value) => StreamItem::Value(value),
                None => StreamItem::Error(err),
            },
        }
    }))
}
