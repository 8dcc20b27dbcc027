// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Map-latest operator: switch semantics over an async computation.

use futures::Stream;
use pin_project::pin_project;
use rivulet_core::StreamItem;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Extension trait providing the `map_latest` operator.
pub trait MapLatestExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Starts an async computation for each upstream value, keeping only the
    /// latest.
    ///
    /// When a new value arrives while a computation is still in flight, the
    /// in-flight future is dropped (cancelled) and replaced by the one for
    /// the new value — only results for the most recent value are ever
    /// delivered. This is the switch discipline used by typeahead search and
    /// field validation.
    ///
    /// The computation returns a `StreamItem` so the caller decides, per call
    /// site, how its failures enter the stream.
    ///
    /// Upstream errors pass through immediately; they do not cancel the
    /// in-flight computation.
    fn map_latest<U, F, Fut>(self, f: F) -> impl Stream<Item = StreamItem<U>>
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = StreamItem<U>>;
}

impl<S, T> MapLatestExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn map_latest<U, F, Fut>(self, f: F) -> impl Stream<Item = StreamItem<U>>
    where
        F: FnMut(T) -> Fut,
        Fut: Future<Output = StreamItem<U>>,
    {
        MapLatestStream {
            stream: self,
            f,
            pending: None,
            stream_ended: false,
        }
    }
}

#[pin_project]
struct MapLatestStream<S, F, Fut> {
    #[pin]
    stream: S,
    f: F,
    #[pin]
    pending: Option<Fut>,
    stream_ended: bool,
}

impl<S, T, U, F, Fut> Stream for MapLatestStream<S, F, Fut>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = StreamItem<U>>,
{
    type Item = StreamItem<U>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        // 1. Drain the upstream; the newest value supersedes any in-flight work
        while !*this.stream_ended {
            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => {
                    // Dropping the previous future cancels the superseded work
                    this.pending.set(Some((this.f)(value)));
                }
                Poll::Ready(Some(StreamItem::Error(err))) => {
                    return Poll::Ready(Some(StreamItem::Error(err)));
                }
                Poll::Ready(None) => {
                    *this.stream_ended = true;
                }
                Poll::Pending => break,
            }
        }

        // 2. Advance the in-flight computation, if any
        if let Some(fut) = this.pending.as_mut().as_pin_mut() {
            match fut.poll(cx) {
                Poll::Ready(item) => {
                    this.pending.set(None);
                    return Poll::Ready(Some(item));
                }
                Poll::Pending => return Poll::Pending,
            }
        }

        if *this.stream_ended {
            Poll::Ready(None)
        } else {
            Poll::Pending
        }
    }
}
