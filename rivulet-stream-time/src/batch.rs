// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Batching operator bounded by count and/or time window.

use futures::Stream;
use pin_project::pin_project;
use rivulet_core::{ConfigError, StreamItem};
use std::future::Future;
use std::mem::take;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{sleep, Instant, Sleep};

/// Bounds for a batching operator. At least one bound must be set.
///
/// A batch is flushed when `max_size` values have accumulated or when
/// `max_window` has elapsed since the batch's first value — whichever bound
/// is detected first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchSpec {
    max_size: Option<usize>,
    max_window: Option<Duration>,
}

impl BatchSpec {
    /// A spec with both a size and a window bound.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if no bound is set or a bound is zero.
    pub fn new(max_size: Option<usize>, max_window: Option<Duration>) -> Result<Self, ConfigError> {
        if max_size.is_none() && max_window.is_none() {
            return Err(ConfigError::EmptyBatchSpec);
        }
        if max_size == Some(0) {
            return Err(ConfigError::NotPositive { field: "max_size" });
        }
        if max_window == Some(Duration::ZERO) {
            return Err(ConfigError::NotPositive { field: "max_window" });
        }
        Ok(Self {
            max_size,
            max_window,
        })
    }

    /// A spec bounded by count only.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_size` is zero.
    pub fn by_size(max_size: usize) -> Result<Self, ConfigError> {
        Self::new(Some(max_size), None)
    }

    /// A spec bounded by time only.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_window` is zero.
    pub fn by_window(max_window: Duration) -> Result<Self, ConfigError> {
        Self::new(None, Some(max_window))
    }

    /// The count bound, if any.
    pub fn max_size(&self) -> Option<usize> {
        self.max_size
    }

    /// The time bound, if any.
    pub fn max_window(&self) -> Option<Duration> {
        self.max_window
    }
}

/// Extension trait providing the `batch` operator.
pub trait BatchExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Accumulates values and emits them as ordered batches.
    ///
    /// Flushes when `spec.max_size` is reached or when `spec.max_window` has
    /// elapsed since the first value of the current batch, whichever is
    /// detected first. On upstream completion a non-empty partial batch is
    /// flushed exactly once. An upstream error discards the accumulated
    /// batch and propagates.
    fn batch(self, spec: BatchSpec) -> impl Stream<Item = StreamItem<Vec<T>>> {
        BatchStream {
            stream: self,
            spec,
            buffer: Vec::new(),
            sleep: Box::pin(sleep(Duration::ZERO)),
            window_armed: false,
            stream_ended: false,
        }
    }
}

impl<S, T> BatchExt<T> for S where S: Stream<Item = StreamItem<T>> {}

#[pin_project]
struct BatchStream<S: Stream<Item = StreamItem<T>>, T> {
    #[pin]
    stream: S,
    spec: BatchSpec,
    buffer: Vec<T>,
    sleep: Pin<Box<Sleep>>,
    window_armed: bool,
    stream_ended: bool,
}

impl<S, T> Stream for BatchStream<S, T>
where
    S: Stream<Item = StreamItem<T>>,
{
    type Item = StreamItem<Vec<T>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            // Flush the final partial batch exactly once, then finish
            if *this.stream_ended {
                if this.buffer.is_empty() {
                    return Poll::Ready(None);
                }
                *this.window_armed = false;
                return Poll::Ready(Some(StreamItem::Value(take(this.buffer))));
            }

            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => {
                    this.buffer.push(value);

                    // The window opens with the batch's first value
                    if this.buffer.len() == 1 {
                        if let Some(window) = this.spec.max_window() {
                            this.sleep.as_mut().reset(Instant::now() + window);
                            *this.window_armed = true;
                        }
                    }

                    if this
                        .spec
                        .max_size()
                        .is_some_and(|max| this.buffer.len() >= max)
                    {
                        *this.window_armed = false;
                        return Poll::Ready(Some(StreamItem::Value(take(this.buffer))));
                    }

                    continue;
                }
                Poll::Ready(Some(StreamItem::Error(err))) => {
                    this.buffer.clear();
                    *this.window_armed = false;
                    return Poll::Ready(Some(StreamItem::Error(err)));
                }
                Poll::Ready(None) => {
                    *this.stream_ended = true;
                    continue;
                }
                Poll::Pending => {}
            }

            // The size bound was checked on push; now the window bound
            if *this.window_armed && this.sleep.as_mut().poll(cx).is_ready() {
                *this.window_armed = false;
                if !this.buffer.is_empty() {
                    return Poll::Ready(Some(StreamItem::Value(take(this.buffer))));
                }
            }

            return Poll::Pending;
        }
    }
}
