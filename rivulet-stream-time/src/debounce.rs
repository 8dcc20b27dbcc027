// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use pin_project::pin_project;
use rivulet_core::StreamItem;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{sleep, Instant, Sleep};

/// Extension trait providing the `debounce` operator.
pub trait DebounceExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Debounces the stream by the specified duration.
    ///
    /// This implements **trailing debounce** semantics (Rx standard):
    /// - When a value arrives, start/restart the timer
    /// - If no new value arrives before the timer expires, emit the latest value
    /// - If a new value arrives first, discard the pending value and restart
    ///   the timer — a superseded value is never delivered
    /// - When the stream ends, emit any pending value immediately
    ///
    /// Errors pass through immediately without debounce, discarding any
    /// pending value, to ensure timely error propagation.
    ///
    /// # Arguments
    ///
    /// * `duration` - The duration of required inactivity before emitting a value
    fn debounce(self, duration: Duration) -> impl Stream<Item = StreamItem<T>> {
        DebounceStream {
            stream: self,
            duration,
            pending_value: None,
            sleep: Box::pin(sleep(Duration::ZERO)),
            timer_armed: false,
            stream_ended: false,
        }
    }
}

impl<S, T> DebounceExt<T> for S where S: Stream<Item = StreamItem<T>> {}

#[pin_project]
struct DebounceStream<S: Stream> {
    #[pin]
    stream: S,
    duration: Duration,
    pending_value: Option<S::Item>,
    sleep: Pin<Box<Sleep>>,
    timer_armed: bool,
    stream_ended: bool,
}

impl<S, T> Stream for DebounceStream<S>
where
    S: Stream<Item = StreamItem<T>>,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            // If the stream ended, flush any pending value and finish
            if *this.stream_ended {
                if let Some(item) = this.pending_value.take() {
                    return Poll::Ready(Some(item));
                }
                return Poll::Ready(None);
            }

            // A pending value waits for its quiet period to elapse
            if this.pending_value.is_some() && *this.timer_armed {
                if this.sleep.as_mut().poll(cx).is_ready() {
                    *this.timer_armed = false;
                    let item = this.pending_value.take();
                    return Poll::Ready(item);
                }
            }

            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => {
                    // New value: restart the quiet-period timer and replace
                    // any pending value with this one
                    this.sleep.as_mut().reset(Instant::now() + *this.duration);
                    *this.timer_armed = true;
                    *this.pending_value = Some(StreamItem::Value(value));

                    // Loop so the fresh timer registers its waker
                    continue;
                }
                Poll::Ready(Some(StreamItem::Error(err))) => {
                    *this.pending_value = None;
                    *this.timer_armed = false;
                    return Poll::Ready(Some(StreamItem::Error(err)));
                }
                Poll::Ready(None) => {
                    *this.stream_ended = true;
                    continue;
                }
                Poll::Pending => {
                    // Waiting either for the timer or for the next source value
                    return Poll::Pending;
                }
            }
        }
    }
}
