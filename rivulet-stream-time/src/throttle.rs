use futures::Stream;
use pin_project::pin_project;
use rivulet_core::StreamItem;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{sleep, Instant, Sleep};

/// Extension trait providing the `throttle` operator.
pub trait ThrottleExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Throttles values from the source stream by the specified duration.
    ///
    /// This implements **leading throttle** semantics:
    /// - When a value arrives outside a suppression window, it is forwarded
    ///   immediately and a `duration`-long suppression window starts
    /// - Values arriving during the suppression window are dropped
    /// - When the window expires, the next value is accepted again
    ///
    /// Errors pass through immediately without throttling.
    fn throttle(self, duration: Duration) -> impl Stream<Item = StreamItem<T>> {
        ThrottleStream {
            stream: self,
            duration,
            sleep: Box::pin(sleep(Duration::ZERO)),
            throttling: false,
        }
    }
}

impl<S, T> ThrottleExt<T> for S where S: Stream<Item = StreamItem<T>> {}

#[pin_project]
struct ThrottleStream<S: Stream> {
    #[pin]
    stream: S,
    duration: Duration,
    sleep: Pin<Box<Sleep>>,
    throttling: bool,
}

impl<S, T> Stream for ThrottleStream<S>
where
    S: Stream<Item = StreamItem<T>>,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            // 1. Check the suppression window
            if *this.throttling {
                // Deadline check covers the case where the Sleep poll lags
                if Instant::now() >= this.sleep.deadline() {
                    *this.throttling = false;
                } else if this.sleep.as_mut().poll(cx).is_ready() {
                    *this.throttling = false;
                }
            }

            // 2. Poll the source
            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => {
                    if *this.throttling {
                        // Inside the window: drop and keep draining
                        continue;
                    }
                    let deadline = Instant::now() + *this.duration;
                    this.sleep.as_mut().reset(deadline);
                    *this.throttling = true;
                    return Poll::Ready(Some(StreamItem::Value(value)));
                }
                Poll::Ready(Some(StreamItem::Error(err))) => {
                    return Poll::Ready(Some(StreamItem::Error(err)));
                }
                Poll::Ready(None) => {
                    return Poll::Ready(None);
                }
                Poll::Pending => {
                    // Both the timer (if armed) and the stream registered wakers
                    return Poll::Pending;
                }
            }
        }
    }
}
