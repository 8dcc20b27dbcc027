use futures::Stream;
use pin_project::pin_project;
use rivulet_core::{RivuletError, StreamItem};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{sleep_until, Instant, Sleep};

/// Extension trait providing the `timeout` operators.
pub trait TimeoutExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Errors if the source does not produce an item within `duration`.
    ///
    /// "Each" semantics: the window is armed at subscription and re-armed
    /// after every delivered item. On expiry the source is dropped and a
    /// [`RivuletError::TimeoutExceeded`] terminates the stream.
    fn timeout(self, duration: Duration) -> impl Stream<Item = StreamItem<T>> {
        TimeoutStream {
            stream: self,
            duration,
            sleep: Box::pin(sleep_until(Instant::now() + duration)),
            fallback: None::<fn() -> StreamItem<T>>,
            is_done: false,
        }
    }

    /// Like [`timeout`](Self::timeout), but routes expiry to a caller-supplied
    /// fallback item instead of the default timeout failure.
    ///
    /// The fallback is an explicit per-call-site choice; the stream still
    /// terminates after delivering it.
    fn timeout_or_else<F>(self, duration: Duration, fallback: F) -> impl Stream<Item = StreamItem<T>>
    where
        F: FnOnce() -> StreamItem<T>,
    {
        TimeoutStream {
            stream: self,
            duration,
            sleep: Box::pin(sleep_until(Instant::now() + duration)),
            fallback: Some(fallback),
            is_done: false,
        }
    }
}

impl<S, T> TimeoutExt<T> for S where S: Stream<Item = StreamItem<T>> {}

#[pin_project]
struct TimeoutStream<S, F> {
    #[pin]
    stream: S,
    duration: Duration,
    sleep: Pin<Box<Sleep>>,
    fallback: Option<F>,
    is_done: bool,
}

impl<S, T, F> Stream for TimeoutStream<S, F>
where
    S: Stream<Item = StreamItem<T>>,
    F: FnOnce() -> StreamItem<T>,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        if *this.is_done {
            return Poll::Ready(None);
        }

        // 1. Poll the source; any item re-arms the window
        match this.stream.poll_next(cx) {
            Poll::Ready(Some(item)) => {
                this.sleep.as_mut().reset(Instant::now() + *this.duration);
                return Poll::Ready(Some(item));
            }
            Poll::Ready(None) => {
                *this.is_done = true;
                return Poll::Ready(None);
            }
            Poll::Pending => {}
        }

        // 2. Poll the deadline
        if this.sleep.as_mut().poll(cx).is_ready() {
            *this.is_done = true;
            let item = match this.fallback.take() {
                Some(fallback) => fallback(),
                None => StreamItem::Error(RivuletError::timeout_exceeded(format!(
                    "no item within {:?}",
                    this.duration
                ))),
            };
            return Poll::Ready(Some(item));
        }

        Poll::Pending
    }
}
