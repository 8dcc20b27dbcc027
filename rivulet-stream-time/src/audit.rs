use futures::Stream;
use pin_project::pin_project;
use rivulet_core::StreamItem;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{sleep, Instant, Sleep};

/// Extension trait providing the `audit` operator.
pub trait AuditExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Samples the most recent value at the end of a window opened by the
    /// first value.
    ///
    /// This implements **trailing audit** semantics (Rx `auditTime`):
    /// - The first value after an idle period arms a `duration`-long window
    /// - Values arriving while the window is open replace the candidate
    /// - When the window expires, the most recent value is emitted and the
    ///   operator goes idle until the next value arms a new window
    /// - Completion while a window is open drops the un-fired candidate
    ///
    /// Errors pass through immediately.
    fn audit(self, duration: Duration) -> impl Stream<Item = StreamItem<T>> {
        AuditStream {
            stream: self,
            duration,
            sleep: Box::pin(sleep(Duration::ZERO)),
            window_armed: false,
            latest: None,
        }
    }
}

impl<S, T> AuditExt<T> for S where S: Stream<Item = StreamItem<T>> {}

#[pin_project]
struct AuditStream<S: Stream<Item = StreamItem<T>>, T> {
    #[pin]
    stream: S,
    duration: Duration,
    sleep: Pin<Box<Sleep>>,
    window_armed: bool,
    latest: Option<T>,
}

impl<S, T> Stream for AuditStream<S, T>
where
    S: Stream<Item = StreamItem<T>>,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        // 1. Drain the source, keeping only the most recent candidate
        loop {
            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(value))) => {
                    if !*this.window_armed {
                        this.sleep.as_mut().reset(Instant::now() + *this.duration);
                        *this.window_armed = true;
                    }
                    *this.latest = Some(value);
                }
                Poll::Ready(Some(StreamItem::Error(err))) => {
                    return Poll::Ready(Some(StreamItem::Error(err)));
                }
                Poll::Ready(None) => {
                    // Completion drops an un-fired candidate
                    return Poll::Ready(None);
                }
                Poll::Pending => break,
            }
        }

        // 2. Fire the window
        if *this.window_armed && this.sleep.as_mut().poll(cx).is_ready() {
            *this.window_armed = false;
            if let Some(value) = this.latest.take() {
                return Poll::Ready(Some(StreamItem::Value(value)));
            }
        }

        Poll::Pending
    }
}
