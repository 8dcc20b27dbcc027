// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Multicast cache layer: one upstream subscription shared by many
//! subscribers, with bounded replay of recent values.

use futures::{Stream, StreamExt};
use parking_lot::Mutex;
use rivulet_core::{RivuletSubject, RivuletTask, StreamItem};
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::Instant;

type BoxItemStream<T> = Pin<Box<dyn Stream<Item = StreamItem<T>> + Send + 'static>>;
type StreamFactory<T> = Box<dyn FnMut() -> BoxItemStream<T> + Send + 'static>;

/// A multicast handle that shares one underlying subscription and replays
/// recent values to late subscribers.
///
/// The first [`subscribe`](Self::subscribe) invokes the source factory once
/// and starts a forwarding task; later subscribers attach to the same live
/// feed and first receive up to `buffer_size` buffered values still younger
/// than `window`. All subscribers observe live values in the same order.
///
/// Subscriptions are reference counted: when the last subscriber is dropped,
/// the forwarding task is cancelled and the replay buffer discarded, so a
/// future subscriber re-invokes the factory on a fresh source instead of
/// rehydrating from stale state.
///
/// # Example
///
/// ```rust
/// use rivulet_stream::{IntoStreamItems, ShareLatest};
/// use futures::stream;
///
/// # #[tokio::main]
/// # async fn main() {
/// let shared = ShareLatest::new(
///     || stream::iter(vec![1, 2, 3]).stream_items(),
///     1,
///     None,
/// );
/// let _first = shared.subscribe();
/// let _second = shared.subscribe(); // same upstream, no second factory call
/// # }
/// ```
pub struct ShareLatest<T: Clone + Send + Sync + 'static> {
    inner: Arc<Mutex<Inner<T>>>,
    buffer_size: usize,
    window: Option<Duration>,
}

struct Inner<T: Clone + Send + Sync + 'static> {
    factory: StreamFactory<T>,
    active: Option<Active<T>>,
    next_generation: u64,
}

struct Active<T: Clone + Send + Sync + 'static> {
    generation: u64,
    subject: RivuletSubject<T>,
    buffer: VecDeque<(Instant, T)>,
    subscribers: usize,
    task: RivuletTask,
}

impl<T: Clone + Send + Sync + 'static> ShareLatest<T> {
    /// Creates a share handle over a restartable source.
    ///
    /// `factory` is invoked once per activation (first subscriber after a
    /// cold start or a full teardown). `buffer_size` bounds how many recent
    /// values late subscribers replay; `window` additionally bounds their
    /// age (`None` means unbounded age).
    pub fn new<F, S>(mut factory: F, buffer_size: usize, window: Option<Duration>) -> Self
    where
        F: FnMut() -> S + Send + 'static,
        S: Stream<Item = StreamItem<T>> + Send + 'static,
    {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                factory: Box::new(move || Box::pin(factory()) as BoxItemStream<T>),
                active: None,
                next_generation: 0,
            })),
            buffer_size,
            window,
        }
    }

    /// Attach a subscriber, activating the upstream if this is the first one.
    ///
    /// The replay snapshot and the live attachment happen under the same lock
    /// the forwarding task broadcasts under, so attaching never duplicates or
    /// loses a value.
    pub fn subscribe(&self) -> SharedStream<T> {
        let mut inner = self.inner.lock();

        if inner.active.is_none() {
            let generation = inner.next_generation;
            inner.next_generation += 1;

            let source = (inner.factory)();
            let subject = RivuletSubject::new();
            let task = spawn_forwarder(
                Arc::clone(&self.inner),
                generation,
                source,
                self.buffer_size,
                self.window,
            );

            inner.active = Some(Active {
                generation,
                subject,
                buffer: VecDeque::new(),
                subscribers: 0,
                task,
            });
        }

        let window = self.window;
        let active = inner.active.as_mut().expect("share state just activated");
        active.subscribers += 1;
        let generation = active.generation;

        let now = Instant::now();
        let replay: Vec<T> = active
            .buffer
            .iter()
            .filter(|(at, _)| window.is_none_or(|w| now.duration_since(*at) <= w))
            .map(|(_, value)| value.clone())
            .collect();

        // A closed subject means the upstream already completed; replay only
        let live = active.subject.subscribe().ok();
        drop(inner);

        SharedStream {
            stream: Box::pin(
                futures::stream::iter(replay)
                    .map(StreamItem::Value)
                    .chain(futures::stream::iter(live).flatten()),
            ),
            _guard: ShareGuard {
                inner: Arc::clone(&self.inner),
                generation,
            },
        }
    }

    /// Number of currently attached subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .lock()
            .active
            .as_ref()
            .map_or(0, |active| active.subscribers)
    }

    /// Returns `true` while an upstream subscription is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.lock().active.is_some()
    }
}

impl<T: Clone + Send + Sync + 'static> Clone for ShareLatest<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            buffer_size: self.buffer_size,
            window: self.window,
        }
    }
}

fn spawn_forwarder<T: Clone + Send + Sync + 'static>(
    inner: Arc<Mutex<Inner<T>>>,
    generation: u64,
    mut source: BoxItemStream<T>,
    buffer_size: usize,
    window: Option<Duration>,
) -> RivuletTask {
    RivuletTask::spawn(move |cancel| async move {
        loop {
            let item = tokio::select! {
                () = cancel.cancelled() => break,
                item = source.next() => item,
            };

            let mut guard = inner.lock();
            let Some(active) = guard
                .active
                .as_mut()
                .filter(|active| active.generation == generation)
            else {
                // Torn down (or reactivated) while this item was in flight
                break;
            };

            match item {
                Some(StreamItem::Value(value)) => {
                    let now = Instant::now();
                    active.buffer.push_back((now, value.clone()));
                    while active.buffer.len() > buffer_size {
                        active.buffer.pop_front();
                    }
                    if let Some(window) = window {
                        while active
                            .buffer
                            .front()
                            .is_some_and(|(at, _)| now.duration_since(*at) > window)
                        {
                            active.buffer.pop_front();
                        }
                    }

                    if active.subject.next(value).is_err() {
                        crate::warn!("share_latest: subject closed while forwarding");
                        break;
                    }
                }
                Some(StreamItem::Error(err)) => {
                    let _ = active.subject.error(err);
                    break;
                }
                None => {
                    active.subject.close();
                    break;
                }
            }
        }
    })
}

/// One subscriber's attachment to a [`ShareLatest`] source.
///
/// Dropping it detaches the subscriber; dropping the last one tears down the
/// shared upstream subscription.
pub struct SharedStream<T: Clone + Send + Sync + 'static> {
    stream: BoxItemStream<T>,
    _guard: ShareGuard<T>,
}

impl<T: Clone + Send + Sync + 'static> Stream for SharedStream<T> {
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().stream.as_mut().poll_next(cx)
    }
}

struct ShareGuard<T: Clone + Send + Sync + 'static> {
    inner: Arc<Mutex<Inner<T>>>,
    generation: u64,
}

impl<T: Clone + Send + Sync + 'static> Drop for ShareGuard<T> {
    fn drop(&mut self) {
        let mut inner = self.inner.lock();
        let torn_down = match inner.active.as_mut() {
            Some(active) if active.generation == self.generation => {
                active.subscribers -= 1;
                active.subscribers == 0
            }
            _ => false,
        };

        if torn_down {
            // Last subscriber gone: cancel the forwarder, drop the buffer
            if let Some(active) = inner.active.take() {
                active.task.cancel();
            }
        }
    }
}
