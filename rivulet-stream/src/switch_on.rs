// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Conditional source selection driven by a boolean stream.

use futures::Stream;
use pin_project::pin_project;
use rivulet_core::StreamItem;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Forwards values from one of two sources, selected by the latest condition
/// value.
///
/// Nothing is forwarded until the condition stream emits its first value.
/// While a source is deselected it is paused — not cancelled — so toggling
/// back resumes it where it left off. The combined stream completes when the
/// condition stream has completed and the currently selected source is
/// exhausted. Errors from any of the three streams propagate immediately.
pub fn switch_on<C, S1, S2, T>(
    condition: C,
    when_true: S1,
    when_false: S2,
) -> impl Stream<Item = StreamItem<T>>
where
    C: Stream<Item = StreamItem<bool>>,
    S1: Stream<Item = StreamItem<T>>,
    S2: Stream<Item = StreamItem<T>>,
{
    SwitchOnStream {
        condition,
        when_true,
        when_false,
        active: None,
        condition_ended: false,
        true_ended: false,
        false_ended: false,
    }
}

#[pin_project]
struct SwitchOnStream<C, S1, S2> {
    #[pin]
    condition: C,
    #[pin]
    when_true: S1,
    #[pin]
    when_false: S2,
    active: Option<bool>,
    condition_ended: bool,
    true_ended: bool,
    false_ended: bool,
}

impl<C, S1, S2, T> Stream for SwitchOnStream<C, S1, S2>
where
    C: Stream<Item = StreamItem<bool>>,
    S1: Stream<Item = StreamItem<T>>,
    S2: Stream<Item = StreamItem<T>>,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        // 1. Drain the condition stream so the newest selection wins
        while !*this.condition_ended {
            match this.condition.as_mut().poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(selected))) => {
                    *this.active = Some(selected);
                }
                Poll::Ready(Some(StreamItem::Error(err))) => {
                    return Poll::Ready(Some(StreamItem::Error(err)));
                }
                Poll::Ready(None) => {
                    *this.condition_ended = true;
                }
                Poll::Pending => break,
            }
        }

        // 2. Forward from the selected source only
        let Some(selected) = *this.active else {
            // No selection yet; a completed condition stream can never make one
            return if *this.condition_ended {
                Poll::Ready(None)
            } else {
                Poll::Pending
            };
        };

        // Never poll a source past its end
        if (selected && *this.true_ended) || (!selected && *this.false_ended) {
            return if *this.condition_ended {
                Poll::Ready(None)
            } else {
                Poll::Pending
            };
        }

        let (source_poll, ended) = if selected {
            (this.when_true.as_mut().poll_next(cx), this.true_ended)
        } else {
            (this.when_false.as_mut().poll_next(cx), this.false_ended)
        };

        match source_poll {
            Poll::Ready(Some(item)) => Poll::Ready(Some(item)),
            Poll::Ready(None) => {
                *ended = true;
                if *this.condition_ended {
                    // No toggle can ever revive the stream
                    Poll::Ready(None)
                } else {
                    Poll::Pending
                }
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
