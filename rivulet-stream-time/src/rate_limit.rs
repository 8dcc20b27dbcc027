// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Rate limiting with a selectable timing discipline.

use crate::audit::AuditExt;
use crate::debounce::DebounceExt;
use crate::throttle::ThrottleExt;
use futures::stream::BoxStream;
use futures::StreamExt;
use futures::Stream;
use rivulet_core::StreamItem;
use std::time::Duration;

/// Which timing discipline gates emissions of a rate-limited stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateLimitStrategy {
    /// Leading edge: forward immediately, then suppress for the interval
    Throttle,
    /// Trailing quiet period: forward the latest value after the interval
    /// has elapsed with no further emission
    Debounce,
    /// Trailing window sample: forward the most recent value at the end of
    /// each window opened by a value
    Audit,
}

/// Extension trait providing the `rate_limit` operator.
pub trait RateLimitExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Gates emissions with the given interval and strategy.
    ///
    /// Dispatches to [`throttle`](ThrottleExt::throttle),
    /// [`debounce`](DebounceExt::debounce) or [`audit`](AuditExt::audit);
    /// see those operators for the exact per-discipline semantics.
    fn rate_limit(
        self,
        interval: Duration,
        strategy: RateLimitStrategy,
    ) -> BoxStream<'static, StreamItem<T>>
    where
        Self: Send + 'static,
        T: Send + 'static,
    {
        match strategy {
            RateLimitStrategy::Throttle => self.throttle(interval).boxed(),
            RateLimitStrategy::Debounce => self.debounce(interval).boxed(),
            RateLimitStrategy::Audit => self.audit(interval).boxed(),
        }
    }
}

impl<S, T> RateLimitExt<T> for S where S: Stream<Item = StreamItem<T>> {}
