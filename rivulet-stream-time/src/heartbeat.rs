use futures::Stream;
use rivulet_core::StreamItem;
use std::time::Duration;
use tokio::time::interval;

/// Emits an incrementing counter, starting at 1, once every `period`.
///
/// The first beat (value 1) fires immediately at subscription; beat *n*
/// fires after `n - 1` periods, so the counter equals the number of elapsed
/// periods plus one. The stream is infinite; bound it with a take adapter or
/// drop it to stop.
///
/// # Panics
///
/// Panics if `period` is zero.
pub fn heartbeat(period: Duration) -> impl Stream<Item = StreamItem<u64>> {
    assert!(period > Duration::ZERO, "heartbeat: period must be non-zero");

    let ticker = interval(period);
    futures::stream::unfold((ticker, 0u64), |(mut ticker, count)| async move {
        ticker.tick().await;
        let count = count + 1;
        Some((StreamItem::Value(count), (ticker, count)))
    })
}
