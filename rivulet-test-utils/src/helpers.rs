use futures::stream::StreamExt;
use futures::Stream;
use rivulet_core::StreamItem;
use std::fmt::Debug;
use std::time::Duration;
use tokio::time::sleep;

/// Asserts that `stream` emits nothing within `timeout_ms`.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _item = stream.next() => {
            panic!("Unexpected element emitted, expected no output.");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {
        }
    }
}

/// Awaits the next item and asserts it is `StreamItem::Value(expected)`.
pub async fn expect_value<S, T>(stream: &mut S, expected: T)
where
    S: Stream<Item = StreamItem<T>> + Unpin,
    T: PartialEq + Debug,
{
    let item = stream.next().await.expect("expected next item");
    match item {
        StreamItem::Value(value) => assert_eq!(value, expected),
        StreamItem::Error(err) => panic!("expected value {:?}, got error: {:?}", expected, err),
    }
}

/// Drains the stream to completion, collecting values and panicking on the
/// first error item.
pub async fn collect_values<S, T>(stream: S) -> Vec<T>
where
    S: Stream<Item = StreamItem<T>>,
    T: Debug,
{
    stream
        .map(|item| match item {
            StreamItem::Value(value) => value,
            StreamItem::Error(err) => panic!("unexpected error item: {:?}", err),
        })
        .collect()
        .await
}
