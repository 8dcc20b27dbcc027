// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::{stream, StreamExt};
use rivulet_core::{RivuletError, StreamItem};
use rivulet_stream::{
    CombineWithPreviousExt, IntoStreamItems, OnErrorExt, ScanStreamExt, StartWithExt, TapExt,
    WithPrevious,
};
use rivulet_test_utils::{collect_values, ErrorInjectingStream};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn test_start_with_prepends_the_initial_value() {
    let source = stream::iter(vec![2, 3]).stream_items();
    let values = collect_values(source.start_with(1)).await;
    assert_eq!(values, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_scan_emits_intermediate_accumulator_values() {
    let source = stream::iter(vec![1, 2, 3]).stream_items();
    let sums = collect_values(source.scan_items(0, |acc, value| {
        *acc += value;
        *acc
    }))
    .await;
    assert_eq!(sums, vec![1, 3, 6]);
}

#[tokio::test]
async fn test_tap_observes_without_modifying() {
    let seen = Arc::new(AtomicU32::new(0));
    let seen_clone = Arc::clone(&seen);

    let source = stream::iter(vec![1u32, 2, 3]).stream_items();
    let values = collect_values(source.tap_items(move |value| {
        seen_clone.fetch_add(*value, Ordering::SeqCst);
    }))
    .await;

    assert_eq!(values, vec![1, 2, 3]);
    assert_eq!(seen.load(Ordering::SeqCst), 6);
}

#[tokio::test]
async fn test_on_error_consumes_handled_errors() {
    let source = ErrorInjectingStream::new(stream::iter(vec![1, 2]), 1);
    let handled = Arc::new(AtomicU32::new(0));
    let handled_clone = Arc::clone(&handled);

    let values = collect_values(source.on_error(move |_err| {
        handled_clone.fetch_add(1, Ordering::SeqCst);
        true // Consume
    }))
    .await;

    assert_eq!(values, vec![1, 2]);
    assert_eq!(handled.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_on_error_propagates_unhandled_errors() {
    let source = ErrorInjectingStream::new(stream::iter(vec![1]), 0);
    let mut stream = Box::pin(source.on_error(|_err| false));

    assert!(matches!(
        stream.next().await.unwrap(),
        StreamItem::Error(RivuletError::StreamProcessingError { .. })
    ));
    assert!(matches!(stream.next().await.unwrap(), StreamItem::Value(1)));
}

#[tokio::test]
async fn test_unbounded_receiver_becomes_a_stream_source() -> anyhow::Result<()> {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let mut stream = Box::pin(rivulet_stream::from_unbounded_receiver(rx));

    tx.send(7)?;
    drop(tx);

    assert!(matches!(stream.next().await.unwrap(), StreamItem::Value(7)));
    assert!(stream.next().await.is_none());

    Ok(())
}

#[tokio::test]
async fn test_combine_with_previous_pairs_consecutive_values() {
    let source = stream::iter(vec![1, 2, 3]).stream_items();
    let pairs = collect_values(source.combine_with_previous()).await;

    assert_eq!(
        pairs,
        vec![
            WithPrevious::new(None, 1),
            WithPrevious::new(Some(1), 2),
            WithPrevious::new(Some(2), 3),
        ]
    );
    assert!(!pairs[0].has_previous());
    assert_eq!(pairs[2].as_pair(), Some((&2, &3)));
}
