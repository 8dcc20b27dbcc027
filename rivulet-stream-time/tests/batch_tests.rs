// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use rivulet_core::{ConfigError, RivuletError, StreamItem};
use rivulet_stream_time::{BatchExt, BatchSpec};
use rivulet_test_utils::{
    assert_no_element_emitted, expect_value, test_channel, test_channel_with_errors,
};
use std::time::Duration;
use tokio::time::{advance, pause};

#[tokio::test]
async fn test_size_bound_flushes_full_batches_and_completion_flushes_the_rest(
) -> anyhow::Result<()> {
    let (tx, stream) = test_channel();
    let mut batched = stream.batch(BatchSpec::by_size(3)?);

    for value in 1..=5 {
        tx.send(value)?;
    }

    // First flush on reaching the size bound
    expect_value(&mut batched, vec![1, 2, 3]).await;

    // Completion flushes the partial batch exactly once
    drop(tx);
    expect_value(&mut batched, vec![4, 5]).await;
    assert!(batched.next().await.is_none());

    Ok(())
}

#[tokio::test]
async fn test_window_bound_flushes_after_the_batch_opened() -> anyhow::Result<()> {
    pause();

    let (tx, stream) = test_channel();
    let mut batched = stream.batch(BatchSpec::by_window(Duration::from_millis(200))?);

    tx.send(1)?;
    tx.send(2)?;
    assert_no_element_emitted(&mut batched, 0).await;

    advance(Duration::from_millis(199)).await;
    assert_no_element_emitted(&mut batched, 0).await;

    advance(Duration::from_millis(1)).await;
    expect_value(&mut batched, vec![1, 2]).await;

    // The window is armed per batch, not free-running: no empty flushes
    advance(Duration::from_millis(500)).await;
    assert_no_element_emitted(&mut batched, 0).await;

    Ok(())
}

#[tokio::test]
async fn test_size_bound_wins_when_reached_before_the_window() -> anyhow::Result<()> {
    pause();

    let (tx, stream) = test_channel();
    let spec = BatchSpec::new(Some(2), Some(Duration::from_millis(200)))?;
    let mut batched = stream.batch(spec);

    tx.send(1)?;
    tx.send(2)?;
    expect_value(&mut batched, vec![1, 2]).await;

    // The timer was disarmed by the size flush; a fresh batch re-arms it
    tx.send(3)?;
    assert_no_element_emitted(&mut batched, 0).await;
    advance(Duration::from_millis(200)).await;
    expect_value(&mut batched, vec![3]).await;

    Ok(())
}

#[tokio::test]
async fn test_upstream_error_discards_the_batch_and_propagates() -> anyhow::Result<()> {
    let (tx, stream) = test_channel_with_errors();
    let mut batched = stream.batch(BatchSpec::by_size(3)?);

    tx.send(StreamItem::Value(1))?;
    tx.send(StreamItem::Error(RivuletError::stream_error("boom")))?;
    tx.send(StreamItem::Value(2))?;
    tx.send(StreamItem::Value(3))?;
    tx.send(StreamItem::Value(4))?;

    assert!(matches!(
        batched.next().await.unwrap(),
        StreamItem::Error(_)
    ));

    // The discarded 1 is not part of any later batch
    expect_value(&mut batched, vec![2, 3, 4]).await;

    Ok(())
}

#[tokio::test]
async fn test_spec_validation() {
    assert_eq!(
        BatchSpec::new(None, None).unwrap_err(),
        ConfigError::EmptyBatchSpec
    );
    assert_eq!(
        BatchSpec::by_size(0).unwrap_err(),
        ConfigError::NotPositive { field: "max_size" }
    );
    assert_eq!(
        BatchSpec::by_window(Duration::ZERO).unwrap_err(),
        ConfigError::NotPositive {
            field: "max_window"
        }
    );

    let spec = BatchSpec::new(Some(3), Some(Duration::from_secs(1))).unwrap();
    assert_eq!(spec.max_size(), Some(3));
    assert_eq!(spec.max_window(), Some(Duration::from_secs(1)));
}
