// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use rivulet_core::{RivuletError, StreamItem};
use rivulet_stream_time::DebounceExt;
use rivulet_test_utils::{
    assert_no_element_emitted, expect_value, test_channel, test_channel_with_errors,
};
use std::time::Duration;
use tokio::time::{advance, pause};

#[tokio::test]
async fn test_rapid_values_yield_one_trailing_emission() -> anyhow::Result<()> {
    pause(); // Mock time for instant test execution

    // Arrange
    let (tx, stream) = test_channel();
    let mut debounced = stream.debounce(Duration::from_millis(300));

    // Act - values at t=0, t=100, t=150
    tx.send(1)?;
    assert_no_element_emitted(&mut debounced, 0).await;

    advance(Duration::from_millis(100)).await;
    tx.send(2)?;
    assert_no_element_emitted(&mut debounced, 0).await;

    advance(Duration::from_millis(50)).await;
    tx.send(3)?;
    assert_no_element_emitted(&mut debounced, 0).await;

    // Assert - still quiet at t=449
    advance(Duration::from_millis(299)).await;
    assert_no_element_emitted(&mut debounced, 0).await;

    // Exactly one emission, the latest value, at t=450
    advance(Duration::from_millis(1)).await;
    expect_value(&mut debounced, 3).await;
    assert_no_element_emitted(&mut debounced, 0).await;

    Ok(())
}

#[tokio::test]
async fn test_timer_resets_on_new_value() -> anyhow::Result<()> {
    pause();

    let (tx, stream) = test_channel();
    let mut debounced = stream.debounce(Duration::from_millis(500));

    tx.send(1)?;
    assert_no_element_emitted(&mut debounced, 0).await;

    // 300ms in, a new value resets the quiet period; 1 is discarded
    advance(Duration::from_millis(300)).await;
    tx.send(2)?;
    assert_no_element_emitted(&mut debounced, 0).await;

    // 600ms from the first value, but only 300ms from the second
    advance(Duration::from_millis(300)).await;
    assert_no_element_emitted(&mut debounced, 0).await;

    advance(Duration::from_millis(200)).await;
    expect_value(&mut debounced, 2).await;

    Ok(())
}

#[tokio::test]
async fn test_pending_value_is_flushed_on_stream_end() -> anyhow::Result<()> {
    pause();

    let (tx, stream) = test_channel();
    let mut debounced = stream.debounce(Duration::from_millis(500));

    tx.send(1)?;
    assert_no_element_emitted(&mut debounced, 0).await;

    advance(Duration::from_millis(200)).await;
    assert_no_element_emitted(&mut debounced, 0).await;

    // Closing the source flushes the pending value immediately
    drop(tx);
    expect_value(&mut debounced, 1).await;
    assert!(debounced.next().await.is_none());

    Ok(())
}

#[tokio::test]
async fn test_error_passes_through_and_discards_pending_value() -> anyhow::Result<()> {
    pause();

    let (tx, stream) = test_channel_with_errors();
    let mut debounced = stream.debounce(Duration::from_millis(300));

    tx.send(StreamItem::Value(1))?;
    assert_no_element_emitted(&mut debounced, 0).await;

    tx.send(StreamItem::Error(RivuletError::stream_error("boom")))?;
    assert!(matches!(
        debounced.next().await.unwrap(),
        StreamItem::Error(_)
    ));

    // The superseded value 1 is never delivered
    advance(Duration::from_millis(300)).await;
    assert_no_element_emitted(&mut debounced, 0).await;

    Ok(())
}
