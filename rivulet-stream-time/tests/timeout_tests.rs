// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use rivulet_core::{RivuletError, StreamItem};
use rivulet_stream_time::TimeoutExt;
use rivulet_test_utils::{assert_no_element_emitted, expect_value, test_channel};
use std::time::Duration;
use tokio::time::{advance, pause};

#[tokio::test]
async fn test_values_within_the_window_pass_through() -> anyhow::Result<()> {
    pause();

    let (tx, stream) = test_channel();
    let mut timed = stream.timeout(Duration::from_millis(100));

    tx.send(1)?;
    expect_value(&mut timed, 1).await;

    // Each delivery re-arms the window
    advance(Duration::from_millis(90)).await;
    tx.send(2)?;
    expect_value(&mut timed, 2).await;

    Ok(())
}

#[tokio::test]
async fn test_expiry_emits_timeout_error_and_terminates() -> anyhow::Result<()> {
    pause();

    let (tx, stream) = test_channel::<i32>();
    let mut timed = stream.timeout(Duration::from_millis(100));

    advance(Duration::from_millis(99)).await;
    assert_no_element_emitted(&mut timed, 0).await;

    advance(Duration::from_millis(1)).await;
    assert!(matches!(
        timed.next().await.unwrap(),
        StreamItem::Error(RivuletError::TimeoutExceeded { .. })
    ));

    // Terminated: a late value is never delivered
    tx.send(1)?;
    assert!(timed.next().await.is_none());

    Ok(())
}

#[tokio::test]
async fn test_fallback_replaces_the_default_failure() -> anyhow::Result<()> {
    pause();

    let (_tx, stream) = test_channel::<i32>();
    let mut timed = stream.timeout_or_else(Duration::from_millis(100), || StreamItem::Value(-1));

    advance(Duration::from_millis(100)).await;
    expect_value(&mut timed, -1).await;
    assert!(timed.next().await.is_none());

    Ok(())
}
