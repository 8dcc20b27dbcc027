// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_stream_time::ThrottleExt;
use rivulet_test_utils::{assert_no_element_emitted, expect_value, test_channel};
use std::time::Duration;
use tokio::time::{advance, pause};

#[tokio::test]
async fn test_leading_value_is_forwarded_immediately() -> anyhow::Result<()> {
    pause();

    let (tx, stream) = test_channel();
    let mut throttled = stream.throttle(Duration::from_millis(300));

    tx.send(1)?;
    expect_value(&mut throttled, 1).await;

    Ok(())
}

#[tokio::test]
async fn test_values_during_suppression_are_dropped() -> anyhow::Result<()> {
    pause();

    let (tx, stream) = test_channel();
    let mut throttled = stream.throttle(Duration::from_millis(300));

    tx.send(1)?;
    expect_value(&mut throttled, 1).await;

    // Inside the suppression window: dropped, not deferred
    advance(Duration::from_millis(100)).await;
    tx.send(2)?;
    assert_no_element_emitted(&mut throttled, 0).await;

    // Window expired: the next value is forwarded again
    advance(Duration::from_millis(200)).await;
    tx.send(3)?;
    expect_value(&mut throttled, 3).await;

    Ok(())
}

#[tokio::test]
async fn test_each_forwarded_value_restarts_the_window() -> anyhow::Result<()> {
    pause();

    let (tx, stream) = test_channel();
    let mut throttled = stream.throttle(Duration::from_millis(300));

    tx.send(1)?;
    expect_value(&mut throttled, 1).await;

    advance(Duration::from_millis(300)).await;
    tx.send(2)?;
    expect_value(&mut throttled, 2).await;

    // A fresh window started with 2
    advance(Duration::from_millis(100)).await;
    tx.send(3)?;
    assert_no_element_emitted(&mut throttled, 0).await;

    Ok(())
}
