// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::StreamExt;
use rivulet_core::{CancellationToken, StreamItem};
use rivulet_resilience::auto_refresh;
use rivulet_test_utils::{assert_no_element_emitted, expect_value, FlakyOperation};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{advance, pause};

#[tokio::test]
async fn test_runs_immediately_then_every_interval() -> anyhow::Result<()> {
    pause();

    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = Arc::clone(&counter);
    let cancel = CancellationToken::new();

    let mut refreshed = Box::pin(auto_refresh(
        move || {
            let run = counter_clone.fetch_add(1, Ordering::SeqCst) + 1;
            std::future::ready(Ok(run))
        },
        Duration::from_millis(100),
        cancel.clone(),
    ));

    expect_value(&mut refreshed, 1).await;
    // Poll once so the interval wait is armed now
    assert_no_element_emitted(&mut refreshed, 0).await;

    advance(Duration::from_millis(99)).await;
    assert_no_element_emitted(&mut refreshed, 0).await;

    advance(Duration::from_millis(1)).await;
    expect_value(&mut refreshed, 2).await;

    Ok(())
}

#[tokio::test]
async fn test_cancellation_stops_further_delivery() -> anyhow::Result<()> {
    pause();

    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = Arc::clone(&counter);
    let cancel = CancellationToken::new();

    let mut refreshed = Box::pin(auto_refresh(
        move || {
            let run = counter_clone.fetch_add(1, Ordering::SeqCst) + 1;
            std::future::ready(Ok(run))
        },
        Duration::from_millis(100),
        cancel.clone(),
    ));

    expect_value(&mut refreshed, 1).await;

    cancel.cancel();
    assert!(refreshed.next().await.is_none());
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test]
async fn test_failure_ends_the_stream() -> anyhow::Result<()> {
    pause();

    let flaky = FlakyOperation::failing(u32::MAX);
    let cancel = CancellationToken::new();

    let operation = flaky.clone();
    let mut refreshed = Box::pin(auto_refresh(
        move || {
            let operation = operation.clone();
            std::future::ready(operation.invoke())
        },
        Duration::from_millis(100),
        cancel,
    ));

    assert!(matches!(
        refreshed.next().await.unwrap(),
        StreamItem::Error(_)
    ));
    assert!(refreshed.next().await.is_none());
    assert_eq!(flaky.calls(), 1);

    Ok(())
}
