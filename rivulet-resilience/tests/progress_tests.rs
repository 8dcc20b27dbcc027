// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{Result, RivuletError};
use rivulet_resilience::progress_tracker;
use std::time::Duration;
use tokio::time::{pause, sleep};

#[tokio::test]
async fn test_progress_is_reported_after_each_completion() -> anyhow::Result<()> {
    pause();

    // Staggered completion times, reversed relative to input order
    let operations: Vec<_> = [30u64, 20, 10]
        .iter()
        .enumerate()
        .map(|(index, delay)| {
            let delay = Duration::from_millis(*delay);
            async move {
                sleep(delay).await;
                Ok(index)
            }
        })
        .collect();

    let mut seen = Vec::new();
    let results = progress_tracker(operations, |completed, total| {
        seen.push((completed, total));
    })
    .await?;

    // Results in input order regardless of completion order
    assert_eq!(results, vec![0, 1, 2]);
    assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);

    Ok(())
}

#[tokio::test]
async fn test_fails_fast_on_the_first_failure() {
    pause();

    let operations: Vec<_> = (0..3)
        .map(|index| async move {
            if index == 1 {
                Err(RivuletError::stream_error("operation 1 failed"))
            } else {
                sleep(Duration::from_secs(3600)).await;
                Ok(index)
            }
        })
        .collect();

    let mut progress_calls = 0usize;
    let result: Result<Vec<i32>> = progress_tracker(operations, |_, _| progress_calls += 1).await;

    // The failure surfaces immediately; the slow survivors never count
    assert!(matches!(
        result.unwrap_err(),
        RivuletError::StreamProcessingError { .. }
    ));
    assert_eq!(progress_calls, 0);
}

#[tokio::test]
async fn test_empty_input_completes_with_no_progress() -> anyhow::Result<()> {
    let operations: Vec<std::future::Ready<Result<i32>>> = Vec::new();
    let results = progress_tracker(operations, |_, _| panic!("no progress expected")).await?;
    assert!(results.is_empty());
    Ok(())
}
