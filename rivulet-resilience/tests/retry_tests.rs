// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::{ConfigError, RivuletError};
use rivulet_resilience::{retry_with_backoff, retry_with_backoff_observed, RetryConfig};
use rivulet_test_utils::FlakyOperation;
use std::time::Duration;
use tokio::time::{pause, Instant};

#[test]
fn test_delay_follows_the_backoff_formula() -> anyhow::Result<()> {
    let config = RetryConfig::new(5, Duration::from_millis(100))?;

    // base * 2^(n-1)
    assert_eq!(config.delay_for_retry(1), Duration::from_millis(100));
    assert_eq!(config.delay_for_retry(2), Duration::from_millis(200));
    assert_eq!(config.delay_for_retry(3), Duration::from_millis(400));
    assert_eq!(config.delay_for_retry(4), Duration::from_millis(800));

    Ok(())
}

#[test]
fn test_delay_is_capped_at_max_delay() -> anyhow::Result<()> {
    let config = RetryConfig::new(10, Duration::from_millis(100))?
        .with_backoff_multiplier(3.0)?
        .with_max_delay(Duration::from_millis(500));

    assert_eq!(config.delay_for_retry(1), Duration::from_millis(100));
    assert_eq!(config.delay_for_retry(2), Duration::from_millis(300));
    // 100 * 3^2 = 900 > cap
    assert_eq!(config.delay_for_retry(3), Duration::from_millis(500));
    // Far past any representable delay: still the cap
    assert_eq!(config.delay_for_retry(1000), Duration::from_millis(500));

    Ok(())
}

#[test]
fn test_config_validation() {
    assert_eq!(
        RetryConfig::new(0, Duration::from_millis(100)).unwrap_err(),
        ConfigError::NotPositive {
            field: "max_attempts"
        }
    );
    assert!(matches!(
        RetryConfig::new(3, Duration::from_millis(100))
            .unwrap()
            .with_backoff_multiplier(0.5),
        Err(ConfigError::MultiplierTooSmall(_))
    ));
}

#[tokio::test]
async fn test_succeeds_after_transient_failures() -> anyhow::Result<()> {
    pause();

    let flaky = FlakyOperation::failing(2);
    let config = RetryConfig::new(3, Duration::from_millis(100))?;

    let start = Instant::now();
    let operation = flaky.clone();
    let value = retry_with_backoff(&config, move || {
        let operation = operation.clone();
        async move { operation.invoke() }
    })
    .await?;

    // Initial attempt + 2 retries; backoff waits of 100ms and 200ms
    assert_eq!(value, 3);
    assert_eq!(flaky.calls(), 3);
    assert_eq!(start.elapsed(), Duration::from_millis(300));

    Ok(())
}

#[tokio::test]
async fn test_exhaustion_surfaces_the_last_failure() -> anyhow::Result<()> {
    pause();

    let flaky = FlakyOperation::failing(u32::MAX);
    let config = RetryConfig::new(2, Duration::from_millis(10))?;

    let operation = flaky.clone();
    let err = retry_with_backoff(&config, move || {
        let operation = operation.clone();
        async move { operation.invoke() }
    })
    .await
    .unwrap_err();

    match err {
        RivuletError::RetriesExhausted { attempts, source } => {
            assert_eq!(attempts, 2);
            assert!(matches!(
                *source,
                RivuletError::StreamProcessingError { .. }
            ));
        }
        other => panic!("expected RetriesExhausted, got {:?}", other),
    }

    // Initial attempt + 2 retries
    assert_eq!(flaky.calls(), 3);

    Ok(())
}

#[tokio::test]
async fn test_observed_hook_sees_each_retry() -> anyhow::Result<()> {
    pause();

    let flaky = FlakyOperation::failing(2);
    let config = RetryConfig::new(3, Duration::from_millis(10))?;

    let mut observed = Vec::new();
    let operation = flaky.clone();
    retry_with_backoff_observed(
        &config,
        move || {
            let operation = operation.clone();
            async move { operation.invoke() }
        },
        |attempt, _err| observed.push(attempt),
    )
    .await?;

    assert_eq!(observed, vec![1, 2]);

    Ok(())
}
