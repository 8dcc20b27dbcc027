// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::RivuletError;
use rivulet_stream_time::{validate_field, ValidationOutcome};
use rivulet_test_utils::{assert_no_element_emitted, expect_value, test_channel};
use std::time::Duration;
use tokio::time::{advance, pause};

async fn check_length(value: String) -> rivulet_core::Result<ValidationOutcome> {
    if value.len() >= 3 {
        Ok(ValidationOutcome::ok())
    } else {
        Ok(ValidationOutcome::invalid(["too short"]))
    }
}

#[tokio::test]
async fn test_settled_value_is_validated() -> anyhow::Result<()> {
    pause();

    let (tx, values) = test_channel();
    let mut outcomes = Box::pin(validate_field(
        values,
        check_length,
        Duration::from_millis(500),
    ));

    // Still typing: superseded values are never validated
    tx.send("a".to_string())?;
    assert_no_element_emitted(&mut outcomes, 0).await;
    advance(Duration::from_millis(200)).await;
    tx.send("abcd".to_string())?;
    assert_no_element_emitted(&mut outcomes, 0).await;

    advance(Duration::from_millis(500)).await;
    expect_value(&mut outcomes, ValidationOutcome::ok()).await;

    Ok(())
}

#[tokio::test]
async fn test_invalid_outcome_carries_messages() -> anyhow::Result<()> {
    pause();

    let (tx, values) = test_channel();
    let mut outcomes = Box::pin(validate_field(
        values,
        check_length,
        Duration::from_millis(100),
    ));

    tx.send("ab".to_string())?;
    advance(Duration::from_millis(100)).await;
    expect_value(&mut outcomes, ValidationOutcome::invalid(["too short"])).await;

    Ok(())
}

#[test]
fn test_outcome_conversion_to_result() {
    assert!(ValidationOutcome::ok().into_result().is_ok());

    let err = ValidationOutcome::invalid(["too short", "needs a digit"])
        .into_result()
        .unwrap_err();
    match err {
        RivuletError::ValidationFailure { messages } => {
            assert_eq!(messages, vec!["too short", "needs a digit"]);
        }
        other => panic!("expected ValidationFailure, got {:?}", other),
    }
}
