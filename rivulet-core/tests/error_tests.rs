// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::RivuletError;
use std::error::Error;

#[derive(Debug, thiserror::Error)]
#[error("backend unavailable")]
struct BackendError;

#[test]
fn test_operation_failure_wraps_and_sources_the_underlying_error() {
    let err = RivuletError::operation_failure(BackendError);

    assert_eq!(err.to_string(), "Operation failure: backend unavailable");
    assert!(err.source().is_some());
}

#[test]
fn test_retries_exhausted_carries_the_last_failure() {
    let last = RivuletError::operation_failure(BackendError);
    let err = RivuletError::retries_exhausted(4, last);

    assert_eq!(err.to_string(), "Retries exhausted after 4 attempts");
    assert!(matches!(
        err,
        RivuletError::RetriesExhausted { attempts: 4, .. }
    ));
    assert!(err.source().is_some());
}

#[test]
fn test_validation_failure_joins_messages_for_display() {
    let err = RivuletError::validation_failure(["too short", "needs a digit"]);
    assert_eq!(
        err.to_string(),
        "Validation failed: too short; needs a digit"
    );
}

#[test]
fn test_clone_degrades_unclonable_sources_to_context() {
    let original = RivuletError::operation_failure(BackendError);
    let cloned = original.clone();

    // The boxed source can't be cloned; the clone keeps the message
    match cloned {
        RivuletError::StreamProcessingError { context } => {
            assert!(context.contains("backend unavailable"));
        }
        other => panic!("expected StreamProcessingError, got {:?}", other),
    }
}

#[test]
fn test_classification_helpers() {
    assert!(RivuletError::CircuitOpen.is_circuit_open());
    assert!(RivuletError::timeout_exceeded("500ms").is_timeout());
    assert!(!RivuletError::CircuitOpen.is_timeout());
}
