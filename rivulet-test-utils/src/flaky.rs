// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Flaky-operation fixture for retry and circuit-breaker tests.

use rivulet_core::{Result, RivuletError};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// An operation that fails a fixed number of times, then succeeds.
///
/// Each invocation is counted; successful invocations return the 1-indexed
/// call number, so tests can assert exactly how many attempts were made.
///
/// # Example
///
/// ```rust
/// use rivulet_test_utils::FlakyOperation;
///
/// let flaky = FlakyOperation::failing(2);
/// assert!(flaky.invoke().is_err());
/// assert!(flaky.invoke().is_err());
/// assert_eq!(flaky.invoke().unwrap(), 3);
/// assert_eq!(flaky.calls(), 3);
/// ```
#[derive(Clone)]
pub struct FlakyOperation {
    inner: Arc<FlakyInner>,
}

struct FlakyInner {
    remaining_failures: AtomicU32,
    calls: AtomicU32,
}

impl FlakyOperation {
    /// An operation that fails its first `failures` invocations.
    pub fn failing(failures: u32) -> Self {
        Self {
            inner: Arc::new(FlakyInner {
                remaining_failures: AtomicU32::new(failures),
                calls: AtomicU32::new(0),
            }),
        }
    }

    /// An operation that always succeeds.
    pub fn reliable() -> Self {
        Self::failing(0)
    }

    /// Performs one invocation.
    ///
    /// # Errors
    ///
    /// Returns a stream-processing error while failures remain.
    pub fn invoke(&self) -> Result<u32> {
        let call = self.inner.calls.fetch_add(1, Ordering::SeqCst) + 1;

        let failed = self
            .inner
            .remaining_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |remaining| {
                remaining.checked_sub(1)
            })
            .is_ok();

        if failed {
            Err(RivuletError::stream_error(format!(
                "flaky failure on call {call}"
            )))
        } else {
            Ok(call)
        }
    }

    /// Total number of invocations so far.
    pub fn calls(&self) -> u32 {
        self.inner.calls.load(Ordering::SeqCst)
    }
}
