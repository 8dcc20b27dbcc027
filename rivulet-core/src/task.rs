// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Background task handle with cooperative cancellation.

use crate::CancellationToken;
use std::future::Future;

/// Task handle with automatic cancellation on drop.
///
/// `RivuletTask` spawns a background task and hands it a
/// [`CancellationToken`] to monitor. When the handle is dropped or manually
/// cancelled, the token is signaled and the task is expected to wind down at
/// its next checkpoint. Delivery to anything fed by the task stops once the
/// token is observed.
///
/// # Example
///
/// ```rust
/// use rivulet_core::RivuletTask;
///
/// # #[tokio::main]
/// # async fn main() {
/// let task = RivuletTask::spawn(|cancel| async move {
///     while !cancel.is_cancelled() {
///         tokio::task::yield_now().await;
///     }
/// });
///
/// // Task cancels automatically on drop
/// drop(task);
/// # }
/// ```
#[derive(Debug)]
pub struct RivuletTask {
    cancel: CancellationToken,
}

impl RivuletTask {
    /// Spawn a background task with cancellation support.
    ///
    /// The closure receives a [`CancellationToken`] that fires when the handle
    /// is dropped or [`cancel`](Self::cancel)led.
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        tokio::spawn(f(cancel.clone()));
        Self { cancel }
    }

    /// Signal the task to stop without waiting for it to finish.
    ///
    /// Idempotent; the task stops at its next cancellation checkpoint.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for RivuletTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
