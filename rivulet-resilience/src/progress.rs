// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Progress tracking over a batch of concurrent operations.

use futures::stream::{FuturesUnordered, StreamExt};
use rivulet_core::Result;
use std::future::Future;

/// Runs all `operations` concurrently, reporting progress as they complete.
///
/// `on_progress(completed, total)` is invoked after each successful
/// completion. Results are returned in the order the operations were given,
/// regardless of completion order.
///
/// Failure policy: fails fast. The first failure is returned immediately
/// and the remaining in-flight operations are dropped (cancelled); their
/// completions are not counted.
///
/// # Errors
///
/// The first operation failure, as soon as it occurs.
///
/// # Example
///
/// ```rust
/// use rivulet_resilience::progress_tracker;
///
/// # #[tokio::main]
/// # async fn main() -> anyhow::Result<()> {
/// let operations: Vec<_> = (1..=2).map(|n| async move { Ok(n) }).collect();
/// let mut seen = Vec::new();
/// let results = progress_tracker(operations, |completed, total| {
///     seen.push((completed, total));
/// })
/// .await?;
/// assert_eq!(results, vec![1, 2]);
/// assert_eq!(seen, vec![(1, 2), (2, 2)]);
/// # Ok(())
/// # }
/// ```
pub async fn progress_tracker<T, Fut, P>(
    operations: Vec<Fut>,
    mut on_progress: P,
) -> Result<Vec<T>>
where
    Fut: Future<Output = Result<T>>,
    P: FnMut(usize, usize),
{
    let total = operations.len();
    let mut in_flight: FuturesUnordered<_> = operations
        .into_iter()
        .enumerate()
        .map(|(index, operation)| async move { (index, operation.await) })
        .collect();

    let mut results: Vec<Option<T>> = (0..total).map(|_| None).collect();
    let mut completed = 0usize;

    while let Some((index, result)) = in_flight.next().await {
        // Dropping `in_flight` on error cancels everything still running
        let value = result?;
        results[index] = Some(value);
        completed += 1;
        on_progress(completed, total);
    }

    Ok(results
        .into_iter()
        .map(|value| value.expect("all operations completed"))
        .collect())
}
