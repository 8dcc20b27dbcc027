// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Search-input compositions: debounced term streams and typeahead.

use crate::debounce::DebounceExt;
use futures::future::ready;
use futures::{Stream, StreamExt};
use rivulet_core::{Result, StreamItem};
use rivulet_stream::{DistinctUntilChangedExt, MapLatestExt};
use std::future::Future;
use std::time::Duration;

/// How a typeahead handles a failed search.
///
/// The choice is an explicit per-call-site argument so that swallowing a
/// failure is always a documented decision, never a blanket default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchFailurePolicy {
    /// Treat a failed search as an empty result set
    EmptyResults,
    /// Surface the failure through the stream's failure channel
    Propagate,
}

/// Debounced, deduplicated search-term stream.
///
/// Terms shorter than `min_length` are filtered out after debouncing and
/// deduplication. Errors pass through unchanged.
pub fn search_stream<S>(
    input: S,
    debounce: Duration,
    min_length: usize,
) -> impl Stream<Item = StreamItem<String>>
where
    S: Stream<Item = StreamItem<String>>,
{
    input
        .debounce(debounce)
        .distinct_until_changed()
        .filter(move |item| {
            ready(match item {
                StreamItem::Value(term) => term.len() >= min_length,
                StreamItem::Error(_) => true,
            })
        })
}

/// Debounced switch-latest search over a term stream.
///
/// Each debounced, changed term triggers `search`; a newer term supersedes
/// the in-flight search (its result is never delivered). Terms shorter than
/// `min_length` yield an empty result set without invoking `search` at all.
/// A failed search is resolved per `on_failure`.
pub fn typeahead<S, F, Fut, R>(
    input: S,
    mut search: F,
    debounce: Duration,
    min_length: usize,
    on_failure: SearchFailurePolicy,
) -> impl Stream<Item = StreamItem<Vec<R>>>
where
    S: Stream<Item = StreamItem<String>>,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Vec<R>>>,
{
    input
        .debounce(debounce)
        .distinct_until_changed()
        .map_latest(move |term| {
            let lookup = if term.len() < min_length {
                None
            } else {
                Some(search(term))
            };

            async move {
                match lookup {
                    None => StreamItem::Value(Vec::new()),
                    Some(found) => match found.await {
                        Ok(results) => StreamItem::Value(results),
                        Err(err) => match on_failure {
                            SearchFailurePolicy::EmptyResults => StreamItem::Value(Vec::new()),
                            SearchFailurePolicy::Propagate => StreamItem::Error(err),
                        },
                    },
                }
            }
        })
}
