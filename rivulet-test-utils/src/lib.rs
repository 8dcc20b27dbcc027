// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the rivulet stream library.
//!
//! Provides channel-driven test sources, assertion helpers, an
//! error-injecting stream wrapper and a flaky-operation fixture. For
//! development and testing only, not for production code.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod error_injection;
pub mod flaky;
pub mod helpers;

use futures::{Stream, StreamExt};
use rivulet_core::StreamItem;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use error_injection::ErrorInjectingStream;
pub use flaky::FlakyOperation;
pub use helpers::{assert_no_element_emitted, collect_values, expect_value};

/// Creates a test channel that automatically wraps values in
/// `StreamItem::Value`.
///
/// Tests push plain values through the sender; the stream side yields
/// `StreamItem<T>` as the operators expect.
///
/// # Example
///
/// ```rust
/// use rivulet_test_utils::test_channel;
/// use futures::StreamExt;
///
/// # async fn example() {
/// let (tx, mut stream) = test_channel();
/// tx.send(42).unwrap();
/// let item = stream.next().await.unwrap().unwrap();
/// assert_eq!(item, 42);
/// # }
/// ```
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, stream)
}

/// Creates a test channel that accepts `StreamItem<T>` directly, for
/// exercising error propagation.
///
/// # Example
///
/// ```rust
/// use rivulet_test_utils::test_channel_with_errors;
/// use rivulet_core::{RivuletError, StreamItem};
///
/// # async fn example() {
/// let (tx, _stream) = test_channel_with_errors::<i32>();
/// tx.send(StreamItem::Value(42)).unwrap();
/// tx.send(StreamItem::Error(RivuletError::stream_error("boom"))).unwrap();
/// # }
/// ```
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T>>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, UnboundedReceiverStream::new(rx))
}
