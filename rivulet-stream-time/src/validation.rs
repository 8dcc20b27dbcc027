// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Debounced field-validation composition.

use crate::debounce::DebounceExt;
use futures::Stream;
use rivulet_core::{Result, RivuletError, StreamItem};
use rivulet_stream::{DistinctUntilChangedExt, MapLatestExt};
use std::future::Future;
use std::time::Duration;

/// The result of validating one field value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Whether the value passed validation
    pub valid: bool,
    /// Messages for a failed validation
    pub errors: Vec<String>,
}

impl ValidationOutcome {
    /// A passing outcome with no messages.
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// A failing outcome carrying the given messages.
    pub fn invalid(errors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            valid: false,
            errors: errors.into_iter().map(Into::into).collect(),
        }
    }

    /// Converts a failing outcome into
    /// [`RivuletError::ValidationFailure`], a passing one into `Ok(())`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailure` carrying this outcome's messages when the
    /// outcome is invalid.
    pub fn into_result(self) -> Result<()> {
        if self.valid {
            Ok(())
        } else {
            Err(RivuletError::validation_failure(self.errors))
        }
    }
}

/// Debounced switch-latest validation over a stream of field values.
///
/// Each debounced, changed value is handed to `validator`; a newer value
/// supersedes an in-flight validation. Validator failures (as opposed to
/// invalid outcomes) surface through the stream's failure channel.
pub fn validate_field<S, T, F, Fut>(
    values: S,
    mut validator: F,
    debounce: Duration,
) -> impl Stream<Item = StreamItem<ValidationOutcome>>
where
    S: Stream<Item = StreamItem<T>>,
    T: Clone + PartialEq,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<ValidationOutcome>>,
{
    values
        .debounce(debounce)
        .distinct_until_changed()
        .map_latest(move |value| {
            let checked = validator(value);
            async move { StreamItem::from(checked.await) }
        })
}
