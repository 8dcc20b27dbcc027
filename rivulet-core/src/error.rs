// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the rivulet stream library.
//!
//! The root [`RivuletError`] type travels through the stream failure channel
//! ([`crate::StreamItem::Error`]) and is returned by the operation wrappers
//! (retry, circuit breaker, polling). Configuration mistakes are reported
//! separately as [`ConfigError`] at construction time — they are programming
//! errors, not stream failures.

/// Root error type for all rivulet operations.
///
/// Every failure an operator can report flows through this enum. All variants
/// are recoverable at the caller's discretion; the library never aborts.
#[derive(Debug, thiserror::Error)]
pub enum RivuletError {
    /// Opaque failure produced by a wrapped operation.
    ///
    /// Wraps whatever error the user-supplied operation returned so it can be
    /// propagated through the stream failure channel.
    #[error("Operation failure: {0}")]
    OperationFailure(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A time-bounded operation exceeded its deadline.
    #[error("Timeout exceeded: {context}")]
    TimeoutExceeded {
        /// Context about the timeout (e.g. the configured duration)
        context: String,
    },

    /// A circuit breaker rejected the call without invoking the operation.
    ///
    /// Fail-fast signal; no retry is implied.
    #[error("Circuit breaker is open")]
    CircuitOpen,

    /// A retry controller exhausted its attempt budget.
    ///
    /// Carries the last underlying failure as its source.
    #[error("Retries exhausted after {attempts} attempts")]
    RetriesExhausted {
        /// Number of retries that were performed before giving up
        attempts: u32,
        /// The failure of the final attempt
        #[source]
        source: Box<RivuletError>,
    },

    /// Field validation produced one or more messages.
    ///
    /// Used only by the field-validation composition.
    #[error("Validation failed: {}", messages.join("; "))]
    ValidationFailure {
        /// The individual validation messages
        messages: Vec<String>,
    },

    /// Stream processing encountered an error.
    ///
    /// General error for stream plumbing that doesn't fit the other
    /// categories (subject lifecycle, injected test errors).
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong
        context: String,
    },
}

impl RivuletError {
    /// Wrap a user operation error.
    pub fn operation_failure(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::OperationFailure(Box::new(error))
    }

    /// Create a timeout error with the given context.
    pub fn timeout_exceeded(context: impl Into<String>) -> Self {
        Self::TimeoutExceeded {
            context: context.into(),
        }
    }

    /// Create a retries-exhausted error carrying the last failure.
    pub fn retries_exhausted(attempts: u32, last: RivuletError) -> Self {
        Self::RetriesExhausted {
            attempts,
            source: Box::new(last),
        }
    }

    /// Create a validation failure from a list of messages.
    pub fn validation_failure(messages: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::ValidationFailure {
            messages: messages.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a stream processing error with the given context.
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Returns `true` if this is a circuit-breaker rejection.
    #[must_use]
    pub const fn is_circuit_open(&self) -> bool {
        matches!(self, Self::CircuitOpen)
    }

    /// Returns `true` if this is a timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::TimeoutExceeded { .. })
    }
}

/// Specialized Result type for rivulet operations.
pub type Result<T> = std::result::Result<T, RivuletError>;

impl Clone for RivuletError {
    fn clone(&self) -> Self {
        match self {
            // The boxed source can't be cloned, so degrade to a formatted context
            Self::OperationFailure(e) => Self::StreamProcessingError {
                context: format!("Operation failure: {}", e),
            },
            Self::TimeoutExceeded { context } => Self::TimeoutExceeded {
                context: context.clone(),
            },
            Self::CircuitOpen => Self::CircuitOpen,
            Self::RetriesExhausted { attempts, source } => Self::RetriesExhausted {
                attempts: *attempts,
                source: source.clone(),
            },
            Self::ValidationFailure { messages } => Self::ValidationFailure {
                messages: messages.clone(),
            },
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
        }
    }
}

/// Error returned by operator configuration constructors.
///
/// Raised at construction time, never through the stream failure channel.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A numeric field that must be positive was zero.
    #[error("{field} must be greater than zero")]
    NotPositive {
        /// The offending field name
        field: &'static str,
    },

    /// A backoff multiplier below 1 would shrink delays instead of growing them.
    #[error("backoff multiplier must be at least 1.0, got {0}")]
    MultiplierTooSmall(f64),

    /// A batch spec needs at least one bound to ever flush.
    #[error("batch spec requires max_size or max_window")]
    EmptyBatchSpec,
}
