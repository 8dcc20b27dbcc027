// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod audit;
pub mod batch;
pub mod debounce;
pub mod heartbeat;
pub mod rate_limit;
pub mod search;
pub mod throttle;
pub mod timeout;
pub mod validation;

pub use self::audit::AuditExt;
pub use self::batch::{BatchExt, BatchSpec};
pub use self::debounce::DebounceExt;
pub use self::heartbeat::heartbeat;
pub use self::rate_limit::{RateLimitExt, RateLimitStrategy};
pub use self::search::{search_stream, typeahead, SearchFailurePolicy};
pub use self::throttle::ThrottleExt;
pub use self::timeout::TimeoutExt;
pub use self::validation::{validate_field, ValidationOutcome};

/// Convenience prelude importing all timing extension traits.
pub mod prelude {
    pub use crate::audit::AuditExt;
    pub use crate::batch::BatchExt;
    pub use crate::debounce::DebounceExt;
    pub use crate::rate_limit::RateLimitExt;
    pub use crate::throttle::ThrottleExt;
    pub use crate::timeout::TimeoutExt;
}
