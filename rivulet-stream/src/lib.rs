// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod changes;
pub mod combine_with_previous;
pub mod distinct_until_changed;
pub mod logging;
pub mod map_latest;
pub mod on_error;
pub mod scan;
pub mod share;
pub mod start_with;
pub mod state_machine;
pub mod stream_items;
pub mod switch_on;
pub mod tap;

pub use self::changes::{Changed, ChangesExt};
pub use self::combine_with_previous::{CombineWithPreviousExt, WithPrevious};
pub use self::distinct_until_changed::DistinctUntilChangedExt;
pub use self::map_latest::MapLatestExt;
pub use self::on_error::OnErrorExt;
pub use self::scan::ScanStreamExt;
pub use self::share::{ShareLatest, SharedStream};
pub use self::start_with::StartWithExt;
pub use self::state_machine::{run_state_machine, StateMachineSpec};
pub use self::stream_items::{from_unbounded_receiver, IntoStreamItems};
pub use self::switch_on::switch_on;
pub use self::tap::TapExt;

/// Convenience prelude importing all operator extension traits.
pub mod prelude {
    pub use crate::changes::ChangesExt;
    pub use crate::combine_with_previous::CombineWithPreviousExt;
    pub use crate::distinct_until_changed::DistinctUntilChangedExt;
    pub use crate::map_latest::MapLatestExt;
    pub use crate::on_error::OnErrorExt;
    pub use crate::scan::ScanStreamExt;
    pub use crate::start_with::StartWithExt;
    pub use crate::stream_items::IntoStreamItems;
    pub use crate::tap::TapExt;
}
