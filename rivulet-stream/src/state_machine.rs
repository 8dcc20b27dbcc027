// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Generic event-driven state machine runner.

use crate::distinct_until_changed::DistinctUntilChangedExt;
use crate::scan::ScanStreamExt;
use crate::start_with::StartWithExt;
use futures::Stream;
use rivulet_core::StreamItem;
use std::collections::HashMap;
use std::hash::Hash;

/// A transition table over states `S` and events `E`.
///
/// A pair `(state, event)` not present in the table is an explicit no-op:
/// the event is ignored and the state is left unchanged. That is part of the
/// contract, not an error.
///
/// # Example
///
/// ```rust
/// use rivulet_stream::StateMachineSpec;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Door { Open, Closed }
///
/// let spec = StateMachineSpec::new(Door::Closed)
///     .transition(Door::Closed, "open", Door::Open)
///     .transition(Door::Open, "close", Door::Closed);
///
/// assert_eq!(spec.next_state(&Door::Closed, &"open"), Some(Door::Open));
/// assert_eq!(spec.next_state(&Door::Open, &"open"), None);
/// ```
#[derive(Clone, Debug)]
pub struct StateMachineSpec<S, E> {
    initial: S,
    transitions: HashMap<(S, E), S>,
}

impl<S, E> StateMachineSpec<S, E>
where
    S: Clone + Eq + Hash,
    E: Clone + Eq + Hash,
{
    /// Creates a spec with the given initial state and no transitions.
    pub fn new(initial: S) -> Self {
        Self {
            initial,
            transitions: HashMap::new(),
        }
    }

    /// Adds a transition `(from, event) -> to`, replacing any existing one
    /// for the same pair.
    #[must_use]
    pub fn transition(mut self, from: S, event: E, to: S) -> Self {
        self.transitions.insert((from, event), to);
        self
    }

    /// The state the machine starts in.
    pub fn initial(&self) -> &S {
        &self.initial
    }

    /// Looks up the target state for `(from, event)`, if the table has one.
    pub fn next_state(&self, from: &S, event: &E) -> Option<S> {
        self.transitions
            .get(&(from.clone(), event.clone()))
            .cloned()
    }
}

/// Folds an event stream into a state stream using a transition table.
///
/// Emits the initial state immediately, then applies each event to the
/// current state. Events without a matching transition are ignored; a
/// transition that lands on the state already emitted produces no duplicate
/// emission (distinct-until-changed semantics). Errors from the event stream
/// propagate unchanged.
///
/// # Example
///
/// ```rust
/// use rivulet_stream::{run_state_machine, IntoStreamItems, StateMachineSpec};
/// use futures::{stream, StreamExt};
///
/// # async fn example() {
/// let spec = StateMachineSpec::new('A')
///     .transition('A', 1, 'B')
///     .transition('B', 2, 'A');
///
/// let events = stream::iter(vec![1, 1, 2]).stream_items();
/// let states: Vec<char> = run_state_machine(spec, events)
///     .map(|item| item.unwrap())
///     .collect()
///     .await;
/// assert_eq!(states, vec!['A', 'B', 'A']);
/// # }
/// ```
pub fn run_state_machine<S, E, St>(
    spec: StateMachineSpec<S, E>,
    events: St,
) -> impl Stream<Item = StreamItem<S>>
where
    St: Stream<Item = StreamItem<E>>,
    S: Clone + Eq + Hash,
    E: Clone + Eq + Hash,
{
    let initial = spec.initial().clone();

    events
        .scan_items(initial.clone(), move |state: &mut S, event: &E| {
            if let Some(next) = spec.next_state(state, event) {
                *state = next;
            }
            state.clone()
        })
        .start_with(initial)
        .distinct_until_changed()
}
