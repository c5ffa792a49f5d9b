//! Execution trace.
//!
//! The machine appends a record for every dispatched event, fired
//! transition, and state entry/exit, in the order they happened. The trace
//! is plain in-memory observability: it is never written anywhere, and
//! clearing it does not affect execution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observable step of machine execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceRecord {
    /// An event was dequeued for processing.
    EventDispatched { event: String, at: DateTime<Utc> },
    /// A state's entry callbacks were about to run.
    StateEntered { state: String, at: DateTime<Utc> },
    /// A state's exit callbacks were about to run.
    StateExited { state: String, at: DateTime<Utc> },
    /// A selected transition fired; `target` is `None` for targetless
    /// transitions.
    TransitionFired {
        source: String,
        target: Option<String>,
        event: String,
        at: DateTime<Utc>,
    },
}

impl TraceRecord {
    /// The state name this record concerns, if it concerns one.
    pub fn state(&self) -> Option<&str> {
        match self {
            TraceRecord::StateEntered { state, .. } | TraceRecord::StateExited { state, .. } => {
                Some(state)
            }
            _ => None,
        }
    }
}

/// Ordered record of everything a machine did since the last clear.
///
/// # Example
///
/// ```rust
/// use strata::{Machine, StateBuilder, TraceRecord};
///
/// let mut machine = Machine::builder()
///     .state(StateBuilder::new("only").initial())
///     .build()
///     .unwrap();
/// machine.enter();
///
/// let entered: Vec<&str> = machine
///     .trace()
///     .records()
///     .iter()
///     .filter_map(|r| match r {
///         TraceRecord::StateEntered { state, .. } => Some(state.as_str()),
///         _ => None,
///     })
///     .collect();
/// assert_eq!(entered, vec!["root", "only"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Trace {
    records: Vec<TraceRecord>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop all records.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub(crate) fn dispatched(&mut self, event: &str) {
        self.records.push(TraceRecord::EventDispatched {
            event: event.to_string(),
            at: Utc::now(),
        });
    }

    pub(crate) fn entered(&mut self, state: &str) {
        self.records.push(TraceRecord::StateEntered {
            state: state.to_string(),
            at: Utc::now(),
        });
    }

    pub(crate) fn exited(&mut self, state: &str) {
        self.records.push(TraceRecord::StateExited {
            state: state.to_string(),
            at: Utc::now(),
        });
    }

    pub(crate) fn fired(&mut self, source: &str, target: Option<&str>, event: &str) {
        self.records.push(TraceRecord::TransitionFired {
            source: source.to_string(),
            target: target.map(str::to_string),
            event: event.to_string(),
            at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{StateBuilder, TransitionBuilder};
    use crate::machine::Machine;

    fn kinds(trace: &Trace) -> Vec<&'static str> {
        trace
            .records()
            .iter()
            .map(|record| match record {
                TraceRecord::EventDispatched { .. } => "event",
                TraceRecord::StateEntered { .. } => "entered",
                TraceRecord::StateExited { .. } => "exited",
                TraceRecord::TransitionFired { .. } => "fired",
            })
            .collect()
    }

    fn player() -> Machine {
        Machine::builder()
            .state(
                StateBuilder::new("stopped")
                    .initial()
                    .transition(TransitionBuilder::new().on("play").to("playing")),
            )
            .state(StateBuilder::new("playing"))
            .build()
            .unwrap()
    }

    #[test]
    fn a_microstep_is_recorded_in_execution_order() {
        let mut machine = player();
        machine.enter();
        machine.clear_trace();

        machine.push_event("play");

        assert_eq!(kinds(machine.trace()), vec!["event", "exited", "fired", "entered"]);
        match &machine.trace().records()[2] {
            TraceRecord::TransitionFired { source, target, event, .. } => {
                assert_eq!(source, "stopped");
                assert_eq!(target.as_deref(), Some("playing"));
                assert_eq!(event, "play");
            }
            other => panic!("unexpected record: {other:?}"),
        }
    }

    #[test]
    fn inert_events_still_leave_a_dispatch_record() {
        let mut machine = player();
        machine.enter();
        machine.clear_trace();

        machine.push_event("nothing-matches");

        assert_eq!(kinds(machine.trace()), vec!["event"]);
    }

    #[test]
    fn clearing_forgets_but_does_not_disturb() {
        let mut machine = player();
        machine.enter();
        machine.clear_trace();
        assert!(machine.trace().is_empty());

        machine.push_event("play");
        assert!(machine.in_state("playing"));
        assert!(!machine.trace().is_empty());
    }

    #[test]
    fn records_round_trip_through_serde() {
        let mut machine = player();
        machine.enter();
        machine.push_event("play");

        let json = serde_json::to_string(machine.trace()).unwrap();
        let restored: Trace = serde_json::from_str(&json).unwrap();

        assert_eq!(machine.trace().records(), restored.records());
    }

    #[test]
    fn state_accessor_picks_out_entry_and_exit_records() {
        let mut machine = player();
        machine.enter();

        let states: Vec<&str> = machine
            .trace()
            .records()
            .iter()
            .filter_map(TraceRecord::state)
            .collect();
        assert_eq!(states, vec!["root", "stopped"]);
    }
}
