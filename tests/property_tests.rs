//! Property-based tests for the execution engine.
//!
//! These tests drive a fixed, deliberately awkward topology (nested
//! compounds inside a parallel region) with randomly generated event
//! streams and verify that the statechart invariants hold after every
//! single microstep.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use strata::{Machine, StateBuilder, TraceRecord, TransitionBuilder};

type Counters = Arc<Mutex<HashMap<String, i64>>>;

const EVENTS: &[&str] = &[
    "start", "stop", "work", "verbose", "finish", "reset", "noise", "",
];

const STATES: &[&str] = &[
    "ready", "running", "fetch", "waiting", "busy", "log", "quiet", "chatty", "done",
];

/// A state whose entry/exit callbacks keep a signed activation count.
fn tracked(name: &str, counters: &Counters) -> StateBuilder {
    let up = {
        let counters = Arc::clone(counters);
        let name = name.to_string();
        move || {
            *counters.lock().unwrap().entry(name.clone()).or_insert(0) += 1;
        }
    };
    let down = {
        let counters = Arc::clone(counters);
        let name = name.to_string();
        move || {
            *counters.lock().unwrap().entry(name.clone()).or_insert(0) -= 1;
        }
    };
    StateBuilder::new(name).on_entry(up).on_exit(down)
}

/// root -> { ready*, running || { fetch { waiting*, busy }, log { quiet*,
/// chatty } }, done }, with transitions crossing every level.
fn build_machine(counters: &Counters) -> Machine {
    Machine::builder()
        .state(
            tracked("ready", counters)
                .initial()
                .transition(TransitionBuilder::new().on("start").to("running")),
        )
        .state(
            tracked("running", counters)
                .parallel()
                .transition(TransitionBuilder::new().on("stop").to("ready"))
                .transition(TransitionBuilder::new().on("finish").to("done"))
                .state(
                    tracked("fetch", counters)
                        .state(
                            tracked("waiting", counters)
                                .initial()
                                .transition(TransitionBuilder::new().on("work").to("busy")),
                        )
                        .state(
                            tracked("busy", counters)
                                .transition(TransitionBuilder::new().on("work").to("waiting")),
                        ),
                )
                .state(
                    tracked("log", counters)
                        .state(
                            tracked("quiet", counters)
                                .initial()
                                .transition(TransitionBuilder::new().on("verbose").to("chatty")),
                        )
                        .state(
                            tracked("chatty", counters)
                                .transition(TransitionBuilder::new().on("verbose").to("quiet")),
                        ),
                ),
        )
        .state(
            tracked("done", counters)
                .transition(TransitionBuilder::new().on("reset").to("ready")),
        )
        .on_event("noise", || {})
        .build()
        .expect("the fixed test topology is valid")
}

fn assert_invariants(machine: &Machine, counters: &Counters) -> Result<(), TestCaseError> {
    let counts = counters.lock().unwrap().clone();

    // Entry/exit callbacks pair up, and their balance is exactly the
    // state's activeness.
    for &name in STATES {
        let delta = counts.get(name).copied().unwrap_or(0);
        prop_assert!(delta == 0 || delta == 1, "activation count of {} is {}", name, delta);
        prop_assert!(
            machine.in_state(name) == (delta == 1),
            "in_state({}) disagrees with its callback balance {}",
            name,
            delta
        );
    }

    if machine.is_active() {
        // The root compound has exactly one active child.
        let top = ["ready", "running", "done"]
            .into_iter()
            .filter(|s| machine.in_state(s))
            .count();
        prop_assert!(top == 1, "{} top-level states active", top);
    }

    if machine.in_state("running") {
        // Both regions of the parallel are active, each with exactly one
        // active leaf.
        prop_assert!(machine.in_state("fetch") && machine.in_state("log"));
        prop_assert!(machine.in_state("waiting") ^ machine.in_state("busy"));
        prop_assert!(machine.in_state("quiet") ^ machine.in_state("chatty"));
    } else {
        for &name in &["fetch", "waiting", "busy", "log", "quiet", "chatty"] {
            prop_assert!(!machine.in_state(name));
        }
    }

    Ok(())
}

prop_compose! {
    fn arbitrary_event()(index in 0..EVENTS.len()) -> String {
        EVENTS[index].to_string()
    }
}

proptest! {
    #[test]
    fn invariants_hold_after_every_microstep(
        events in prop::collection::vec(arbitrary_event(), 0..32)
    ) {
        let counters: Counters = Counters::default();
        let mut machine = build_machine(&counters);

        machine.enter();
        assert_invariants(&machine, &counters)?;

        for event in events {
            machine.push_event(event);
            assert_invariants(&machine, &counters)?;
        }
    }

    #[test]
    fn leave_unwinds_every_activation(
        events in prop::collection::vec(arbitrary_event(), 0..32)
    ) {
        let counters: Counters = Counters::default();
        let mut machine = build_machine(&counters);

        machine.enter();
        for event in events {
            machine.push_event(event);
        }
        machine.leave();

        prop_assert!(!machine.is_active());
        let counts = counters.lock().unwrap().clone();
        for &name in STATES {
            let delta = counts.get(name).copied().unwrap_or(0);
            prop_assert!(delta == 0, "{} left with activation count {}", name, delta);
            prop_assert!(!machine.in_state(name));
        }
    }

    #[test]
    fn reentering_restores_the_initial_configuration(
        events in prop::collection::vec(arbitrary_event(), 0..32)
    ) {
        let counters: Counters = Counters::default();
        let mut machine = build_machine(&counters);

        let fresh_counters: Counters = Counters::default();
        let mut fresh = build_machine(&fresh_counters);
        fresh.enter();

        machine.enter();
        for event in events {
            machine.push_event(event);
        }
        machine.leave();
        machine.enter();

        prop_assert_eq!(machine.snapshot(), fresh.snapshot());
    }

    #[test]
    fn snapshots_round_trip_through_serde(
        events in prop::collection::vec(arbitrary_event(), 0..32)
    ) {
        let counters: Counters = Counters::default();
        let mut machine = build_machine(&counters);

        machine.enter();
        for event in events {
            machine.push_event(event);
        }

        let snapshot = machine.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: strata::ConfigurationSnapshot = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(snapshot, restored);
    }

    #[test]
    fn configuration_changes_are_backed_by_fired_transitions(
        events in prop::collection::vec(arbitrary_event(), 1..24)
    ) {
        let counters: Counters = Counters::default();
        let mut machine = build_machine(&counters);
        machine.enter();

        for event in events {
            let before = machine.snapshot();
            machine.clear_trace();
            machine.push_event(event);

            if machine.snapshot() != before {
                let fired_with_target = machine.trace().records().iter().any(|record| {
                    matches!(
                        record,
                        TraceRecord::TransitionFired { target: Some(_), .. }
                    )
                });
                prop_assert!(fired_with_target, "configuration changed without a targeted transition");
            }
        }
    }

    #[test]
    fn every_push_is_dispatched_exactly_once(
        events in prop::collection::vec(arbitrary_event(), 0..24)
    ) {
        let counters: Counters = Counters::default();
        let mut machine = build_machine(&counters);
        machine.enter();
        machine.clear_trace();

        for event in &events {
            machine.push_event(event.clone());
        }

        let dispatched = machine
            .trace()
            .records()
            .iter()
            .filter(|record| matches!(record, TraceRecord::EventDispatched { .. }))
            .count();
        prop_assert_eq!(dispatched, events.len());
    }
}
