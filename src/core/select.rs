//! Transition selection and conflict resolution.
//!
//! Selection realises the statechart scoping rule: each active region
//! contributes transitions from its innermost state that can answer the
//! event. Resolution then discards candidates whose exits would overlap an
//! already-accepted transition's, preferring the more deeply targeted one
//! and otherwise the earlier region in document order.

use std::collections::BTreeSet;

use tracing::debug;

use crate::core::sets::{exit_set, is_descendant_or_self};
use crate::core::topology::{StateId, TransitionId};
use crate::machine::Machine;

/// Candidate transitions for `event`, in the document order of the active
/// atoms that contributed them.
///
/// For each active atomic state the walk climbs toward the root; the first
/// state along the way owning at least one matching transition whose guard
/// passes ends the climb, and every such transition of that state is
/// accepted in declaration order. Guards of non-matching or shallower
/// transitions are never evaluated.
pub(crate) fn select_transitions(machine: &Machine, event: &str) -> Vec<TransitionId> {
    let topology = machine.topology();
    let configuration = machine.configuration();
    let mut selected = Vec::new();

    for atom in configuration.active_atoms(topology) {
        let mut cursor = Some(atom);
        while let Some(state) = cursor {
            let mut matched = false;
            for &transition_id in &topology.state(state).transitions {
                let transition = topology.transition(transition_id);
                if transition.event != event {
                    continue;
                }
                let admitted = transition
                    .guard
                    .as_ref()
                    .map_or(true, |guard| guard.check(machine));
                if admitted {
                    selected.push(transition_id);
                    matched = true;
                }
            }
            if matched {
                break;
            }
            cursor = topology.state(state).parent;
        }
    }

    selected
}

/// Filter `candidates` down to a non-conflicting subset.
///
/// Two targeted transitions conflict when their exit sets intersect. The
/// later candidate survives only if its target is a descendant of every
/// conflicting incumbent's target (the more specific transition displaces
/// the less specific one); otherwise the earlier region keeps its
/// transition and the candidate is preempted. Targetless candidates exit
/// nothing and are always accepted.
pub(crate) fn resolve_conflicts(
    machine: &Machine,
    candidates: Vec<TransitionId>,
) -> Vec<TransitionId> {
    let topology = machine.topology();
    let configuration = machine.configuration();
    let mut accepted: Vec<TransitionId> = Vec::new();

    for candidate in candidates {
        let Some(candidate_target) = topology.transition(candidate).target else {
            accepted.push(candidate);
            continue;
        };
        if accepted.is_empty() {
            accepted.push(candidate);
            continue;
        }

        let candidate_exits: BTreeSet<StateId> =
            exit_set(topology, configuration, candidate).into_iter().collect();
        let mut displaced: Vec<TransitionId> = Vec::new();
        let mut preempted = false;

        for &incumbent in &accepted {
            let Some(incumbent_target) = topology.transition(incumbent).target else {
                continue;
            };
            let incumbent_exits: BTreeSet<StateId> =
                exit_set(topology, configuration, incumbent).into_iter().collect();
            if candidate_exits.is_disjoint(&incumbent_exits) {
                continue;
            }
            if is_descendant_or_self(topology, candidate_target, incumbent_target) {
                displaced.push(incumbent);
            } else {
                preempted = true;
                break;
            }
        }

        if preempted {
            debug!(
                event = %topology.transition(candidate).event,
                source = %topology.state(topology.transition(candidate).source).name,
                "transition preempted by an earlier region"
            );
            continue;
        }
        accepted.retain(|t| !displaced.contains(t));
        accepted.push(candidate);
    }

    accepted
}
