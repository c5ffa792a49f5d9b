//! Exit-set and entry-set computation.
//!
//! A targeted transition's scope is the least common ancestor of its source
//! and target. Firing it leaves every active state inside that scope and
//! enters the chain down to the target plus the target's default
//! completion. The functions here only compute the ordered lists; applying
//! them (and running callbacks) is the machine's job.

use std::collections::VecDeque;

use crate::core::configuration::Configuration;
use crate::core::topology::{StateId, StateKind, Topology, TransitionId};

/// True when `state` is `ancestor` itself or lies beneath it.
pub(crate) fn is_descendant_or_self(
    topology: &Topology,
    state: StateId,
    ancestor: StateId,
) -> bool {
    let mut cursor = Some(state);
    while let Some(id) = cursor {
        if id == ancestor {
            return true;
        }
        cursor = topology.state(id).parent;
    }
    false
}

/// The first proper ancestor of `a` that contains `b` (possibly `b`
/// itself); the root when the chain runs out.
pub(crate) fn least_common_ancestor(topology: &Topology, a: StateId, b: StateId) -> StateId {
    let mut cursor = topology.state(a).parent;
    while let Some(ancestor) = cursor {
        if is_descendant_or_self(topology, b, ancestor) {
            return ancestor;
        }
        cursor = topology.state(ancestor).parent;
    }
    topology.root()
}

/// The states left if `transition` fired alone from the current
/// configuration: every active descendant of the transition's scope (never
/// the scope itself), in reverse document order — children before their
/// parent, later siblings' subtrees before earlier ones.
///
/// Targetless transitions exit nothing.
pub(crate) fn exit_set(
    topology: &Topology,
    configuration: &Configuration,
    transition: TransitionId,
) -> Vec<StateId> {
    let t = topology.transition(transition);
    let Some(target) = t.target else {
        return Vec::new();
    };
    let scope = least_common_ancestor(topology, t.source, target);
    if !configuration.is_active(topology, scope) {
        return Vec::new();
    }
    let mut exits = configuration.active_descendants(topology, scope);
    exits.reverse();
    exits
}

/// The states entered to activate `target` from the current configuration:
/// the chain of inactive ancestors topmost first, then `target`, then
/// `target`'s completion. A parallel state on the chain contributes its
/// off-path children, each with its own completion, in document order
/// around the on-path child.
pub(crate) fn entry_set(
    topology: &Topology,
    configuration: &Configuration,
    target: StateId,
) -> Vec<StateId> {
    let mut chain = vec![target];
    let mut cursor = topology.state(target).parent;
    while let Some(ancestor) = cursor {
        if configuration.is_active(topology, ancestor) {
            break;
        }
        chain.push(ancestor);
        cursor = topology.state(ancestor).parent;
    }
    chain.reverse();

    let mut entries = Vec::new();
    emit_chain(topology, &chain, 0, &mut entries);
    entries
}

fn emit_chain(topology: &Topology, chain: &[StateId], position: usize, entries: &mut Vec<StateId>) {
    let state = chain[position];
    entries.push(state);

    if position + 1 == chain.len() {
        entries.extend(completion(topology, state));
        return;
    }

    let on_path = chain[position + 1];
    if topology.is_parallel(state) {
        for &child in &topology.state(state).children {
            if child == on_path {
                emit_chain(topology, chain, position + 1, entries);
            } else {
                entries.push(child);
                entries.extend(completion(topology, child));
            }
        }
    } else {
        emit_chain(topology, chain, position + 1, entries);
    }
}

/// The default descent below `state`, breadth-first: the initial child of
/// each compound, every child of each parallel, down to the atoms.
pub(crate) fn completion(topology: &Topology, state: StateId) -> Vec<StateId> {
    let mut below = Vec::new();
    let mut fifo = VecDeque::from([state]);
    while let Some(current) = fifo.pop_front() {
        match topology.state(current).kind {
            StateKind::Atomic => {}
            StateKind::Compound { initial } => {
                below.push(initial);
                fifo.push_back(initial);
            }
            StateKind::Parallel => {
                for &child in &topology.state(current).children {
                    below.push(child);
                    fifo.push_back(child);
                }
            }
        }
    }
    below
}
