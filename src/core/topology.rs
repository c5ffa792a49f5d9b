//! The validated state tree.
//!
//! A [`Topology`] is the immutable result of checking a declarative
//! descriptor: a flat arena of states keyed by a global name index, with
//! parent/child edges and transition endpoints stored as arena ids. The
//! arena owns every state and transition; nothing in the tree owns anything
//! else, so the id edges can never dangle.
//!
//! Construction runs in two passes, as the descriptor tree is walked
//! breadth-first:
//!
//! 1. **Allocation** — assign ids and populate the name index, rejecting
//!    duplicate names.
//! 2. **Link** — resolve children, determine each compound's initial child,
//!    and materialise transitions with their targets resolved against the
//!    index.

use std::collections::{HashMap, VecDeque};

use crate::builder::error::BuildError;
use crate::builder::{StateBuilder, TransitionBuilder};
use crate::core::action::Action;
use crate::core::guard::Guard;

/// Index of a state in the topology arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct StateId(usize);

impl StateId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Index of a transition in the topology's transition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct TransitionId(usize);

/// What kind of node a state is, fixed at build time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StateKind {
    /// No children.
    Atomic,
    /// Children with exactly one designated initial child.
    Compound { initial: StateId },
    /// Children that are all active whenever the state is.
    Parallel,
}

/// A single state: its place in the tree, its callbacks, its transitions.
#[derive(Debug)]
pub(crate) struct StateNode {
    pub(crate) name: String,
    pub(crate) kind: StateKind,
    pub(crate) parent: Option<StateId>,
    /// Declaration order; observable as entry/exit order in parallel regions.
    pub(crate) children: Vec<StateId>,
    pub(crate) entry_actions: Vec<Action>,
    pub(crate) exit_actions: Vec<Action>,
    /// Declaration order; observable as firing order within a state.
    pub(crate) transitions: Vec<TransitionId>,
}

/// A materialised transition. The source is the declaring state; a missing
/// target makes the transition targetless (action only, no state change).
#[derive(Debug)]
pub(crate) struct Transition {
    pub(crate) source: StateId,
    pub(crate) target: Option<StateId>,
    pub(crate) event: String,
    pub(crate) guard: Option<Guard>,
    pub(crate) action: Option<Action>,
}

/// The immutable, validated machine topology.
#[derive(Debug)]
pub(crate) struct Topology {
    states: Vec<StateNode>,
    transitions: Vec<Transition>,
    index: HashMap<String, StateId>,
    root: StateId,
}

impl Topology {
    /// Check and link a root descriptor into a topology.
    pub(crate) fn build(root_def: StateBuilder) -> Result<Self, BuildError> {
        // Allocation pass: ids in breadth-first order, names must be unique.
        let mut index: HashMap<String, StateId> = HashMap::new();
        {
            let mut queue: VecDeque<&StateBuilder> = VecDeque::new();
            queue.push_back(&root_def);
            while let Some(def) = queue.pop_front() {
                let id = StateId(index.len());
                if index.insert(def.name.clone(), id).is_some() {
                    return Err(BuildError::DuplicateStateIdentifier(def.name.clone()));
                }
                for child in &def.children {
                    queue.push_back(child);
                }
            }
        }

        // Link pass: same breadth-first order, so ids line up with the arena.
        let mut states: Vec<StateNode> = Vec::with_capacity(index.len());
        let mut transitions: Vec<Transition> = Vec::new();
        let mut queue: VecDeque<(Option<StateId>, StateBuilder)> = VecDeque::new();
        queue.push_back((None, root_def));

        while let Some((parent, def)) = queue.pop_front() {
            let StateBuilder {
                name,
                parallel,
                children,
                transitions: transition_defs,
                entry_actions,
                exit_actions,
                ..
            } = def;
            let id = index[&name];
            debug_assert_eq!(id.index(), states.len());

            let child_ids: Vec<StateId> = children.iter().map(|c| index[&c.name]).collect();

            let mut initial = None;
            for (child, &child_id) in children.iter().zip(&child_ids) {
                if child.initial {
                    if initial.is_some() {
                        return Err(BuildError::AlreadyHasInitial(name));
                    }
                    initial = Some(child_id);
                }
            }

            let kind = if child_ids.is_empty() {
                StateKind::Atomic
            } else if parallel {
                // An initial tag under a parallel parent is tolerated and
                // ignored; all children activate together anyway.
                StateKind::Parallel
            } else {
                match initial {
                    Some(initial) => StateKind::Compound { initial },
                    None => return Err(BuildError::NoInitialState(name)),
                }
            };

            let mut transition_ids = Vec::with_capacity(transition_defs.len());
            for transition_def in transition_defs {
                let TransitionBuilder {
                    event,
                    target,
                    guard,
                    action,
                    error,
                } = transition_def;
                if let Some(error) = error {
                    return Err(error);
                }
                let target = match target {
                    Some(target_name) => match index.get(&target_name) {
                        Some(&target_id) => Some(target_id),
                        None => return Err(BuildError::NoSuchState(target_name)),
                    },
                    None => None,
                };
                let transition_id = TransitionId(transitions.len());
                transitions.push(Transition {
                    source: id,
                    target,
                    event: event.unwrap_or_default(),
                    guard,
                    action,
                });
                transition_ids.push(transition_id);
            }

            states.push(StateNode {
                name,
                kind,
                parent,
                children: child_ids,
                entry_actions,
                exit_actions,
                transitions: transition_ids,
            });

            for child in children {
                queue.push_back((Some(id), child));
            }
        }

        Ok(Topology {
            states,
            transitions,
            index,
            root: StateId(0),
        })
    }

    pub(crate) fn state(&self, id: StateId) -> &StateNode {
        &self.states[id.index()]
    }

    pub(crate) fn transition(&self, id: TransitionId) -> &Transition {
        &self.transitions[id.0]
    }

    pub(crate) fn root(&self) -> StateId {
        self.root
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<StateId> {
        self.index.get(name).copied()
    }

    pub(crate) fn state_count(&self) -> usize {
        self.states.len()
    }

    pub(crate) fn is_parallel(&self, id: StateId) -> bool {
        matches!(self.state(id).kind, StateKind::Parallel)
    }
}
