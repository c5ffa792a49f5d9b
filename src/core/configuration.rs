//! Tracking of which states are currently active.
//!
//! The representation is the one the statechart model implies: every
//! compound state carries a single active-child pointer (cleared while the
//! compound is inactive), parallel states need no pointer because all their
//! children share their parent's activeness, and the root's activeness is
//! the machine-level flag. Activeness of any state is then a walk from the
//! state toward the root.

use serde::{Deserialize, Serialize};

use crate::core::topology::{StateId, StateKind, Topology};

/// The live activeness bookkeeping for one machine.
#[derive(Debug)]
pub(crate) struct Configuration {
    active: bool,
    active_child: Vec<Option<StateId>>,
}

impl Configuration {
    pub(crate) fn new(state_count: usize) -> Self {
        Configuration {
            active: false,
            active_child: vec![None; state_count],
        }
    }

    pub(crate) fn machine_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_machine_active(&mut self, active: bool) {
        self.active = active;
    }

    pub(crate) fn active_child(&self, parent: StateId) -> Option<StateId> {
        self.active_child[parent.index()]
    }

    pub(crate) fn set_active_child(&mut self, parent: StateId, child: StateId) {
        self.active_child[parent.index()] = Some(child);
    }

    pub(crate) fn clear_active_child(&mut self, parent: StateId) {
        self.active_child[parent.index()] = None;
    }

    /// Whether `id` is active under the current configuration.
    pub(crate) fn is_active(&self, topology: &Topology, id: StateId) -> bool {
        match topology.state(id).parent {
            None => self.active,
            Some(parent) => match topology.state(parent).kind {
                StateKind::Parallel => self.is_active(topology, parent),
                _ => {
                    self.active_child(parent) == Some(id) && self.is_active(topology, parent)
                }
            },
        }
    }

    /// Currently active atomic states, in document order.
    pub(crate) fn active_atoms(&self, topology: &Topology) -> Vec<StateId> {
        let mut atoms = Vec::new();
        if self.active {
            self.collect_atoms(topology, topology.root(), &mut atoms);
        }
        atoms
    }

    fn collect_atoms(&self, topology: &Topology, id: StateId, atoms: &mut Vec<StateId>) {
        match topology.state(id).kind {
            StateKind::Atomic => atoms.push(id),
            StateKind::Parallel => {
                for &child in &topology.state(id).children {
                    self.collect_atoms(topology, child, atoms);
                }
            }
            StateKind::Compound { .. } => {
                if let Some(child) = self.active_child(id) {
                    self.collect_atoms(topology, child, atoms);
                }
            }
        }
    }

    /// Currently active strict descendants of `scope`, in document order.
    ///
    /// Callers are expected to have established that `scope` itself is
    /// active; the walk only follows active children downward.
    pub(crate) fn active_descendants(&self, topology: &Topology, scope: StateId) -> Vec<StateId> {
        let mut descendants = Vec::new();
        self.collect_descendants(topology, scope, &mut descendants);
        descendants
    }

    fn collect_descendants(
        &self,
        topology: &Topology,
        id: StateId,
        descendants: &mut Vec<StateId>,
    ) {
        match topology.state(id).kind {
            StateKind::Atomic => {}
            StateKind::Parallel => {
                for &child in &topology.state(id).children {
                    descendants.push(child);
                    self.collect_descendants(topology, child, descendants);
                }
            }
            StateKind::Compound { .. } => {
                if let Some(child) = self.active_child(id) {
                    descendants.push(child);
                    self.collect_descendants(topology, child, descendants);
                }
            }
        }
    }

    /// A serialisable view of the active configuration.
    pub(crate) fn snapshot(&self, topology: &Topology) -> ConfigurationSnapshot {
        if !self.active {
            return ConfigurationSnapshot {
                active: false,
                states: Vec::new(),
            };
        }
        let root = topology.root();
        let mut states = vec![topology.state(root).name.clone()];
        states.extend(
            self.active_descendants(topology, root)
                .into_iter()
                .map(|id| topology.state(id).name.clone()),
        );
        ConfigurationSnapshot {
            active: true,
            states,
        }
    }
}

/// The set of active state names at one instant, in document order.
///
/// Snapshots compare equal iff the machines they were taken from would
/// answer every `in_state` query identically, which makes them the natural
/// vehicle for configuration round-trip checks and host-side inspection.
///
/// # Example
///
/// ```rust
/// use strata::{Machine, StateBuilder};
///
/// let mut machine = Machine::builder()
///     .state(StateBuilder::new("on").initial())
///     .state(StateBuilder::new("off"))
///     .build()
///     .unwrap();
///
/// machine.enter();
/// let before = machine.snapshot();
/// machine.leave();
/// machine.enter();
/// assert_eq!(machine.snapshot(), before);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationSnapshot {
    /// Machine-level active flag.
    pub active: bool,
    /// Names of every active state, document order, root first.
    pub states: Vec<String>,
}
