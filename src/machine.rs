//! The machine: host API and the run-to-completion event loop.
//!
//! A [`Machine`] owns its validated topology, the live configuration, a
//! FIFO of pending events, and the execution trace. Everything happens on
//! the caller's thread: callbacks run in-line, and an event pushed from
//! inside a callback is queued and processed after the current microstep
//! completes.
//!
//! A microstep is the full pipeline triggered by one event: select
//! candidates, resolve conflicts, exit the union of exit sets, run the
//! transition actions, enter the union of entry sets.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::builder::MachineBuilder;
use crate::core::configuration::{Configuration, ConfigurationSnapshot};
use crate::core::select::{resolve_conflicts, select_transitions};
use crate::core::sets::{entry_set, exit_set};
use crate::core::topology::{StateId, StateKind, Topology};
use crate::trace::Trace;

/// An executable hierarchical state machine.
///
/// Built from a declarative topology, entered once, and driven by named
/// events. The machine is `Send` but not safe for concurrent use; the host
/// serialises access.
///
/// # Example
///
/// ```rust
/// use strata::{Machine, StateBuilder, TransitionBuilder};
///
/// let mut machine = Machine::builder()
///     .state(
///         StateBuilder::new("stopped")
///             .initial()
///             .transition(TransitionBuilder::new().on("play").to("playing")),
///     )
///     .state(
///         StateBuilder::new("playing")
///             .transition(TransitionBuilder::new().on("stop").to("stopped")),
///     )
///     .build()
///     .unwrap();
///
/// machine.enter();
/// assert!(machine.in_state("stopped"));
///
/// machine.push_event("play");
/// assert!(machine.in_state("playing"));
/// ```
#[derive(Debug)]
pub struct Machine {
    topology: Topology,
    configuration: Configuration,
    queue: VecDeque<String>,
    processing: bool,
    trace: Trace,
}

impl Machine {
    /// Start declaring a machine topology.
    pub fn builder() -> MachineBuilder {
        MachineBuilder::new()
    }

    pub(crate) fn from_topology(topology: Topology) -> Self {
        let configuration = Configuration::new(topology.state_count());
        Machine {
            topology,
            configuration,
            queue: VecDeque::new(),
            processing: false,
            trace: Trace::new(),
        }
    }

    pub(crate) fn topology(&self) -> &Topology {
        &self.topology
    }

    pub(crate) fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Whether the machine has been entered and not yet left.
    pub fn is_active(&self) -> bool {
        self.configuration.machine_active()
    }

    /// Whether the named state is active in the current configuration.
    ///
    /// Unknown names are not an error; they are simply never active. The
    /// implicit root answers to `"root"` and reports the machine flag.
    pub fn in_state(&self, name: &str) -> bool {
        match self.topology.lookup(name) {
            Some(id) => self.configuration.is_active(&self.topology, id),
            None => false,
        }
    }

    /// A serialisable view of the active configuration.
    pub fn snapshot(&self) -> ConfigurationSnapshot {
        self.configuration.snapshot(&self.topology)
    }

    /// The execution trace recorded so far.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Discard the execution trace recorded so far.
    pub fn clear_trace(&mut self) {
        self.trace.clear();
    }

    /// Activate the machine: enter the root and complete the initial
    /// descent, depth-first in document order. Idempotent.
    pub fn enter(&mut self) {
        if self.configuration.machine_active() {
            return;
        }
        debug!("entering machine");
        self.configuration.set_machine_active(true);

        let mut stack = vec![self.topology.root()];
        while let Some(id) = stack.pop() {
            self.enter_state(id);
            let kind = self.topology.state(id).kind;
            match kind {
                StateKind::Atomic => {}
                StateKind::Compound { initial } => stack.push(initial),
                StateKind::Parallel => {
                    for &child in self.topology.state(id).children.iter().rev() {
                        stack.push(child);
                    }
                }
            }
        }
    }

    /// Deactivate the machine: exit every active state, leaves first in
    /// reverse document order, then clear the active flag. Idempotent.
    pub fn leave(&mut self) {
        if !self.configuration.machine_active() {
            return;
        }
        debug!("leaving machine");

        let root = self.topology.root();
        let mut to_exit = vec![root];
        to_exit.extend(self.configuration.active_descendants(&self.topology, root));
        to_exit.reverse();
        for id in to_exit {
            self.exit_state(id);
        }
        self.configuration.set_machine_active(false);
    }

    /// Enqueue an event and, unless a processing frame is already on the
    /// stack, drain the queue synchronously — one microstep per event, in
    /// FIFO order. Pushes from inside callbacks only enqueue, which is
    /// what guarantees run-to-completion.
    ///
    /// Events the configuration cannot answer (unknown names, or any event
    /// while the machine is inactive) are consumed without effect.
    pub fn push_event(&mut self, event: impl Into<String>) {
        self.queue.push_back(event.into());
        self.process_queue();
    }

    fn process_queue(&mut self) {
        if self.processing {
            return;
        }
        self.processing = true;
        while let Some(event) = self.queue.pop_front() {
            debug!(event = %event, "dispatching event");
            self.trace.dispatched(&event);
            self.microstep(&event);
        }
        self.processing = false;
    }

    fn microstep(&mut self, event: &str) {
        let candidates = select_transitions(self, event);
        let selected = resolve_conflicts(self, candidates);
        if selected.is_empty() {
            return;
        }

        // Every exit set is computed against the pre-step configuration,
        // before any state is left.
        let mut to_exit = Vec::new();
        for &transition in &selected {
            to_exit.extend(exit_set(&self.topology, &self.configuration, transition));
        }
        for id in to_exit {
            self.exit_state(id);
        }

        for &transition in &selected {
            let (source, target, event_name, action) = {
                let t = self.topology.transition(transition);
                (
                    self.topology.state(t.source).name.clone(),
                    t.target.map(|id| self.topology.state(id).name.clone()),
                    t.event.clone(),
                    t.action.clone(),
                )
            };
            debug!(
                event = %event_name,
                source = %source,
                target = %target.as_deref().unwrap_or("-"),
                "firing transition"
            );
            self.trace.fired(&source, target.as_deref(), &event_name);
            if let Some(action) = action {
                action.call(self);
            }
        }

        // Entry sets see the post-exit configuration.
        let mut to_enter = Vec::new();
        for &transition in &selected {
            if let Some(target) = self.topology.transition(transition).target {
                to_enter.extend(entry_set(&self.topology, &self.configuration, target));
            }
        }
        for id in to_enter {
            self.enter_state(id);
        }
    }

    fn enter_state(&mut self, id: StateId) {
        if let Some(parent) = self.topology.state(id).parent {
            if !self.topology.is_parallel(parent) {
                self.configuration.set_active_child(parent, id);
            }
        }
        let name = self.topology.state(id).name.clone();
        trace!(state = %name, "entering state");
        self.trace.entered(&name);
        let actions = self.topology.state(id).entry_actions.clone();
        for action in actions {
            action.call(self);
        }
    }

    fn exit_state(&mut self, id: StateId) {
        if let Some(parent) = self.topology.state(id).parent {
            if !self.topology.is_parallel(parent) {
                self.configuration.clear_active_child(parent);
            }
        }
        let name = self.topology.state(id).name.clone();
        trace!(state = %name, "exiting state");
        self.trace.exited(&name);
        let actions = self.topology.state(id).exit_actions.clone();
        for action in actions {
            action.call(self);
        }
    }
}
