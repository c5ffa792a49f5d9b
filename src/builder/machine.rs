//! Builder for the machine itself.

use crate::builder::error::BuildError;
use crate::builder::state::StateBuilder;
use crate::builder::transition::TransitionBuilder;
use crate::core::action::IntoAction;
use crate::core::topology::Topology;
use crate::machine::Machine;

/// Builder for a whole machine: the descriptor of the implicit root state.
///
/// Top-level states, callbacks, and transitions declared here belong to a
/// compound state named `"root"`; tagging the builder [`parallel`] makes
/// the root parallel instead, so every top-level state activates together.
///
/// [`parallel`]: MachineBuilder::parallel
///
/// # Example
///
/// ```rust
/// use strata::{Machine, StateBuilder};
///
/// let mut machine = Machine::builder()
///     .parallel()
///     .state(StateBuilder::new("audio"))
///     .state(StateBuilder::new("video"))
///     .build()
///     .unwrap();
///
/// machine.enter();
/// assert!(machine.in_state("audio") && machine.in_state("video"));
/// ```
pub struct MachineBuilder {
    root: StateBuilder,
}

impl MachineBuilder {
    /// Start declaring a machine.
    pub fn new() -> Self {
        Self {
            root: StateBuilder::new("root"),
        }
    }

    /// Make the root parallel: every top-level state is active whenever
    /// the machine is.
    pub fn parallel(mut self) -> Self {
        self.root = self.root.parallel();
        self
    }

    /// Add a top-level state.
    pub fn state(mut self, state: StateBuilder) -> Self {
        self.root = self.root.state(state);
        self
    }

    /// Add a transition declared on the root, reachable from every active
    /// atom's upward walk.
    pub fn transition(mut self, transition: TransitionBuilder) -> Self {
        self.root = self.root.transition(transition);
        self
    }

    /// Add a root entry callback, run when the machine is entered.
    pub fn on_entry<M>(mut self, action: impl IntoAction<M>) -> Self {
        self.root = self.root.on_entry(action);
        self
    }

    /// Add a root exit callback, run when the machine is left.
    pub fn on_exit<M>(mut self, action: impl IntoAction<M>) -> Self {
        self.root = self.root.on_exit(action);
        self
    }

    /// Shorthand for a machine-wide targetless reaction to `event`.
    pub fn on_event<M>(mut self, event: impl Into<String>, action: impl IntoAction<M>) -> Self {
        self.root = self.root.on_event(event, action);
        self
    }

    /// Validate the declared topology and produce an inactive machine.
    pub fn build(self) -> Result<Machine, BuildError> {
        Topology::build(self.root).map(Machine::from_topology)
    }
}

impl Default for MachineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn an_empty_machine_builds() {
        let machine = MachineBuilder::new().build();
        assert!(machine.is_ok());
    }

    #[test]
    fn build_reports_the_first_topology_violation() {
        let result = MachineBuilder::new()
            .state(StateBuilder::new("a").initial())
            .state(StateBuilder::new("a"))
            .build();

        assert!(matches!(
            result.unwrap_err(),
            BuildError::DuplicateStateIdentifier(name) if name == "a"
        ));
    }

    #[test]
    fn build_reports_transition_declaration_errors() {
        let result = MachineBuilder::new()
            .state(
                StateBuilder::new("a")
                    .initial()
                    .transition(TransitionBuilder::new().on("e").on("f")),
            )
            .build();

        assert!(matches!(result.unwrap_err(), BuildError::EventAlreadySpecified));
    }

    #[test]
    fn the_parallel_flag_propagates_to_the_root() {
        let mut machine = MachineBuilder::new()
            .parallel()
            .state(StateBuilder::new("a"))
            .state(StateBuilder::new("b"))
            .build()
            .unwrap();

        machine.enter();
        assert!(machine.in_state("a") && machine.in_state("b"));
    }

    #[test]
    fn a_built_machine_starts_inactive() {
        let machine = MachineBuilder::new().build().unwrap();
        assert!(!machine.is_active());
        assert!(!machine.in_state("root"));
    }
}
