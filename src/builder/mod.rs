//! Declarative topology construction.
//!
//! A machine is declared as a tree of [`StateBuilder`]s carrying
//! [`TransitionBuilder`]s and callbacks, handed to a [`MachineBuilder`]
//! whose `build()` validates the whole declaration and returns the
//! executable machine or the first [`BuildError`] found.

pub mod error;
pub mod machine;
pub mod state;
pub mod transition;

pub use error::BuildError;
pub use machine::MachineBuilder;
pub use state::StateBuilder;
pub use transition::TransitionBuilder;

use crate::core::guard::IntoGuard;

/// An unguarded, action-free transition from `event` to `target`.
///
/// # Example
///
/// ```rust
/// use strata::builder::simple_transition;
/// use strata::{Machine, StateBuilder};
///
/// let mut machine = Machine::builder()
///     .state(
///         StateBuilder::new("red")
///             .initial()
///             .transition(simple_transition("go", "green")),
///     )
///     .state(StateBuilder::new("green"))
///     .build()
///     .unwrap();
///
/// machine.enter();
/// machine.push_event("go");
/// assert!(machine.in_state("green"));
/// ```
pub fn simple_transition(
    event: impl Into<String>,
    target: impl Into<String>,
) -> TransitionBuilder {
    TransitionBuilder::new().on(event).to(target)
}

/// A guarded, action-free transition from `event` to `target`.
///
/// # Example
///
/// ```rust
/// use strata::builder::guarded_transition;
/// use strata::{Machine, StateBuilder};
///
/// let mut machine = Machine::builder()
///     .state(
///         StateBuilder::new("closed")
///             .initial()
///             .transition(guarded_transition("open", "opened", || false)),
///     )
///     .state(StateBuilder::new("opened"))
///     .build()
///     .unwrap();
///
/// machine.enter();
/// machine.push_event("open");
/// assert!(machine.in_state("closed"));
/// ```
pub fn guarded_transition<M>(
    event: impl Into<String>,
    target: impl Into<String>,
    guard: impl IntoGuard<M>,
) -> TransitionBuilder {
    TransitionBuilder::new().on(event).to(target).when(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Machine;

    #[test]
    fn simple_transition_moves_the_machine() {
        let mut machine = Machine::builder()
            .state(
                StateBuilder::new("a")
                    .initial()
                    .transition(simple_transition("hop", "b")),
            )
            .state(StateBuilder::new("b"))
            .build()
            .unwrap();

        machine.enter();
        machine.push_event("hop");
        assert!(machine.in_state("b"));
    }

    #[test]
    fn guarded_transition_respects_its_guard() {
        let mut machine = Machine::builder()
            .state(
                StateBuilder::new("a")
                    .initial()
                    .transition(guarded_transition("hop", "b", || false)),
            )
            .state(StateBuilder::new("b"))
            .build()
            .unwrap();

        machine.enter();
        machine.push_event("hop");
        assert!(machine.in_state("a"));
    }
}
