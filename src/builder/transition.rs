//! Builder for declaring transitions.

use crate::builder::error::BuildError;
use crate::core::action::{Action, IntoAction};
use crate::core::guard::{Guard, IntoGuard};

/// Declarative description of one transition.
///
/// A transition carries at most one each of: event (`.on`), target (`.to`),
/// guard (`.when`), and action (`.action`). Declaring any of them twice is
/// a construction error, reported when the machine is built. A transition
/// without a target is *targetless*: it fires its action without changing
/// the configuration. A transition without an event answers only the empty
/// event name.
///
/// # Example
///
/// ```rust
/// use strata::{Machine, StateBuilder, TransitionBuilder};
///
/// let machine = Machine::builder()
///     .state(
///         StateBuilder::new("draft").initial().transition(
///             TransitionBuilder::new()
///                 .on("submit")
///                 .to("review")
///                 .when(|| true)
///                 .action(|| println!("submitted")),
///         ),
///     )
///     .state(StateBuilder::new("review"))
///     .build();
/// assert!(machine.is_ok());
/// ```
pub struct TransitionBuilder {
    pub(crate) event: Option<String>,
    pub(crate) target: Option<String>,
    pub(crate) guard: Option<Guard>,
    pub(crate) action: Option<Action>,
    pub(crate) error: Option<BuildError>,
}

impl TransitionBuilder {
    /// Start an empty transition declaration.
    pub fn new() -> Self {
        Self {
            event: None,
            target: None,
            guard: None,
            action: None,
            error: None,
        }
    }

    /// Set the triggering event name.
    pub fn on(mut self, event: impl Into<String>) -> Self {
        if self.event.is_some() {
            self.record(BuildError::EventAlreadySpecified);
        } else {
            self.event = Some(event.into());
        }
        self
    }

    /// Set the target state name.
    pub fn to(mut self, target: impl Into<String>) -> Self {
        if self.target.is_some() {
            self.record(BuildError::TargetAlreadySpecified);
        } else {
            self.target = Some(target.into());
        }
        self
    }

    /// Set the guard predicate.
    pub fn when<M>(mut self, guard: impl IntoGuard<M>) -> Self {
        if self.guard.is_some() {
            self.record(BuildError::ConditionAlreadySpecified);
        } else {
            self.guard = Some(guard.into_guard());
        }
        self
    }

    /// Set the transition action, run between the exits and the entries.
    pub fn action<M>(mut self, action: impl IntoAction<M>) -> Self {
        if self.action.is_some() {
            self.record(BuildError::ActionAlreadySpecified);
        } else {
            self.action = Some(action.into_action());
        }
        self
    }

    // The first violation wins; it surfaces when the machine is built.
    fn record(&mut self, error: BuildError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

impl Default for TransitionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
