//! Builder for declaring states.

use crate::builder::transition::TransitionBuilder;
use crate::core::action::{Action, IntoAction};

/// Declarative description of one state and everything beneath it.
///
/// Children, transitions, and callbacks accumulate in declaration order;
/// that order is observable (sibling entry order in parallel regions,
/// firing order of same-event transitions, callback order within a state).
///
/// # Example
///
/// ```rust
/// use strata::{Machine, StateBuilder, TransitionBuilder};
///
/// let machine = Machine::builder()
///     .state(
///         StateBuilder::new("door")
///             .initial()
///             .state(
///                 StateBuilder::new("closed")
///                     .initial()
///                     .transition(TransitionBuilder::new().on("open").to("opened")),
///             )
///             .state(StateBuilder::new("opened"))
///             .on_entry(|| println!("watching the door")),
///     )
///     .build();
/// assert!(machine.is_ok());
/// ```
pub struct StateBuilder {
    pub(crate) name: String,
    pub(crate) initial: bool,
    pub(crate) parallel: bool,
    pub(crate) children: Vec<StateBuilder>,
    pub(crate) transitions: Vec<TransitionBuilder>,
    pub(crate) entry_actions: Vec<Action>,
    pub(crate) exit_actions: Vec<Action>,
}

impl StateBuilder {
    /// Start declaring a state with the given (machine-wide unique) name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial: false,
            parallel: false,
            children: Vec::new(),
            transitions: Vec::new(),
            entry_actions: Vec::new(),
            exit_actions: Vec::new(),
        }
    }

    /// Tag this state as its parent's initial child.
    pub fn initial(mut self) -> Self {
        self.initial = true;
        self
    }

    /// Make this state parallel: all children are active together and no
    /// initial designation is used.
    pub fn parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    /// Add a child state.
    pub fn state(mut self, child: StateBuilder) -> Self {
        self.children.push(child);
        self
    }

    /// Add a transition declared on this state.
    pub fn transition(mut self, transition: TransitionBuilder) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add an entry callback, run each time this state is entered.
    pub fn on_entry<M>(mut self, action: impl IntoAction<M>) -> Self {
        self.entry_actions.push(action.into_action());
        self
    }

    /// Add an exit callback, run each time this state is exited.
    pub fn on_exit<M>(mut self, action: impl IntoAction<M>) -> Self {
        self.exit_actions.push(action.into_action());
        self
    }

    /// Shorthand for a targetless transition: run `action` on `event`
    /// while this state is active, without changing the configuration.
    pub fn on_event<M>(self, event: impl Into<String>, action: impl IntoAction<M>) -> Self {
        self.transition(TransitionBuilder::new().on(event).action(action))
    }
}
