//! Entry, exit, and transition actions.
//!
//! Actions are side-effecting callbacks invoked while the machine executes
//! a microstep. Hosts may write them with or without a machine parameter;
//! [`IntoAction`] lifts the parameterless form into the uniform
//! machine-taking shape at declaration time, so the engine only ever deals
//! with one signature.

use std::fmt;
use std::sync::Arc;

use crate::core::{MachineArg, NoArg};
use crate::machine::Machine;

/// A uniform, shareable callback invoked with the running machine.
///
/// Receiving the machine lets an action query [`Machine::in_state`] or push
/// follow-up events; events pushed from inside an action are queued and
/// processed after the current microstep completes.
///
/// # Example
///
/// ```rust
/// use strata::{Machine, StateBuilder};
///
/// let mut machine = Machine::builder()
///     .state(StateBuilder::new("idle").initial().on_event("poke", |m: &mut Machine| {
///         m.push_event("poked-back");
///     }))
///     .build()
///     .unwrap();
/// machine.enter();
/// machine.push_event("poke");
/// ```
#[derive(Clone)]
pub struct Action {
    fun: Arc<dyn Fn(&mut Machine) + Send + Sync>,
}

impl Action {
    /// Wrap a machine-taking callback.
    pub fn new<F>(fun: F) -> Self
    where
        F: Fn(&mut Machine) + Send + Sync + 'static,
    {
        Action { fun: Arc::new(fun) }
    }

    /// Invoke the callback against the running machine.
    pub fn call(&self, machine: &mut Machine) {
        (self.fun)(machine);
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").finish_non_exhaustive()
    }
}

/// Conversion of host closures into [`Action`].
///
/// Implemented for `Fn(&mut Machine)` and for `Fn()`. The `Marker` type
/// parameter only disambiguates the two blanket implementations; it is
/// inferred from the closure's signature and never named by callers.
/// Closures with an unannotated parameter may need a type annotation
/// (`|m: &mut Machine| ..`) for inference to settle.
pub trait IntoAction<Marker> {
    /// Produce the uniform machine-taking form.
    fn into_action(self) -> Action;
}

impl<F> IntoAction<MachineArg> for F
where
    F: Fn(&mut Machine) + Send + Sync + 'static,
{
    fn into_action(self) -> Action {
        Action::new(self)
    }
}

impl<F> IntoAction<NoArg> for F
where
    F: Fn() + Send + Sync + 'static,
{
    fn into_action(self) -> Action {
        Action::new(move |_| self())
    }
}

impl IntoAction<()> for Action {
    fn into_action(self) -> Action {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn empty_machine() -> Machine {
        Machine::builder().build().unwrap()
    }

    #[test]
    fn parameterless_closure_adapts() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in = Arc::clone(&hits);

        let action = (move || {
            hits_in.fetch_add(1, Ordering::SeqCst);
        })
        .into_action();

        let mut machine = empty_machine();
        action.call(&mut machine);
        action.call(&mut machine);

        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn machine_taking_closure_adapts() {
        let action = (|m: &mut Machine| {
            m.push_event("noticed");
        })
        .into_action();

        let mut machine = empty_machine();
        machine.enter();
        action.call(&mut machine);

        // The empty root has no matching transitions; the event is inert.
        assert!(machine.is_active());
    }

    #[test]
    fn prebuilt_action_passes_through() {
        let action = Action::new(|_| {});
        let again = action.clone().into_action();

        let mut machine = empty_machine();
        again.call(&mut machine);
    }

    #[test]
    fn actions_are_cheaply_cloneable() {
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in = Arc::clone(&hits);

        let action = Action::new(move |_| {
            hits_in.fetch_add(1, Ordering::SeqCst);
        });
        let clone = action.clone();

        let mut machine = empty_machine();
        action.call(&mut machine);
        clone.call(&mut machine);

        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
