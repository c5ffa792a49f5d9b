//! Guard predicates for controlling transition selection.
//!
//! Guards are boolean callbacks evaluated while candidate transitions are
//! gathered; a transition whose guard returns `false` is passed over as if
//! it were not declared. Hosts may write guards with or without a machine
//! parameter; [`IntoGuard`] lifts the parameterless form into the uniform
//! machine-taking shape.

use std::fmt;
use std::sync::Arc;

use crate::core::{MachineArg, NoArg};
use crate::machine::Machine;

/// A predicate deciding whether a transition may fire.
///
/// Guards see the machine immutably, so they can inspect the current
/// configuration with [`Machine::in_state`] but cannot push events or
/// otherwise disturb the microstep that is evaluating them.
///
/// # Example
///
/// ```rust
/// use strata::{Machine, StateBuilder, TransitionBuilder};
///
/// let mut machine = Machine::builder()
///     .state(
///         StateBuilder::new("locked").initial().transition(
///             TransitionBuilder::new()
///                 .on("push")
///                 .to("open")
///                 .when(|m: &Machine| m.in_state("locked")),
///         ),
///     )
///     .state(StateBuilder::new("open"))
///     .build()
///     .unwrap();
///
/// machine.enter();
/// machine.push_event("push");
/// assert!(machine.in_state("open"));
/// ```
#[derive(Clone)]
pub struct Guard {
    predicate: Arc<dyn Fn(&Machine) -> bool + Send + Sync>,
}

impl Guard {
    /// Wrap a machine-inspecting predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Machine) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the predicate against the current machine.
    pub fn check(&self, machine: &Machine) -> bool {
        (self.predicate)(machine)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

/// Conversion of host closures into [`Guard`].
///
/// Implemented for `Fn(&Machine) -> bool` and for `Fn() -> bool`; the
/// `Marker` parameter disambiguates the blanket implementations and is
/// inferred from the closure's signature.
pub trait IntoGuard<Marker> {
    /// Produce the uniform machine-inspecting form.
    fn into_guard(self) -> Guard;
}

impl<F> IntoGuard<MachineArg> for F
where
    F: Fn(&Machine) -> bool + Send + Sync + 'static,
{
    fn into_guard(self) -> Guard {
        Guard::new(self)
    }
}

impl<F> IntoGuard<NoArg> for F
where
    F: Fn() -> bool + Send + Sync + 'static,
{
    fn into_guard(self) -> Guard {
        Guard::new(move |_| self())
    }
}

impl IntoGuard<()> for Guard {
    fn into_guard(self) -> Guard {
        self
    }
}
