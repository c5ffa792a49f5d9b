//! The execution engine's building blocks.
//!
//! Everything here operates on the validated, immutable topology:
//!
//! - topology — the arena-backed state tree and transition table
//! - configuration — which states are active right now
//! - selection — candidate transitions for an event, conflict-filtered
//! - sets — the ordered exit and entry lists a transition implies
//! - callbacks — [`Action`] and [`Guard`], with arity adaptation
//!
//! Only the callback types and the configuration snapshot are part of the
//! public surface; the machine drives the rest.

pub(crate) mod action;
pub(crate) mod configuration;
pub(crate) mod guard;
pub(crate) mod select;
pub(crate) mod sets;
pub(crate) mod topology;

pub use action::{Action, IntoAction};
pub use configuration::ConfigurationSnapshot;
pub use guard::{Guard, IntoGuard};

/// Marker for callbacks declared with a machine parameter.
///
/// Never named directly; inferred by [`IntoAction`] and [`IntoGuard`].
pub enum MachineArg {}

/// Marker for callbacks declared without parameters.
///
/// Never named directly; inferred by [`IntoAction`] and [`IntoGuard`].
pub enum NoArg {}
