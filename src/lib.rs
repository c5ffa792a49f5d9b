//! Strata: hierarchical state machines with parallel regions.
//!
//! Strata executes UML-style statecharts: states nest, parallel states run
//! every child region at once, transitions carry guards and actions, and
//! events are processed with strict run-to-completion semantics on the
//! caller's thread.
//!
//! # Core Concepts
//!
//! - **Topology**: an immutable tree of named states declared through
//!   [`MachineBuilder`] and [`StateBuilder`], validated at build time
//! - **Configuration**: the set of active states, queryable with
//!   [`Machine::in_state`] and exportable as a [`ConfigurationSnapshot`]
//! - **Transitions**: event-triggered, optionally guarded and targeted;
//!   targetless transitions run their action without changing state
//! - **Run-to-completion**: events pushed from inside callbacks queue up
//!   and run after the current microstep finishes
//!
//! # Example
//!
//! ```rust
//! use strata::{Machine, StateBuilder, TransitionBuilder};
//!
//! let mut player = Machine::builder()
//!     .state(
//!         StateBuilder::new("stopped")
//!             .initial()
//!             .transition(TransitionBuilder::new().on("play").to("playing")),
//!     )
//!     .state(
//!         StateBuilder::new("playing")
//!             .transition(TransitionBuilder::new().on("stop").to("stopped"))
//!             .transition(TransitionBuilder::new().on("pause").to("paused")),
//!     )
//!     .state(
//!         StateBuilder::new("paused")
//!             .transition(TransitionBuilder::new().on("play").to("playing"))
//!             .transition(TransitionBuilder::new().on("stop").to("stopped")),
//!     )
//!     .build()
//!     .unwrap();
//!
//! player.enter();
//! assert!(player.in_state("stopped"));
//!
//! player.push_event("play");
//! player.push_event("pause");
//! assert!(player.in_state("paused"));
//!
//! player.leave();
//! assert!(!player.is_active());
//! ```

pub mod builder;
pub mod core;
mod machine;
mod trace;

// Re-export the working surface at the crate root.
pub use crate::builder::{BuildError, MachineBuilder, StateBuilder, TransitionBuilder};
pub use crate::core::{
    Action, ConfigurationSnapshot, Guard, IntoAction, IntoGuard, MachineArg, NoArg,
};
pub use crate::machine::Machine;
pub use crate::trace::{Trace, TraceRecord};
