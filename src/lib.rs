//! Statefield: a declarative state machine engine for host-struct fields.
//!
//! A host type acquires one or more named fields whose values are restricted
//! to a declared set of symbolic states, with optional hooks fired on
//! entering or leaving a state and on specific transitions. The declaration
//! is compiled once into an immutable definition; instances bind that
//! definition to a host value and drive every managed-field write through
//! the exit -> events -> enter -> commit protocol.
//!
//! # Core Concepts
//!
//! - **State**: a named, legal value for a managed field, with optional
//!   enter/exit hooks
//! - **Event**: a declared `(from, to)` transition rule with an optional
//!   side-effect task; every matching event fires, in declaration order
//! - **MachineDef**: the compiled, shared definition; **Machine**: one host
//!   bound to it, carrying its own current values
//!
//! # Example
//!
//! ```rust
//! use statefield::{Event, Machine, MachineBuilder, State};
//! use std::sync::Arc;
//!
//! struct Task {
//!     notices: Vec<String>,
//! }
//!
//! let def = MachineBuilder::<Task>::new()
//!     .property("state")
//!     .initial("state", "default")
//!     .state("state", State::new("default"))
//!     .state("state", State::new("working"))
//!     .state("state", State::new("waiting"))
//!     .event(Event::new("default", "working"))
//!     .event(Event::new("working", "waiting").task(|t: &mut Task, _p, from, to| {
//!         t.notices.push(format!("{from} -> {to}"));
//!     }))
//!     .compile()?;
//!
//! let mut machine = Machine::new(Arc::new(def), Task { notices: Vec::new() })?;
//! assert!(machine.is("default"));
//!
//! machine.set("state", "working")?;
//! machine.set("state", "waiting")?;
//!
//! assert!(machine.is("waiting"));
//! assert_eq!(machine.host().notices, ["working -> waiting"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The [`state_machine!`] macro provides the same construction declaratively
//! and synthesizes one `is_<state>()` predicate per declared state.

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::{DefineError, MachineBuilder};
pub use core::{Event, Hook, HookError, MachineDef, State, StateProperty, TransitionLog, TransitionRecord};
pub use machine::{HookKind, Machine, TransitionError};

// Support for macro-generated code; not a public API.
#[doc(hidden)]
pub mod __private {
    pub use paste::paste;
}
