//! Core state machine types.
//!
//! This module contains the compiled data model:
//! - `State`: a named field value with optional enter/exit hooks
//! - `Event`: a declared `(from, to)` transition rule with an optional task
//! - `StateProperty`: the per-field registry of states and events
//! - `MachineDef`: the full compiled definition for a host type
//! - `TransitionLog`: immutable history of committed transitions
//!
//! Everything here is immutable template data after compilation; per-instance
//! mutable state lives in [`crate::machine`].

mod def;
mod event;
mod history;
mod property;
mod state;

pub use def::MachineDef;
pub use event::Event;
pub use history::{TransitionLog, TransitionRecord};
pub use property::StateProperty;
pub use state::{Hook, HookError, State};
