//! Machine instances and the transition dispatcher.
//!
//! This module is the imperative shell around the compiled core: a
//! [`Machine`] binds one host value to a shared definition, and
//! [`Machine::set`] drives the exit -> events -> enter -> commit protocol on
//! every managed-field write.
//!
//! Everything runs synchronously on the caller's thread; hooks execute
//! inline, and a hook that needs asynchronous work schedules it itself.

mod dispatch;
mod instance;

pub use dispatch::{HookKind, TransitionError};
pub use instance::Machine;
