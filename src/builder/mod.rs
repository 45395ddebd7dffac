//! Declarative construction of machine definitions.
//!
//! Declarations are collected through the fluent [`MachineBuilder`] (or the
//! [`state_machine!`](crate::state_machine) macro), partitioned by kind, and
//! compiled into an immutable [`MachineDef`](crate::core::MachineDef) shared
//! by every instance.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::DefineError;
pub use machine::{Decl, MachineBuilder};
