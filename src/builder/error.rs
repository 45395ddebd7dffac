//! Definition errors for the declaration compiler.

use thiserror::Error;

/// Errors raised while compiling a declaration or constructing an instance
/// from a compiled definition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DefineError {
    #[error("no properties declared; a machine needs at least one managed field")]
    NoProperties,

    #[error("property '{property}' is declared more than once")]
    DuplicateProperty { property: String },

    #[error("state '{state}' is declared more than once")]
    DuplicateStateName { state: String },

    #[error("no property named '{property}' is declared")]
    UnknownProperty { property: String },

    #[error("no state named '{state}' is declared")]
    UnknownState { state: String },

    #[error("state '{state}' does not belong to property '{property}'")]
    StateNotInProperty { state: String, property: String },

    #[error("event '{from}' -> '{to}' spans properties '{from_property}' and '{to_property}'")]
    CrossPropertyEvent {
        from: String,
        to: String,
        from_property: String,
        to_property: String,
    },

    #[error("property '{property}' has no initial state. Call .initial(property, state)")]
    UnconfiguredProperty { property: String },
}
