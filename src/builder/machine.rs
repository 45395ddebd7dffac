//! Two-phase compiler for machine declarations.
//!
//! Declarations are collected as tagged variants through the fluent
//! [`MachineBuilder`] API, then `compile()` partitions them by kind and
//! produces an immutable [`MachineDef`].

use crate::builder::error::DefineError;
use crate::core::{Event, MachineDef, State, StateProperty};
use std::collections::HashMap;

/// One collected declaration, tagged by kind.
pub enum Decl<H> {
    /// A managed field.
    Property { name: String },
    /// The initial state for a property. The last declaration wins.
    Initial { property: String, state: String },
    /// A state registered against a property.
    State { property: String, state: State<H> },
    /// A transition rule; its owning property is the one owning `from`.
    Event { event: Event<H> },
}

/// Collects declarations and compiles them into a [`MachineDef`].
///
/// The host type parameter is part of the builder's type, so a declaration
/// without a host type cannot be written; everything else is validated by
/// `compile()`.
///
/// # Example
///
/// ```rust
/// use statefield::{Event, MachineBuilder, State};
///
/// struct Task;
///
/// let def = MachineBuilder::<Task>::new()
///     .property("state")
///     .initial("state", "default")
///     .state("state", State::new("default"))
///     .state("state", State::new("working"))
///     .event(Event::new("default", "working"))
///     .compile()
///     .unwrap();
///
/// assert_eq!(def.owner_of("working"), Some("state"));
/// ```
pub struct MachineBuilder<H> {
    decls: Vec<Decl<H>>,
}

impl<H> MachineBuilder<H> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self { decls: Vec::new() }
    }

    /// Append a raw declaration.
    pub fn decl(mut self, decl: Decl<H>) -> Self {
        self.decls.push(decl);
        self
    }

    /// Declare a managed field.
    pub fn property(self, name: impl Into<String>) -> Self {
        self.decl(Decl::Property { name: name.into() })
    }

    /// Declare the initial state for a property. May be repeated; the last
    /// declaration wins.
    pub fn initial(self, property: impl Into<String>, state: impl Into<String>) -> Self {
        self.decl(Decl::Initial {
            property: property.into(),
            state: state.into(),
        })
    }

    /// Register a state against a property.
    pub fn state(self, property: impl Into<String>, state: State<H>) -> Self {
        self.decl(Decl::State {
            property: property.into(),
            state,
        })
    }

    /// Register an event. Its owning property is resolved from `from` at
    /// compile time.
    pub fn event(self, event: Event<H>) -> Self {
        self.decl(Decl::Event { event })
    }

    /// Partition the collected declarations and produce an immutable
    /// definition.
    ///
    /// Declaration order between kinds does not matter: an initial state may
    /// be declared before the state it names. Event order is preserved,
    /// because matching events fire in declaration order.
    pub fn compile(self) -> Result<MachineDef<H>, DefineError> {
        let mut property_decls: Vec<String> = Vec::new();
        let mut initial_decls: Vec<(String, String)> = Vec::new();
        let mut state_decls: Vec<(String, State<H>)> = Vec::new();
        let mut event_decls: Vec<Event<H>> = Vec::new();

        for decl in self.decls {
            match decl {
                Decl::Property { name } => property_decls.push(name),
                Decl::Initial { property, state } => initial_decls.push((property, state)),
                Decl::State { property, state } => state_decls.push((property, state)),
                Decl::Event { event } => event_decls.push(event),
            }
        }

        let mut properties: HashMap<String, StateProperty<H>> = HashMap::new();
        for name in property_decls {
            if properties.contains_key(&name) {
                return Err(DefineError::DuplicateProperty { property: name });
            }
            properties.insert(name.clone(), StateProperty::new(name));
        }
        if properties.is_empty() {
            return Err(DefineError::NoProperties);
        }

        // State names are unique across the whole definition so that the
        // synthesized predicates are unambiguous.
        let mut owners: HashMap<String, String> = HashMap::new();
        for (property, state) in state_decls {
            let owner = properties
                .get_mut(&property)
                .ok_or_else(|| DefineError::UnknownProperty {
                    property: property.clone(),
                })?;
            let name = state.name().to_string();
            if owners.contains_key(&name) {
                return Err(DefineError::DuplicateStateName { state: name });
            }
            owner.register_state(state);
            owners.insert(name, property);
        }

        for (property, state) in initial_decls {
            if !properties.contains_key(&property) {
                return Err(DefineError::UnknownProperty { property });
            }
            match owners.get(&state) {
                None => return Err(DefineError::UnknownState { state }),
                Some(owner) if *owner != property => {
                    return Err(DefineError::StateNotInProperty { state, property });
                }
                Some(_) => {}
            }
            if let Some(prop) = properties.get_mut(&property) {
                prop.set_initial(state);
            }
        }

        for event in event_decls {
            let from_property =
                owners
                    .get(event.from())
                    .ok_or_else(|| DefineError::UnknownState {
                        state: event.from().to_string(),
                    })?;
            let to_property = owners
                .get(event.to())
                .ok_or_else(|| DefineError::UnknownState {
                    state: event.to().to_string(),
                })?;
            if from_property != to_property {
                return Err(DefineError::CrossPropertyEvent {
                    from: event.from().to_string(),
                    to: event.to().to_string(),
                    from_property: from_property.clone(),
                    to_property: to_property.clone(),
                });
            }
            if let Some(prop) = properties.get_mut(from_property) {
                prop.register_event(event);
            }
        }

        Ok(MachineDef::new(properties, owners))
    }
}

impl<H> Default for MachineBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}
