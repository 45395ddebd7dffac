//! Compiled machine definitions.

use super::property::StateProperty;
use std::collections::HashMap;
use std::fmt;

/// The full compiled set of states, events, and properties for a host type.
///
/// Built once when the declaration is compiled and shared read-only (behind
/// an `Arc`) across every machine instance produced from it. State names are
/// unique across the whole definition, so the global index can resolve any
/// state name to its owning property.
pub struct MachineDef<H> {
    properties: HashMap<String, StateProperty<H>>,
    owners: HashMap<String, String>,
}

impl<H> MachineDef<H> {
    pub(crate) fn new(
        properties: HashMap<String, StateProperty<H>>,
        owners: HashMap<String, String>,
    ) -> Self {
        Self { properties, owners }
    }

    /// Look up the compiled property for a managed field.
    pub fn property(&self, name: &str) -> Option<&StateProperty<H>> {
        self.properties.get(name)
    }

    /// All compiled properties, keyed by field name.
    pub fn properties(&self) -> &HashMap<String, StateProperty<H>> {
        &self.properties
    }

    /// The property name owning the given state, if the state is declared.
    pub fn owner_of(&self, state: &str) -> Option<&str> {
        self.owners.get(state).map(String::as_str)
    }

    /// Names of all declared states across all properties.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.owners.keys().map(String::as_str)
    }
}

impl<H> fmt::Debug for MachineDef<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut props: Vec<&str> = self.properties.keys().map(String::as_str).collect();
        props.sort_unstable();
        f.debug_struct("MachineDef")
            .field("properties", &props)
            .field("states", &self.owners.len())
            .finish()
    }
}
