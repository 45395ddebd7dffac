//! Compiled per-field state registries.

use super::event::Event;
use super::state::State;
use std::collections::HashMap;
use std::fmt;

/// The compiled registry of states, events, and initial state for one
/// managed field.
///
/// A `StateProperty` is pure template data shared read-only across every
/// instance built from one definition. The current value of the field lives
/// in the machine instance, never here, so one compiled property can back
/// any number of hosts.
pub struct StateProperty<H> {
    name: String,
    states: HashMap<String, State<H>>,
    events: Vec<Event<H>>,
    initial: Option<String>,
}

impl<H> StateProperty<H> {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: HashMap::new(),
            events: Vec::new(),
            initial: None,
        }
    }

    /// The managed field name this property governs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a declared state by name.
    pub fn state(&self, name: &str) -> Option<&State<H>> {
        self.states.get(name)
    }

    /// Names of all declared states, in no particular order.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    /// Declared events, in declaration order.
    pub fn events(&self) -> &[Event<H>] {
        &self.events
    }

    /// Events declared for the given `(from, to)` pair, in declaration order.
    pub fn events_matching<'a>(
        &'a self,
        from: &'a str,
        to: &'a str,
    ) -> impl Iterator<Item = &'a Event<H>> {
        self.events.iter().filter(move |e| e.matches(from, to))
    }

    /// The initial state name, if one was declared.
    pub fn initial(&self) -> Option<&str> {
        self.initial.as_deref()
    }

    pub(crate) fn register_state(&mut self, state: State<H>) {
        self.states.insert(state.name().to_string(), state);
    }

    pub(crate) fn register_event(&mut self, event: Event<H>) {
        self.events.push(event);
    }

    pub(crate) fn set_initial(&mut self, state: impl Into<String>) {
        self.initial = Some(state.into());
    }
}

impl<H> fmt::Debug for StateProperty<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.state_names().collect();
        names.sort_unstable();
        f.debug_struct("StateProperty")
            .field("name", &self.name)
            .field("states", &names)
            .field("events", &self.events.len())
            .field("initial", &self.initial)
            .finish()
    }
}
