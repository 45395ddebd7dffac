//! Machine instances binding a compiled definition to a host value.

use crate::builder::DefineError;
use crate::core::{MachineDef, TransitionLog};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A host value bound to a compiled machine definition.
///
/// The definition is shared template data; the instance carries its own
/// small `property -> current value` map, so any number of instances can be
/// built from one definition without interfering with each other.
///
/// Managed values are mutated only through [`Machine::set`], which runs the
/// exit -> events -> enter -> commit protocol. Unmanaged data stays as plain
/// fields on the host and is accessed directly through [`Machine::host`] /
/// [`Machine::host_mut`].
pub struct Machine<H> {
    def: Arc<MachineDef<H>>,
    host: H,
    values: HashMap<String, String>,
    log: TransitionLog,
}

impl<H> Machine<H> {
    /// Bind a definition to a host value.
    ///
    /// Every property is initialized to its declared initial state; no hooks
    /// run, since there is no prior state to exit from. Fails with
    /// [`DefineError::UnconfiguredProperty`] if any property lacks an
    /// initial state.
    pub fn new(def: Arc<MachineDef<H>>, host: H) -> Result<Self, DefineError> {
        let mut values = HashMap::new();
        for (name, property) in def.properties() {
            let initial =
                property
                    .initial()
                    .ok_or_else(|| DefineError::UnconfiguredProperty {
                        property: name.clone(),
                    })?;
            values.insert(name.clone(), initial.to_string());
        }
        Ok(Self {
            def,
            host,
            values,
            log: TransitionLog::new(),
        })
    }

    /// Current value of a managed field, `None` if the field is not managed.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.values.get(property).map(String::as_str)
    }

    /// Whether the field owning `state` currently holds it.
    ///
    /// Never fails: unknown state names are simply not held. Reads observe
    /// only committed values, so a failed transition is invisible here.
    pub fn is(&self, state: &str) -> bool {
        match self.def.owner_of(state) {
            Some(owner) => self.get(owner) == Some(state),
            None => false,
        }
    }

    /// The shared definition this instance was built from.
    pub fn definition(&self) -> &Arc<MachineDef<H>> {
        &self.def
    }

    /// Committed transitions of this instance, in order.
    pub fn log(&self) -> &TransitionLog {
        &self.log
    }

    /// Borrow the host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Borrow the host mutably. Managed values live on the machine, not the
    /// host, so this cannot bypass the transition protocol.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consume the machine and return the host.
    pub fn into_host(self) -> H {
        self.host
    }

    pub(crate) fn parts(
        &mut self,
    ) -> (
        &Arc<MachineDef<H>>,
        &mut H,
        &mut HashMap<String, String>,
        &mut TransitionLog,
    ) {
        (&self.def, &mut self.host, &mut self.values, &mut self.log)
    }
}

impl<H: fmt::Debug> fmt::Debug for Machine<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("host", &self.host)
            .field("values", &self.values)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MachineBuilder;
    use crate::core::State;

    #[derive(Debug, Default, PartialEq)]
    struct Host {
        name: &'static str,
    }

    fn definition() -> Arc<MachineDef<Host>> {
        Arc::new(
            MachineBuilder::new()
                .property("state")
                .initial("state", "default")
                .state("state", State::new("default"))
                .state("state", State::new("working"))
                .compile()
                .unwrap(),
        )
    }

    #[test]
    fn construction_sets_initial_values() {
        let machine = Machine::new(definition(), Host::default()).unwrap();

        assert_eq!(machine.get("state"), Some("default"));
        assert!(machine.is("default"));
        assert!(!machine.is("working"));
    }

    #[test]
    fn construction_fails_without_initial_state() {
        let def = Arc::new(
            MachineBuilder::<Host>::new()
                .property("state")
                .state("state", State::new("default"))
                .compile()
                .unwrap(),
        );

        let err = Machine::new(def, Host::default()).unwrap_err();
        assert_eq!(
            err,
            DefineError::UnconfiguredProperty {
                property: "state".to_string()
            }
        );
    }

    #[test]
    fn instances_do_not_share_values() {
        let def = definition();
        let mut first = Machine::new(def.clone(), Host { name: "a" }).unwrap();
        let second = Machine::new(def, Host { name: "b" }).unwrap();

        first.set("state", "working").unwrap();

        assert_eq!(first.get("state"), Some("working"));
        assert_eq!(second.get("state"), Some("default"));
    }

    #[test]
    fn unknown_names_answer_without_failing() {
        let machine = Machine::new(definition(), Host::default()).unwrap();

        assert_eq!(machine.get("other"), None);
        assert!(!machine.is("nonsense"));
    }

    #[test]
    fn host_accessors_reach_plain_members() {
        let mut machine = Machine::new(definition(), Host { name: "andy" }).unwrap();

        assert_eq!(machine.host().name, "andy");
        machine.host_mut().name = "beth";
        assert_eq!(machine.into_host(), Host { name: "beth" });
    }

    #[test]
    fn construction_records_no_transitions() {
        let machine = Machine::new(definition(), Host::default()).unwrap();
        assert!(machine.log().records().is_empty());
    }
}
