//! The transition dispatcher.
//!
//! [`Machine::set`] is the single mutation path for managed fields. It runs
//! the protocol in a fixed order: resolve old state, run its exit hook, fire
//! every matching event task in declaration order, run the new state's enter
//! hook, then commit. The commit is last, so any hook failure leaves the
//! stored value untouched.

use crate::core::{HookError, TransitionRecord};
use crate::machine::instance::Machine;
use std::fmt;
use thiserror::Error;

/// Which hook failed during a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    Exit,
    Task,
    Enter,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exit => f.write_str("exit"),
            Self::Task => f.write_str("task"),
            Self::Enter => f.write_str("enter"),
        }
    }
}

/// Errors raised while applying a transition.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("'{field}' is not a managed property")]
    UnknownProperty { field: String },

    #[error("no state named '{state}' is declared for property '{property}'")]
    NoSuchState { property: String, state: String },

    /// The stored value was never registered as a state. This signals prior
    /// corruption of the instance, not a normal runtime condition.
    #[error("property '{property}' holds '{value}', which is not a registered state")]
    UnconfiguredState { property: String, value: String },

    #[error("{kind} hook failed on '{property}' ({from} -> {to})")]
    Hook {
        kind: HookKind,
        property: String,
        from: String,
        to: String,
        #[source]
        source: HookError,
    },
}

impl<H> Machine<H> {
    /// Transition a managed field to `value`.
    ///
    /// Protocol order: old state's exit hook, every event task declared for
    /// the `(old, new)` pair in declaration order, new state's enter hook,
    /// commit. A transition with no matching event is legal; a transition to
    /// the current value re-runs the full protocol.
    ///
    /// On any error the stored value is unchanged and nothing is logged.
    pub fn set(&mut self, field: &str, value: &str) -> Result<(), TransitionError> {
        let (def, host, values, log) = self.parts();

        let property = def
            .property(field)
            .ok_or_else(|| TransitionError::UnknownProperty {
                field: field.to_string(),
            })?;
        let new_state = property
            .state(value)
            .ok_or_else(|| TransitionError::NoSuchState {
                property: field.to_string(),
                state: value.to_string(),
            })?;

        let old = values.get(field).cloned().unwrap_or_default();
        let old_state =
            property
                .state(&old)
                .ok_or_else(|| TransitionError::UnconfiguredState {
                    property: field.to_string(),
                    value: old.clone(),
                })?;

        let hook_failed = |kind: HookKind, source: HookError| TransitionError::Hook {
            kind,
            property: field.to_string(),
            from: old.clone(),
            to: value.to_string(),
            source,
        };

        old_state
            .exit(host, field, &old, value)
            .map_err(|e| hook_failed(HookKind::Exit, e))?;
        for event in property.events_matching(&old, value) {
            event
                .fire(host, field, &old, value)
                .map_err(|e| hook_failed(HookKind::Task, e))?;
        }
        new_state
            .enter(host, field, &old, value)
            .map_err(|e| hook_failed(HookKind::Enter, e))?;

        values.insert(field.to_string(), value.to_string());
        *log = log.record(TransitionRecord::now(field, old, value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::MachineBuilder;
    use crate::core::{Event, MachineDef, State};
    use std::sync::Arc;

    #[derive(Default)]
    struct Worker {
        trace: Vec<String>,
    }

    fn note(tag: &'static str) -> impl Fn(&mut Worker, &str, &str, &str) {
        move |worker, prop, from, to| worker.trace.push(format!("{tag} {prop} {from} {to}"))
    }

    fn definition() -> Arc<MachineDef<Worker>> {
        Arc::new(
            MachineBuilder::new()
                .property("state")
                .initial("state", "default")
                .state("state", State::new("default").on_exit(note("exit-default")))
                .state(
                    "state",
                    State::new("working")
                        .on_enter(note("enter-working"))
                        .on_exit(note("exit-working")),
                )
                .state("state", State::new("waiting").on_enter(note("enter-waiting")))
                .event(Event::new("default", "working"))
                .event(Event::new("default", "waiting").task(note("start")))
                .event(Event::new("working", "waiting").task(note("finish")))
                .compile()
                .unwrap(),
        )
    }

    #[test]
    fn protocol_runs_exit_then_tasks_then_enter() {
        let mut machine = Machine::new(definition(), Worker::default()).unwrap();

        machine.set("state", "waiting").unwrap();

        assert_eq!(
            machine.host().trace,
            [
                "exit-default state default waiting",
                "start state default waiting",
                "enter-waiting state default waiting",
            ]
        );
        assert_eq!(machine.get("state"), Some("waiting"));
    }

    #[test]
    fn transition_without_matching_event_is_legal() {
        let mut machine = Machine::new(definition(), Worker::default()).unwrap();
        machine.set("state", "waiting").unwrap();
        machine.host_mut().trace.clear();

        // No event waiting -> working is declared.
        machine.set("state", "working").unwrap();

        assert_eq!(machine.host().trace, ["enter-working state waiting working"]);
        assert_eq!(machine.get("state"), Some("working"));
    }

    #[test]
    fn matching_event_fires_between_exit_and_enter() {
        let mut machine = Machine::new(definition(), Worker::default()).unwrap();
        machine.set("state", "working").unwrap();
        machine.host_mut().trace.clear();

        machine.set("state", "waiting").unwrap();

        assert_eq!(
            machine.host().trace,
            [
                "exit-working state working waiting",
                "finish state working waiting",
                "enter-waiting state working waiting",
            ]
        );
    }

    #[test]
    fn duplicate_events_all_fire_in_declaration_order() {
        let def = Arc::new(
            MachineBuilder::new()
                .property("state")
                .initial("state", "a")
                .state("state", State::new("a"))
                .state("state", State::new("b"))
                .event(Event::new("a", "b").task(note("first")))
                .event(Event::new("a", "b").task(note("second")))
                .compile()
                .unwrap(),
        );
        let mut machine = Machine::new(def, Worker::default()).unwrap();

        machine.set("state", "b").unwrap();

        assert_eq!(machine.host().trace, ["first state a b", "second state a b"]);
    }

    #[test]
    fn self_transition_runs_the_full_protocol() {
        let def = Arc::new(
            MachineBuilder::new()
                .property("state")
                .initial("state", "working")
                .state(
                    "state",
                    State::new("working")
                        .on_enter(note("enter"))
                        .on_exit(note("exit")),
                )
                .event(Event::new("working", "working").task(note("again")))
                .compile()
                .unwrap(),
        );
        let mut machine = Machine::new(def, Worker::default()).unwrap();

        machine.set("state", "working").unwrap();

        assert_eq!(
            machine.host().trace,
            [
                "exit state working working",
                "again state working working",
                "enter state working working",
            ]
        );
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut machine = Machine::new(definition(), Worker::default()).unwrap();

        let err = machine.set("mode", "working").unwrap_err();

        assert!(matches!(err, TransitionError::UnknownProperty { .. }));
        assert!(machine.host().trace.is_empty());
    }

    #[test]
    fn no_such_state_leaves_everything_unchanged() {
        let mut machine = Machine::new(definition(), Worker::default()).unwrap();

        let err = machine.set("state", "sleeping").unwrap_err();

        assert!(matches!(err, TransitionError::NoSuchState { .. }));
        assert_eq!(machine.get("state"), Some("default"));
        assert!(machine.is("default"));
        assert!(machine.host().trace.is_empty());
        assert!(machine.log().records().is_empty());
    }

    #[test]
    fn failing_exit_hook_aborts_before_tasks() {
        let def = Arc::new(
            MachineBuilder::new()
                .property("state")
                .initial("state", "a")
                .state(
                    "state",
                    State::new("a").try_on_exit(|_: &mut Worker, _, _, _| Err("locked".into())),
                )
                .state("state", State::new("b"))
                .event(Event::new("a", "b").task(note("task")))
                .compile()
                .unwrap(),
        );
        let mut machine = Machine::new(def, Worker::default()).unwrap();

        let err = machine.set("state", "b").unwrap_err();

        match &err {
            TransitionError::Hook { kind, from, to, .. } => {
                assert_eq!(*kind, HookKind::Exit);
                assert_eq!(from, "a");
                assert_eq!(to, "b");
            }
            other => panic!("expected hook error, got {other:?}"),
        }
        assert_eq!(err.to_string(), "exit hook failed on 'state' (a -> b)");
        assert_eq!(machine.get("state"), Some("a"));
        assert!(machine.host().trace.is_empty());
    }

    #[test]
    fn failing_enter_hook_leaves_value_uncommitted() {
        let def = Arc::new(
            MachineBuilder::new()
                .property("state")
                .initial("state", "a")
                .state("state", State::new("a").on_exit(note("exit")))
                .state(
                    "state",
                    State::new("b").try_on_enter(|_: &mut Worker, _, _, _| Err("full".into())),
                )
                .compile()
                .unwrap(),
        );
        let mut machine = Machine::new(def, Worker::default()).unwrap();

        let err = machine.set("state", "b").unwrap_err();

        assert!(matches!(
            err,
            TransitionError::Hook {
                kind: HookKind::Enter,
                ..
            }
        ));
        // The exit hook already ran, but the value never moved.
        assert_eq!(machine.host().trace, ["exit state a b"]);
        assert_eq!(machine.get("state"), Some("a"));
        assert!(machine.is("a"));
        assert!(machine.log().records().is_empty());
    }

    #[test]
    fn hook_error_source_is_preserved() {
        let def = Arc::new(
            MachineBuilder::new()
                .property("state")
                .initial("state", "a")
                .state("state", State::new("a"))
                .state("state", State::new("b"))
                .event(Event::new("a", "b").try_task(|_: &mut Worker, _, _, _| {
                    Err("downstream unavailable".into())
                }))
                .compile()
                .unwrap(),
        );
        let mut machine = Machine::new(def, Worker::default()).unwrap();

        let err = machine.set("state", "b").unwrap_err();

        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("downstream unavailable"));
    }

    #[test]
    fn committed_transitions_are_logged() {
        let mut machine = Machine::new(definition(), Worker::default()).unwrap();

        machine.set("state", "working").unwrap();
        machine.set("state", "waiting").unwrap();

        assert_eq!(machine.log().path("state"), ["default", "working", "waiting"]);
    }
}
