//! Transition rules between two states of the same property.

use super::state::{Hook, HookError};
use std::fmt;
use std::sync::Arc;

/// A declared `(from, to)` transition rule with an optional side-effect task.
///
/// Events are observability hooks layered on top of the state graph, not
/// access-control gates: a transition with no matching event is still legal.
/// Every event whose pair matches a live transition fires, in declaration
/// order.
///
/// # Example
///
/// ```rust
/// use statefield::Event;
///
/// struct Worker {
///     started: u32,
/// }
///
/// let started = Event::new("default", "working").task(|w: &mut Worker, _p, _from, _to| {
///     w.started += 1;
/// });
///
/// assert!(started.matches("default", "working"));
/// assert!(!started.matches("working", "default"));
/// ```
pub struct Event<H> {
    from: String,
    to: String,
    task: Option<Hook<H>>,
}

impl<H> Event<H> {
    /// Declare a transition rule between two state names.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            task: None,
        }
    }

    /// Attach an infallible task, run whenever this event's pair matches a
    /// live transition.
    pub fn task<F>(mut self, task: F) -> Self
    where
        F: Fn(&mut H, &str, &str, &str) + Send + Sync + 'static,
    {
        self.task = Some(Arc::new(move |host, prop, from, to| {
            task(host, prop, from, to);
            Ok(())
        }));
        self
    }

    /// Attach a task that may fail. A failing task aborts the transition
    /// before the enter hook and the commit.
    pub fn try_task<F>(mut self, task: F) -> Self
    where
        F: Fn(&mut H, &str, &str, &str) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.task = Some(Arc::new(task));
        self
    }

    /// Source state name.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Target state name.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Whether this event is declared for the given `(from, to)` pair.
    pub fn matches(&self, from: &str, to: &str) -> bool {
        self.from == from && self.to == to
    }

    pub(crate) fn fire(
        &self,
        host: &mut H,
        property: &str,
        from: &str,
        to: &str,
    ) -> Result<(), HookError> {
        match &self.task {
            Some(task) => task(host, property, from, to),
            None => Ok(()),
        }
    }
}

impl<H> Clone for Event<H> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            task: self.task.clone(),
        }
    }
}

impl<H> fmt::Debug for Event<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("task", &self.task.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        calls: Vec<String>,
    }

    #[test]
    fn matches_requires_exact_pair() {
        let event: Event<Probe> = Event::new("default", "working");

        assert!(event.matches("default", "working"));
        assert!(!event.matches("working", "default"));
        assert!(!event.matches("default", "waiting"));
    }

    #[test]
    fn fire_without_task_is_a_no_op() {
        let event: Event<Probe> = Event::new("a", "b");
        let mut probe = Probe::default();

        event.fire(&mut probe, "state", "a", "b").unwrap();

        assert!(probe.calls.is_empty());
    }

    #[test]
    fn task_receives_transition_arguments() {
        let event = Event::new("working", "waiting").task(|p: &mut Probe, prop, from, to| {
            p.calls.push(format!("task {prop} {from} {to}"));
        });
        let mut probe = Probe::default();

        event.fire(&mut probe, "state", "working", "waiting").unwrap();

        assert_eq!(probe.calls, ["task state working waiting"]);
    }

    #[test]
    fn fallible_task_error_surfaces() {
        let event: Event<Probe> =
            Event::new("a", "b").try_task(|_, _, _, _| Err("task failed".into()));
        let mut probe = Probe::default();

        let err = event.fire(&mut probe, "state", "a", "b").unwrap_err();
        assert_eq!(err.to_string(), "task failed");
    }

    #[test]
    fn self_transition_pair_is_expressible() {
        let event: Event<Probe> = Event::new("working", "working");
        assert!(event.matches("working", "working"));
    }
}
