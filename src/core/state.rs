//! States for managed fields.
//!
//! A `State` is a symbolic value a managed field may hold, carrying optional
//! enter/exit hooks. States are built at declaration time and are immutable
//! once a definition has been compiled.

use std::fmt;
use std::sync::Arc;

/// Error type user hooks may fail with.
///
/// Hooks are trusted user code; the dispatcher never swallows their errors,
/// it wraps them as the `source` of a transition error and aborts before
/// committing the new value.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Side-effect hook invoked during a transition.
///
/// Arguments are `(host, property_name, from_value, to_value)`.
pub type Hook<H> =
    Arc<dyn Fn(&mut H, &str, &str, &str) -> Result<(), HookError> + Send + Sync>;

/// A named, legal value for a managed field, with optional entry/exit
/// side effects.
///
/// # Example
///
/// ```rust
/// use statefield::State;
///
/// struct Door {
///     creaks: u32,
/// }
///
/// let open = State::new("open").on_enter(|door: &mut Door, _prop, _from, _to| {
///     door.creaks += 1;
/// });
///
/// assert_eq!(open.name(), "open");
/// ```
pub struct State<H> {
    name: String,
    on_enter: Option<Hook<H>>,
    on_exit: Option<Hook<H>>,
}

impl<H> State<H> {
    /// Create a state with the given name and no hooks.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            on_enter: None,
            on_exit: None,
        }
    }

    /// Attach an infallible enter hook.
    ///
    /// The hook runs when a transition targets this state, after the old
    /// state's exit hook and any matching event tasks, before the commit.
    pub fn on_enter<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut H, &str, &str, &str) + Send + Sync + 'static,
    {
        self.on_enter = Some(Arc::new(move |host, prop, from, to| {
            hook(host, prop, from, to);
            Ok(())
        }));
        self
    }

    /// Attach an enter hook that may fail.
    ///
    /// A failing enter hook aborts the transition; the stored value keeps
    /// the pre-transition state.
    pub fn try_on_enter<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut H, &str, &str, &str) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.on_enter = Some(Arc::new(hook));
        self
    }

    /// Attach an infallible exit hook.
    ///
    /// The hook runs first in the transition protocol, when a transition
    /// leaves this state.
    pub fn on_exit<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut H, &str, &str, &str) + Send + Sync + 'static,
    {
        self.on_exit = Some(Arc::new(move |host, prop, from, to| {
            hook(host, prop, from, to);
            Ok(())
        }));
        self
    }

    /// Attach an exit hook that may fail.
    pub fn try_on_exit<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut H, &str, &str, &str) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.on_exit = Some(Arc::new(hook));
        self
    }

    /// The state's declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn enter(
        &self,
        host: &mut H,
        property: &str,
        prev: &str,
        next: &str,
    ) -> Result<(), HookError> {
        match &self.on_enter {
            Some(hook) => hook(host, property, prev, next),
            None => Ok(()),
        }
    }

    pub(crate) fn exit(
        &self,
        host: &mut H,
        property: &str,
        current: &str,
        next: &str,
    ) -> Result<(), HookError> {
        match &self.on_exit {
            Some(hook) => hook(host, property, current, next),
            None => Ok(()),
        }
    }
}

impl<H> Clone for State<H> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            on_enter: self.on_enter.clone(),
            on_exit: self.on_exit.clone(),
        }
    }
}

impl<H> fmt::Debug for State<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("on_enter", &self.on_enter.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .finish()
    }
}
