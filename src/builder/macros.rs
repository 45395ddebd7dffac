//! Declarative machine definitions.
//!
//! The [`state_machine!`](crate::state_machine) macro is the declarative
//! front end for [`MachineBuilder`](crate::builder::MachineBuilder): it lays
//! out properties, states, and events for one host type and synthesizes one
//! `is_<state>()` predicate per declared state.

/// Declare a machine definition for a host type.
///
/// Generates a definition type with two associated functions:
///
/// - `definition()` — compiles the declaration once and returns the shared
///   `Arc<MachineDef<Host>>`
/// - `spawn(host)` — constructs a [`Machine`](crate::machine::Machine) bound
///   to a host value
///
/// plus a `<Name>Predicates` trait implemented for `Machine<Host>` with one
/// `is_<state>()` method per declared state.
///
/// Hooks given in the declaration are infallible; use the builder API
/// directly for fallible hooks.
///
/// # Example
///
/// ```rust
/// use statefield::state_machine;
///
/// #[derive(Default)]
/// struct Task {
///     notices: Vec<String>,
/// }
///
/// fn start_task(task: &mut Task, _prop: &str, from: &str, to: &str) {
///     task.notices.push(format!("start {from}->{to}"));
/// }
///
/// state_machine! {
///     pub TaskMachine for Task {
///         property state {
///             initial default;
///             state default;
///             state working;
///             state waiting;
///             event default => working;
///             event default => waiting, task = start_task;
///             event working => waiting;
///         }
///     }
/// }
///
/// let mut machine = TaskMachine::spawn(Task::default()).unwrap();
/// assert!(machine.is_default());
///
/// machine.set("state", "waiting").unwrap();
/// assert!(machine.is_waiting());
/// assert_eq!(machine.host().notices, ["start default->waiting"]);
/// ```
#[macro_export]
macro_rules! state_machine {
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident for $host:ty {
            $(
                property $prop:ident {
                    $(initial $initial:ident;)?
                    $(state $state:ident $(, on_enter = $enter:expr)? $(, on_exit = $exit:expr)? ;)*
                    $(event $from:ident => $to:ident $(, task = $task:expr)? ;)*
                }
            )+
        }
    ) => {
        $(#[$meta])*
        $vis struct $name;

        impl $name {
            /// Compile the declaration, once, and return the shared definition.
            pub fn definition() -> ::std::result::Result<
                ::std::sync::Arc<$crate::core::MachineDef<$host>>,
                $crate::builder::DefineError,
            > {
                static DEF: ::std::sync::OnceLock<
                    ::std::sync::Arc<$crate::core::MachineDef<$host>>,
                > = ::std::sync::OnceLock::new();
                if let Some(def) = DEF.get() {
                    return Ok(def.clone());
                }
                let builder = $crate::builder::MachineBuilder::<$host>::new()
                $(
                    .property(stringify!($prop))
                    $(.initial(stringify!($prop), stringify!($initial)))?
                    $(.state(stringify!($prop), {
                        let state = $crate::core::State::new(stringify!($state));
                        $(let state = state.on_enter($enter);)?
                        $(let state = state.on_exit($exit);)?
                        state
                    }))*
                    $(.event({
                        let event = $crate::core::Event::new(
                            stringify!($from),
                            stringify!($to),
                        );
                        $(let event = event.task($task);)?
                        event
                    }))*
                )+;
                let compiled = ::std::sync::Arc::new(builder.compile()?);
                Ok(DEF.get_or_init(move || compiled).clone())
            }

            /// Construct a machine instance bound to the given host.
            pub fn spawn(
                host: $host,
            ) -> ::std::result::Result<
                $crate::machine::Machine<$host>,
                $crate::builder::DefineError,
            > {
                $crate::machine::Machine::new(Self::definition()?, host)
            }
        }

        $crate::__private::paste! {
            /// Synthesized boolean predicates, one per declared state.
            $vis trait [<$name Predicates>] {
                $($(
                    #[doc = concat!(
                        "True iff the owning field currently holds `",
                        stringify!($state),
                        "`.",
                    )]
                    fn [<is_ $state>](&self) -> bool;
                )*)+
            }

            impl [<$name Predicates>] for $crate::machine::Machine<$host> {
                $($(
                    fn [<is_ $state>](&self) -> bool {
                        self.is(stringify!($state))
                    }
                )*)+
            }
        }
    };
}
