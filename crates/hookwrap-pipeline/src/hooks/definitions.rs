//! Hook definitions: phases, failure sites and the hook capability set.

use std::future::Future;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};

use super::context::{EntryContext, ExitContext, FailureContext, HookContext};
use crate::error::InvalidHookShape;

/// Bound shared by argument, output and error types flowing through a pipeline.
///
/// Hooks receive cloned snapshots of the execution record and may run on any
/// task, hence `Clone + Send + Sync + 'static`.
pub trait Payload: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Payload for T {}

/// The three phases a hook can participate in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Before the core function runs. Walked in reverse registration order.
    Entry,
    /// After the core function succeeds. Walked in unwind order.
    Exit,
    /// After any entry, core or exit failure. Walked in unwind order.
    Failure,
}

impl Phase {
    /// Returns the string name of this phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Exit => "exit",
            Self::Failure => "failure",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the failure currently under recovery was raised.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "site")]
pub enum FailureSite {
    /// An entry handler raised.
    Entry {
        /// Name of the raising hook.
        hook: String,
    },
    /// The core function raised.
    Core,
    /// An exit handler raised.
    Exit {
        /// Name of the raising hook.
        hook: String,
    },
}

impl std::fmt::Display for FailureSite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entry { hook } => write!(f, "entry:{hook}"),
            Self::Core => f.write_str("core"),
            Self::Exit { hook } => write!(f, "exit:{hook}"),
        }
    }
}

/// Boxed future returned by every phase handler.
pub type HookFuture<T, E> = BoxFuture<'static, Result<T, E>>;

/// A type-erased phase handler resolving to `T`.
pub type HookFn<I, O, E, T> = Arc<dyn Fn(HookContext<I, O, E, T>) -> HookFuture<T, E> + Send + Sync>;

/// Entry handler: `Some(args)` replaces the input, `None` leaves it alone.
pub type EntryFn<I, O, E> = HookFn<I, O, E, Option<Vec<I>>>;

/// Exit handler: `Some(output)` replaces the output.
pub type ExitFn<I, O, E> = HookFn<I, O, E, Option<O>>;

/// Failure handler: `Some(error)` replaces the error under recovery.
pub type FailureFn<I, O, E> = HookFn<I, O, E, Option<E>>;

/// A named capability set of up to three phase handlers.
///
/// A hook must define at least one handler; this is checked once when the
/// hook is registered.
pub struct Hook<I, O, E> {
    name: String,
    on_entry: Option<EntryFn<I, O, E>>,
    on_exit: Option<ExitFn<I, O, E>>,
    on_failure: Option<FailureFn<I, O, E>>,
}

impl<I: Payload, O: Payload, E: Payload> Hook<I, O, E> {
    /// Creates a hook with no handlers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            on_entry: None,
            on_exit: None,
            on_failure: None,
        }
    }

    /// Sets the entry handler.
    pub fn on_entry<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(EntryContext<I, O, E>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<Vec<I>>, E>> + Send + 'static,
    {
        self.on_entry = Some(erase(f));
        self
    }

    /// Sets the exit handler.
    pub fn on_exit<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(ExitContext<I, O, E>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<O>, E>> + Send + 'static,
    {
        self.on_exit = Some(erase(f));
        self
    }

    /// Sets the failure handler.
    pub fn on_failure<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(FailureContext<I, O, E>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<E>, E>> + Send + 'static,
    {
        self.on_failure = Some(erase(f));
        self
    }
}

impl<I, O, E> Hook<I, O, E> {
    /// Returns the hook name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the hook has a handler for `phase`.
    pub fn handles(&self, phase: Phase) -> bool {
        match phase {
            Phase::Entry => self.on_entry.is_some(),
            Phase::Exit => self.on_exit.is_some(),
            Phase::Failure => self.on_failure.is_some(),
        }
    }

    /// Returns the phases this hook participates in.
    pub fn phases(&self) -> Vec<Phase> {
        [Phase::Entry, Phase::Exit, Phase::Failure]
            .into_iter()
            .filter(|phase| self.handles(*phase))
            .collect()
    }

    pub(crate) fn entry_handler(&self) -> Option<&EntryFn<I, O, E>> {
        self.on_entry.as_ref()
    }

    pub(crate) fn exit_handler(&self) -> Option<&ExitFn<I, O, E>> {
        self.on_exit.as_ref()
    }

    pub(crate) fn failure_handler(&self) -> Option<&FailureFn<I, O, E>> {
        self.on_failure.as_ref()
    }

    /// Checks the shape rules enforced at registration.
    pub(crate) fn validate(&self) -> Result<(), InvalidHookShape> {
        if self.name.trim().is_empty() {
            return Err(InvalidHookShape::new(
                self.name.clone(),
                "hook name must not be empty",
            ));
        }
        if self.on_entry.is_none() && self.on_exit.is_none() && self.on_failure.is_none() {
            return Err(InvalidHookShape::new(
                self.name.clone(),
                "hook must have an entry, exit or failure handler",
            ));
        }
        Ok(())
    }
}

impl<I, O, E> std::fmt::Debug for Hook<I, O, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hook")
            .field("name", &self.name)
            .field("on_entry", &self.on_entry.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .field("on_failure", &self.on_failure.is_some())
            .finish()
    }
}

fn erase<I, O, E, T, F, Fut>(f: F) -> HookFn<I, O, E, T>
where
    I: 'static,
    O: 'static,
    E: 'static,
    T: 'static,
    F: Fn(HookContext<I, O, E, T>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    Arc::new(move |ctx: HookContext<I, O, E, T>| f(ctx).boxed())
}

/// Adapts a synchronous handler into one accepted by [`Hook::on_entry`] and friends.
///
/// The handler's return value settles the hook immediately.
pub fn sync<C, T, E, F>(f: F) -> impl Fn(C) -> future::Ready<Result<T, E>> + Send + Sync + 'static
where
    C: 'static,
    T: 'static,
    E: 'static,
    F: Fn(C) -> Result<T, E> + Send + Sync + 'static,
{
    move |ctx| future::ready(f(ctx))
}
