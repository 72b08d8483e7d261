//! Pipeline handle: a core function plus its registered hooks.

use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tracing::Instrument;

use crate::engine::outcome::Outcome;
use crate::engine::runner;
use crate::error::{InvalidHookShape, UnrecoveredFailure};
use crate::hooks::context::{EntryContext, ExitContext, FailureContext};
use crate::hooks::definitions::{Hook, Payload, Phase};
use crate::hooks::registry::HookRegistry;
use crate::traits::{Interceptor, InterceptorAdapter};

/// Type-erased core function: receives the final input as positional arguments.
pub type CoreFn<I, O, E> = Arc<dyn Fn(Vec<I>) -> BoxFuture<'static, Result<O, E>> + Send + Sync>;

/// Wraps `core` in a pipeline with no hooks.
pub fn wrap<I, O, E, F, Fut>(core: F) -> Pipeline<I, O, E>
where
    I: Payload,
    O: Payload,
    E: Payload,
    F: Fn(Vec<I>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<O, E>> + Send + 'static,
{
    Pipeline::new(core)
}

/// A core function wrapped with an ordered set of hooks.
///
/// Registration consumes and returns the pipeline so calls chain. Once built,
/// the pipeline is cheap to clone and may be invoked concurrently from any
/// number of tasks; each invocation gets its own execution record.
pub struct Pipeline<I, O, E> {
    name: Arc<str>,
    core: CoreFn<I, O, E>,
    registry: HookRegistry<I, O, E>,
}

impl<I: Payload, O: Payload, E: Payload> Pipeline<I, O, E> {
    /// Creates a pipeline named `"pipeline"` around `core`.
    pub fn new<F, Fut>(core: F) -> Self
    where
        F: Fn(Vec<I>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, E>> + Send + 'static,
    {
        Self::named("pipeline", core)
    }

    /// Creates a pipeline with a name used in tracing spans.
    pub fn named<F, Fut>(name: impl Into<String>, core: F) -> Self
    where
        F: Fn(Vec<I>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, E>> + Send + 'static,
    {
        let name: String = name.into();
        Self {
            name: Arc::from(name),
            core: Arc::new(move |args: Vec<I>| core(args).boxed()),
            registry: HookRegistry::new(),
        }
    }

    /// Registers a hook after checking its shape.
    pub fn register(mut self, hook: Hook<I, O, E>) -> Result<Self, InvalidHookShape> {
        self.registry.register(hook)?;
        Ok(self)
    }

    /// Registers a hook with only an entry handler.
    pub fn register_entry<F, Fut>(self, f: F) -> Self
    where
        F: Fn(EntryContext<I, O, E>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<Vec<I>>, E>> + Send + 'static,
    {
        let hook = Hook::new(self.sugar_name(Phase::Entry)).on_entry(f);
        self.register_valid(hook)
    }

    /// Registers a hook with only an exit handler.
    pub fn register_exit<F, Fut>(self, f: F) -> Self
    where
        F: Fn(ExitContext<I, O, E>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<O>, E>> + Send + 'static,
    {
        let hook = Hook::new(self.sugar_name(Phase::Exit)).on_exit(f);
        self.register_valid(hook)
    }

    /// Registers a hook with only a failure handler.
    pub fn register_failure<F, Fut>(self, f: F) -> Self
    where
        F: Fn(FailureContext<I, O, E>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Option<E>, E>> + Send + 'static,
    {
        let hook = Hook::new(self.sugar_name(Phase::Failure)).on_failure(f);
        self.register_valid(hook)
    }

    /// Registers a struct-based [`Interceptor`] for the phases it declares.
    pub fn register_interceptor(
        self,
        interceptor: Arc<dyn Interceptor<I, O, E>>,
    ) -> Result<Self, InvalidHookShape> {
        self.register(InterceptorAdapter::into_hook(interceptor))
    }

    /// Runs the pipeline once with `args`.
    ///
    /// Returns `Ok(Outcome::Success)` when the core function and every exit
    /// handler succeed, `Ok(Outcome::Recovered)` when something failed and the
    /// failure handlers ran, and `Err` only when a failure handler itself raised.
    pub async fn invoke(&self, args: Vec<I>) -> Result<Outcome<O, E>, UnrecoveredFailure<E>> {
        let hooks = self.registry.snapshot();
        let span = tracing::info_span!(
            "invoke",
            pipeline = %self.name,
            hooks = hooks.len(),
            invocation = tracing::field::Empty,
        );

        runner::run(&hooks, &self.core, args).instrument(span).await
    }

    fn sugar_name(&self, phase: Phase) -> String {
        format!("{phase}#{}", self.registry.len())
    }

    fn register_valid(mut self, hook: Hook<I, O, E>) -> Self {
        if let Err(e) = self.registry.register(hook) {
            // Sugar hooks always carry a name and exactly one handler.
            tracing::error!(error = %e, "Rejected single-phase hook");
        }
        self
    }
}

impl<I, O, E> Pipeline<I, O, E> {
    /// Returns the pipeline name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns hook names in registration order.
    pub fn hooks(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Returns the registration list.
    pub fn registry(&self) -> &HookRegistry<I, O, E> {
        &self.registry
    }

    /// Returns the number of registered hooks.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns whether no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

impl<I, O, E> Clone for Pipeline<I, O, E> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            core: Arc::clone(&self.core),
            registry: self.registry.clone(),
        }
    }
}

impl<I, O, E> std::fmt::Debug for Pipeline<I, O, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("core", &"<function>")
            .field("hooks", &self.registry)
            .finish()
    }
}
