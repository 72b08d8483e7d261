//! Observation-only tracing hook.

use std::fmt::Debug;
use std::marker::PhantomData;

use async_trait::async_trait;
use tracing::{info, warn};

use hookwrap_pipeline::{EntryContext, ExitContext, FailureContext, Interceptor, Payload, Phase};

/// Logs the input on entry, the output on exit and the error on failure.
///
/// Every handler resolves to "absent", so the record is never changed.
pub struct TraceHook<I, O, E> {
    name: String,
    _types: PhantomData<fn() -> (I, O, E)>,
}

impl<I, O, E> TraceHook<I, O, E> {
    /// Creates a tracing hook named `"trace"`.
    pub fn new() -> Self {
        Self::named("trace")
    }

    /// Creates a tracing hook with a custom name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            _types: PhantomData,
        }
    }
}

impl<I, O, E> Default for TraceHook<I, O, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, O, E> std::fmt::Debug for TraceHook<I, O, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceHook").field("name", &self.name).finish()
    }
}

#[async_trait]
impl<I, O, E> Interceptor<I, O, E> for TraceHook<I, O, E>
where
    I: Payload + Debug,
    O: Payload + Debug,
    E: Payload + Debug,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn phases(&self) -> &'static [Phase] {
        &[Phase::Entry, Phase::Exit, Phase::Failure]
    }

    async fn on_entry(&self, ctx: EntryContext<I, O, E>) -> Result<Option<Vec<I>>, E> {
        info!(
            hook = %self.name,
            invocation = %ctx.invocation_id,
            input = ?ctx.input,
            "Call started"
        );
        Ok(None)
    }

    async fn on_exit(&self, ctx: ExitContext<I, O, E>) -> Result<Option<O>, E> {
        info!(
            hook = %self.name,
            invocation = %ctx.invocation_id,
            output = ?ctx.output,
            "Call finished"
        );
        Ok(None)
    }

    async fn on_failure(&self, ctx: FailureContext<I, O, E>) -> Result<Option<E>, E> {
        warn!(
            hook = %self.name,
            invocation = %ctx.invocation_id,
            site = ?ctx.failure_site,
            error = ?ctx.error,
            "Call failed"
        );
        Ok(None)
    }
}
