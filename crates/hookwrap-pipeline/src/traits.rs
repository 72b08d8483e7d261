//! Trait-based hooks.

use std::sync::Arc;

use async_trait::async_trait;

use crate::hooks::context::{EntryContext, ExitContext, FailureContext};
use crate::hooks::definitions::{Hook, Payload, Phase};

/// A hook written as a type instead of a set of closures.
///
/// Only the phases returned by [`phases`](Self::phases) are registered; the
/// other methods are never called. The default bodies leave the record
/// untouched.
#[async_trait]
pub trait Interceptor<I: Payload, O: Payload, E: Payload>: Send + Sync {
    /// Returns the hook name.
    fn name(&self) -> &str;

    /// Returns the phases this interceptor handles.
    fn phases(&self) -> &'static [Phase];

    /// Runs before the core function.
    async fn on_entry(&self, _ctx: EntryContext<I, O, E>) -> Result<Option<Vec<I>>, E> {
        Ok(None)
    }

    /// Runs after the core function succeeded.
    async fn on_exit(&self, _ctx: ExitContext<I, O, E>) -> Result<Option<O>, E> {
        Ok(None)
    }

    /// Runs while unwinding a failure.
    async fn on_failure(&self, _ctx: FailureContext<I, O, E>) -> Result<Option<E>, E> {
        Ok(None)
    }
}

/// Adapts an [`Interceptor`] into a closure-based [`Hook`].
#[derive(Debug)]
pub struct InterceptorAdapter;

impl InterceptorAdapter {
    /// Builds a hook whose handlers delegate to `interceptor`.
    pub fn into_hook<I, O, E>(interceptor: Arc<dyn Interceptor<I, O, E>>) -> Hook<I, O, E>
    where
        I: Payload,
        O: Payload,
        E: Payload,
    {
        let mut hook = Hook::new(interceptor.name());

        for phase in interceptor.phases() {
            let inner = Arc::clone(&interceptor);
            hook = match phase {
                Phase::Entry => hook.on_entry(move |ctx| {
                    let inner = Arc::clone(&inner);
                    async move { inner.on_entry(ctx).await }
                }),
                Phase::Exit => hook.on_exit(move |ctx| {
                    let inner = Arc::clone(&inner);
                    async move { inner.on_exit(ctx).await }
                }),
                Phase::Failure => hook.on_failure(move |ctx| {
                    let inner = Arc::clone(&inner);
                    async move { inner.on_failure(ctx).await }
                }),
            };
        }

        hook
    }
}
