//! Hook registry: the ordered registration list of a pipeline.
//!
//! Insertion order is the order of `register` calls. The list lives behind an
//! `Arc`, and every invocation holds its own clone of that `Arc` for its whole
//! run. Registering on a registry whose list is shared copies the list first,
//! so a running invocation never sees the list change.

use std::sync::Arc;

use tracing::info;

use super::definitions::{Hook, Phase};
use crate::error::InvalidHookShape;

/// Ordered, copy-on-write list of registered hooks.
pub struct HookRegistry<I, O, E> {
    hooks: Arc<Vec<Arc<Hook<I, O, E>>>>,
}

impl<I, O, E> HookRegistry<I, O, E> {
    /// Creates a new empty hook registry.
    pub fn new() -> Self {
        Self {
            hooks: Arc::new(Vec::new()),
        }
    }

    /// Validates and appends a hook.
    pub fn register(&mut self, hook: Hook<I, O, E>) -> Result<(), InvalidHookShape> {
        hook.validate()?;

        info!(
            hook = %hook.name(),
            position = self.hooks.len(),
            phases = ?hook.phases(),
            "Hook registered"
        );

        Arc::make_mut(&mut self.hooks).push(Arc::new(hook));
        Ok(())
    }

    /// Returns the list an invocation walks. The list never changes under the holder.
    pub fn snapshot(&self) -> Arc<Vec<Arc<Hook<I, O, E>>>> {
        Arc::clone(&self.hooks)
    }

    /// Returns hook names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.hooks.iter().map(|h| h.name().to_string()).collect()
    }

    /// Returns the number of hooks with a handler for `phase`.
    pub fn handler_count(&self, phase: Phase) -> usize {
        self.hooks.iter().filter(|h| h.handles(phase)).count()
    }

    /// Returns the number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns whether no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl<I, O, E> Default for HookRegistry<I, O, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, O, E> Clone for HookRegistry<I, O, E> {
    fn clone(&self) -> Self {
        Self {
            hooks: Arc::clone(&self.hooks),
        }
    }
}

impl<I, O, E> std::fmt::Debug for HookRegistry<I, O, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.hooks.iter()).finish()
    }
}

/// Maps a cursor in the effective order onto the registration list.
///
/// The effective order is the registration list read backwards: the
/// last-registered hook enters first.
pub(crate) fn effective<I, O, E>(hooks: &[Arc<Hook<I, O, E>>], cursor: usize) -> &Hook<I, O, E> {
    &hooks[hooks.len() - 1 - cursor]
}
