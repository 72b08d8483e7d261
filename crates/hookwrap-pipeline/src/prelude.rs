//! Prelude for convenient imports.

pub use async_trait::async_trait;

pub use crate::engine::outcome::Outcome;
pub use crate::error::{InvalidHookShape, UnrecoveredFailure};
pub use crate::hooks::context::{
    Completion, EntryContext, ExitContext, FailureContext, HookContext,
};
pub use crate::hooks::definitions::{FailureSite, Hook, Payload, Phase, sync};
pub use crate::pipeline::{Pipeline, wrap};
pub use crate::traits::Interceptor;

pub use crate::hook;
