//! Hook system: definitions, the per-call context, and the registration list.

pub mod context;
pub mod definitions;
pub mod registry;

pub use context::{Completion, EntryContext, ExitContext, FailureContext, HookContext};
pub use definitions::{FailureSite, Hook, Payload, Phase};
pub use registry::HookRegistry;
