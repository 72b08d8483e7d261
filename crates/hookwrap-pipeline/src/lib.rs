//! # hookwrap-pipeline
//!
//! Wraps a core function with an ordered set of hooks. Provides:
//!
//! - Hook registration with shape validation and copy-on-write storage
//! - A per-invocation execution record shared by every hook call
//! - The entry / exit / failure phase engine with onion ordering
//! - A continuation bridge so hooks may return, await, or call `resolve`/`reject`
//! - An [`Interceptor`] trait for struct-based hooks
//!
//! ```rust,ignore
//! let pipeline = wrap(|args: Vec<i32>| async move { Ok::<_, String>(args.iter().sum::<i32>()) })
//!     .register_entry(|ctx| async move { Ok(Some(ctx.input.iter().map(|n| n * 2).collect())) });
//!
//! let outcome = pipeline.invoke(vec![1, 2, 3]).await?;
//! assert_eq!(outcome.success(), Some(12));
//! ```

pub mod engine;
pub mod error;
pub mod hooks;
pub mod macros;
pub mod pipeline;
pub mod prelude;
pub mod traits;

pub use engine::outcome::Outcome;
pub use error::{InvalidHookShape, UnrecoveredFailure};
pub use hooks::context::{
    Completion, EntryContext, ExitContext, FailureContext, HookContext,
};
pub use hooks::definitions::{FailureSite, Hook, Payload, Phase, sync};
pub use hooks::registry::HookRegistry;
pub use pipeline::{Pipeline, wrap};
pub use traits::{Interceptor, InterceptorAdapter};
