//! Continuation bridge.
//!
//! A handler can finish in three ways: return a ready value, return a future
//! that resolves later, or settle the [`Completion`] carried by its context
//! (possibly from another task). All paths race to the same single-shot
//! completion and the first one wins:
//!
//! - If the completion is settled while the handler's future is still
//!   pending, that value is used and the handler's future is dropped.
//! - If the handler's future finishes first, its result is used unless an
//!   explicit settle landed during that same poll.

use tracing::trace;

use super::record::ExecutionRecord;
use crate::hooks::context::Completion;
use crate::hooks::definitions::{HookFn, Payload, Phase};

/// Runs one phase handler against a snapshot of `record` and waits for it to settle.
pub(crate) async fn settle<I, O, E, T>(
    handler: &HookFn<I, O, E, T>,
    record: &ExecutionRecord<I, O, E>,
    phase: Phase,
    hook: &str,
    position: usize,
) -> Result<T, E>
where
    I: Payload,
    O: Payload,
    E: Payload,
    T: Send + 'static,
{
    let (completion, mut settled) = Completion::channel();
    let mut returned = handler(record.snapshot(phase, hook, position, completion.clone()));

    let result = tokio::select! {
        biased;
        Ok(explicit) = &mut settled => {
            trace!(hook = %hook, phase = %phase, "Hook settled through its completion handle");
            return explicit;
        }
        result = &mut returned => result,
    };

    if completion.claim() {
        return result;
    }

    // An explicit settle landed while the handler was returning; it was first.
    match settled.await {
        Ok(explicit) => explicit,
        Err(_) => result,
    }
}
