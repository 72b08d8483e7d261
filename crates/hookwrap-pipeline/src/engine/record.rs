//! Execution record: the mutable state of a single invocation.

use uuid::Uuid;

use crate::hooks::context::{Completion, HookContext};
use crate::hooks::definitions::{FailureSite, Payload, Phase};

/// Per-invocation state shared by every hook call of that invocation.
///
/// A record is allocated at the start of `invoke` and dropped at its end;
/// concurrent invocations each own their own record.
#[derive(Debug)]
pub struct ExecutionRecord<I, O, E> {
    invocation_id: Uuid,
    pub(crate) input: Vec<I>,
    pub(crate) output: Option<O>,
    pub(crate) error: Option<E>,
    pub(crate) failure_site: Option<FailureSite>,
    pub(crate) cursor: usize,
}

impl<I: Payload, O: Payload, E: Payload> ExecutionRecord<I, O, E> {
    /// Starts a record for a call with `args`.
    pub fn new(args: Vec<I>) -> Self {
        Self {
            invocation_id: Uuid::now_v7(),
            input: args,
            output: None,
            error: None,
            failure_site: None,
            cursor: 0,
        }
    }

    /// Identifier of this invocation.
    pub fn invocation_id(&self) -> Uuid {
        self.invocation_id
    }

    /// Current input.
    pub fn input(&self) -> &[I] {
        &self.input
    }

    /// Current output, once the core function has run.
    pub fn output(&self) -> Option<&O> {
        self.output.as_ref()
    }

    /// Error under recovery, if any.
    pub fn error(&self) -> Option<&E> {
        self.error.as_ref()
    }

    /// Current cursor in the effective order.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Copies the record into the view handed to a phase handler.
    ///
    /// `cursor` is the position of the hook being called, not the record's
    /// cursor (entry advances the record's cursor before the call).
    pub(crate) fn snapshot<T>(
        &self,
        phase: Phase,
        hook: &str,
        cursor: usize,
        completion: Completion<T, E>,
    ) -> HookContext<I, O, E, T> {
        HookContext::new(
            self.input.clone(),
            self.output.clone(),
            self.error.clone(),
            self.failure_site.clone(),
            cursor,
            phase,
            hook.to_string(),
            self.invocation_id,
            completion,
        )
    }
}
