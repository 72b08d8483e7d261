//! Hook context: the snapshot view handed to every phase handler, plus the
//! single-shot continuation channel a handler may settle explicitly.

use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use uuid::Uuid;

use super::definitions::{FailureSite, Phase};

/// Context passed to entry handlers.
pub type EntryContext<I, O, E> = HookContext<I, O, E, Option<Vec<I>>>;

/// Context passed to exit handlers.
pub type ExitContext<I, O, E> = HookContext<I, O, E, Option<O>>;

/// Context passed to failure handlers.
pub type FailureContext<I, O, E> = HookContext<I, O, E, Option<E>>;

/// Snapshot of the execution record at the moment a handler is called.
///
/// The fields are copies: mutating them has no effect on the pipeline.
/// A handler changes the record only through its resolved value, either
/// returned or passed to [`resolve`](Self::resolve).
#[derive(Debug, Clone)]
pub struct HookContext<I, O, E, T> {
    /// Arguments currently destined for the core function.
    pub input: Vec<I>,
    /// Core output, once the core function has run.
    pub output: Option<O>,
    /// Error under recovery, during the failure phase.
    pub error: Option<E>,
    /// Where the error under recovery was raised.
    pub failure_site: Option<FailureSite>,
    /// Position of this hook in the effective order.
    pub cursor: usize,
    /// Phase being run.
    pub phase: Phase,
    /// Name of the hook being called.
    pub hook: String,
    /// Identifier of the invocation this snapshot belongs to.
    pub invocation_id: Uuid,
    completion: Completion<T, E>,
}

impl<I, O, E, T> HookContext<I, O, E, T> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        input: Vec<I>,
        output: Option<O>,
        error: Option<E>,
        failure_site: Option<FailureSite>,
        cursor: usize,
        phase: Phase,
        hook: String,
        invocation_id: Uuid,
        completion: Completion<T, E>,
    ) -> Self {
        Self {
            input,
            output,
            error,
            failure_site,
            cursor,
            phase,
            hook,
            invocation_id,
            completion,
        }
    }

    /// Returns the positional argument at `index`.
    pub fn arg(&self, index: usize) -> Option<&I> {
        self.input.get(index)
    }

    /// Settles the hook with `value`. Returns `false` if it was already settled.
    pub fn resolve(&self, value: T) -> bool {
        self.completion.resolve(value)
    }

    /// Settles the hook with a failure. Returns `false` if it was already settled.
    pub fn reject(&self, error: E) -> bool {
        self.completion.reject(error)
    }

    /// Returns a handle that can settle the hook from another task.
    pub fn completion(&self) -> Completion<T, E> {
        self.completion.clone()
    }
}

/// Single-shot completion handle shared by every path that can settle a hook.
///
/// The first `resolve` or `reject` wins; later calls return `false`.
pub struct Completion<T, E> {
    sender: Arc<Mutex<Option<oneshot::Sender<Result<T, E>>>>>,
}

impl<T, E> Completion<T, E> {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<Result<T, E>>) {
        let (tx, rx) = oneshot::channel();
        let completion = Self {
            sender: Arc::new(Mutex::new(Some(tx))),
        };
        (completion, rx)
    }

    /// Settles with a value.
    pub fn resolve(&self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Settles with a failure.
    pub fn reject(&self, error: E) -> bool {
        self.settle(Err(error))
    }

    /// Returns whether some path has already settled (or claimed) this handle.
    pub fn is_settled(&self) -> bool {
        match self.sender.lock() {
            Ok(guard) => guard.is_none(),
            Err(poisoned) => poisoned.into_inner().is_none(),
        }
    }

    /// Takes the sender without sending, so no later settle can land.
    ///
    /// Returns `true` if this call was the one to close the channel.
    pub(crate) fn claim(&self) -> bool {
        self.take_sender().is_some()
    }

    fn settle(&self, result: Result<T, E>) -> bool {
        match self.take_sender() {
            Some(tx) => tx.send(result).is_ok(),
            None => false,
        }
    }

    fn take_sender(&self) -> Option<oneshot::Sender<Result<T, E>>> {
        match self.sender.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}

impl<T, E> Clone for Completion<T, E> {
    fn clone(&self) -> Self {
        Self {
            sender: Arc::clone(&self.sender),
        }
    }
}

impl<T, E> std::fmt::Debug for Completion<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion")
            .field("settled", &self.is_settled())
            .finish()
    }
}
