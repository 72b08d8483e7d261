//! Errors raised by the pipeline itself.
//!
//! Failures from hooks and the core function are values of the caller's own
//! error type `E`; they are recovered by the failure phase and returned as
//! [`Outcome::Recovered`](crate::Outcome::Recovered). Only the two errors
//! below escape the pipeline.

use std::fmt;

use thiserror::Error;

use hookwrap_core::error::{AppError, ErrorKind};

/// A hook was rejected at registration time.
///
/// Previously registered hooks are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hook shape for '{hook}': {reason}")]
pub struct InvalidHookShape {
    /// Name of the rejected hook.
    pub hook: String,
    /// Why the hook was rejected.
    pub reason: String,
}

impl InvalidHookShape {
    /// Creates a new shape error.
    pub fn new(hook: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            hook: hook.into(),
            reason: reason.into(),
        }
    }
}

/// A failure hook raised while the pipeline was unwinding.
///
/// This is terminal: the remaining failure hooks do not run and the
/// invocation resolves to this error instead of an [`Outcome`](crate::Outcome).
#[derive(Debug, Clone)]
pub struct UnrecoveredFailure<E> {
    /// Name of the failure hook that raised.
    pub hook: String,
    /// Cursor position of the raising hook in the effective order.
    pub cursor: usize,
    /// The error the failure hook raised.
    pub error: E,
    /// The error that was being recovered when the hook raised.
    pub recovering: E,
}

impl<E> fmt::Display for UnrecoveredFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failure hook '{}' raised while unwinding at cursor {}",
            self.hook, self.cursor
        )
    }
}

impl<E: fmt::Debug> std::error::Error for UnrecoveredFailure<E> {}

impl From<InvalidHookShape> for AppError {
    fn from(err: InvalidHookShape) -> Self {
        AppError::with_source(ErrorKind::Pipeline, err.to_string(), err)
    }
}

impl<E: fmt::Display> From<UnrecoveredFailure<E>> for AppError {
    fn from(err: UnrecoveredFailure<E>) -> Self {
        AppError::new(
            ErrorKind::Hook,
            format!("{err}: {} (while recovering from: {})", err.error, err.recovering),
        )
    }
}
