//! Convenience result type alias for Hookwrap.

use crate::error::AppError;

/// A specialized `Result` type for Hookwrap operations.
pub type AppResult<T> = Result<T, AppError>;
