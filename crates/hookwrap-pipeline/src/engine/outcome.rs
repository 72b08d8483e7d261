//! Result of a completed invocation.

use crate::hooks::definitions::FailureSite;

/// What an invocation resolved to once every phase has run.
///
/// A failure that the failure phase observed is returned here as
/// [`Outcome::Recovered`], not raised. Callers distinguish success from
/// recovered failure by matching on the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<O, E> {
    /// The core function and every exit handler succeeded.
    Success(O),
    /// Something failed and the failure phase ran to completion.
    Recovered {
        /// The error after every failure handler had its turn.
        error: E,
        /// Where the first failure was raised.
        site: FailureSite,
    },
}

impl<O, E> Outcome<O, E> {
    /// Returns whether the invocation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the output of a successful invocation.
    pub fn success(self) -> Option<O> {
        match self {
            Self::Success(output) => Some(output),
            Self::Recovered { .. } => None,
        }
    }

    /// Returns the recovered error, if any.
    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Success(_) => None,
            Self::Recovered { error, .. } => Some(error),
        }
    }

    /// Returns the site of the recovered failure, if any.
    pub fn site(&self) -> Option<&FailureSite> {
        match self {
            Self::Success(_) => None,
            Self::Recovered { site, .. } => Some(site),
        }
    }

    /// Converts into a plain `Result`, dropping the failure site.
    pub fn into_result(self) -> Result<O, E> {
        match self {
            Self::Success(output) => Ok(output),
            Self::Recovered { error, .. } => Err(error),
        }
    }
}
