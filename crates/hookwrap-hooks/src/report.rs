//! Failure hook that reports and optionally rewrites the error.

use std::fmt::Display;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use hookwrap_pipeline::{FailureContext, FailureSite, Interceptor, Payload, Phase};

/// Maps the error under recovery, given where it was raised.
pub type ErrorMapper<E> = Arc<dyn Fn(&E, &FailureSite) -> E + Send + Sync>;

/// Logs every failure it unwinds through.
///
/// Without a mapper the error passes through unchanged; with one, the
/// mapped value becomes the error seen by outer hooks and the caller.
pub struct ReportFailure<E> {
    name: String,
    mapper: Option<ErrorMapper<E>>,
}

impl<E> ReportFailure<E> {
    pub fn new() -> Self {
        Self {
            name: "report".to_string(),
            mapper: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Rewrites the error with `f` after logging it.
    pub fn map_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&E, &FailureSite) -> E + Send + Sync + 'static,
    {
        self.mapper = Some(Arc::new(f));
        self
    }
}

impl<E> Default for ReportFailure<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for ReportFailure<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportFailure")
            .field("name", &self.name)
            .field("mapped", &self.mapper.is_some())
            .finish()
    }
}

#[async_trait]
impl<I, O, E> Interceptor<I, O, E> for ReportFailure<E>
where
    I: Payload,
    O: Payload,
    E: Payload + Display,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn phases(&self) -> &'static [Phase] {
        &[Phase::Failure]
    }

    async fn on_failure(&self, ctx: FailureContext<I, O, E>) -> Result<Option<E>, E> {
        let Some(err) = ctx.error else {
            return Ok(None);
        };
        let site = ctx.failure_site.unwrap_or(FailureSite::Core);

        error!(
            hook = %self.name,
            invocation = %ctx.invocation_id,
            site = %site,
            error = %err,
            "Pipeline call failed"
        );

        Ok(self.mapper.as_ref().map(|map| map(&err, &site)))
    }
}
