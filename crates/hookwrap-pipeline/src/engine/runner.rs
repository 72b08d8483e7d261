//! Phase runner: drives one invocation through entry, core, exit and failure.
//!
//! Ordering:
//! - Entry walks the effective order (last-registered hook first), advancing
//!   the cursor before each call.
//! - Exit walks back down from the cursor, so it visits exactly the hooks
//!   that entered, most recent first.
//! - A failure anywhere in entry, core or exit stops forward progress and
//!   unwinds the failure handlers from wherever the cursor stands.
//!
//! A failure handler that raises aborts the unwind and escapes as
//! [`UnrecoveredFailure`].

use std::sync::Arc;

use tracing::{debug, error, warn};

use super::bridge;
use super::outcome::Outcome;
use super::record::ExecutionRecord;
use crate::error::UnrecoveredFailure;
use crate::hooks::definitions::{FailureSite, Hook, Payload, Phase};
use crate::hooks::registry::effective;
use crate::pipeline::CoreFn;

/// Runs every phase of one invocation against a fresh record.
pub(crate) async fn run<I, O, E>(
    hooks: &[Arc<Hook<I, O, E>>],
    core: &CoreFn<I, O, E>,
    args: Vec<I>,
) -> Result<Outcome<O, E>, UnrecoveredFailure<E>>
where
    I: Payload,
    O: Payload,
    E: Payload,
{
    let mut record = ExecutionRecord::new(args);
    tracing::Span::current().record("invocation", tracing::field::display(record.invocation_id()));

    match forward(hooks, core, &mut record).await {
        Ok(output) => Ok(Outcome::Success(output)),
        Err((error, site)) => unwind(hooks, &mut record, error, site).await,
    }
}

/// Entry phase, core call and exit phase.
async fn forward<I, O, E>(
    hooks: &[Arc<Hook<I, O, E>>],
    core: &CoreFn<I, O, E>,
    record: &mut ExecutionRecord<I, O, E>,
) -> Result<O, (E, FailureSite)>
where
    I: Payload,
    O: Payload,
    E: Payload,
{
    while record.cursor < hooks.len() {
        let position = record.cursor;
        let hook = effective(hooks, position);
        record.cursor += 1;

        let Some(handler) = hook.entry_handler() else {
            continue;
        };

        debug!(hook = %hook.name(), cursor = position, "Running entry handler");

        match bridge::settle(handler, record, Phase::Entry, hook.name(), position).await {
            Ok(Some(args)) => record.input = args,
            Ok(None) => {}
            Err(e) => {
                let site = FailureSite::Entry {
                    hook: hook.name().to_string(),
                };
                return Err((e, site));
            }
        }
    }

    debug!(args = record.input.len(), "Calling core function");
    let mut output = core(record.input.clone())
        .await
        .map_err(|e| (e, FailureSite::Core))?;
    record.output = Some(output.clone());
    debug!("Core function succeeded");

    while record.cursor > 0 {
        record.cursor -= 1;
        let position = record.cursor;
        let hook = effective(hooks, position);

        let Some(handler) = hook.exit_handler() else {
            continue;
        };

        debug!(hook = %hook.name(), cursor = position, "Running exit handler");

        match bridge::settle(handler, record, Phase::Exit, hook.name(), position).await {
            Ok(Some(replacement)) => {
                record.output = Some(replacement.clone());
                output = replacement;
            }
            Ok(None) => {}
            Err(e) => {
                let site = FailureSite::Exit {
                    hook: hook.name().to_string(),
                };
                return Err((e, site));
            }
        }
    }

    Ok(output)
}

/// Failure phase: hands the error down through every entered hook.
async fn unwind<I, O, E>(
    hooks: &[Arc<Hook<I, O, E>>],
    record: &mut ExecutionRecord<I, O, E>,
    initial: E,
    site: FailureSite,
) -> Result<Outcome<O, E>, UnrecoveredFailure<E>>
where
    I: Payload,
    O: Payload,
    E: Payload,
{
    warn!(site = %site, cursor = record.cursor, "Invocation failed, unwinding failure handlers");

    let mut error = initial;
    record.error = Some(error.clone());
    record.failure_site = Some(site.clone());

    while record.cursor > 0 {
        record.cursor -= 1;
        let position = record.cursor;
        let hook = effective(hooks, position);

        let Some(handler) = hook.failure_handler() else {
            continue;
        };

        debug!(hook = %hook.name(), cursor = position, "Running failure handler");

        match bridge::settle(handler, record, Phase::Failure, hook.name(), position).await {
            Ok(Some(replacement)) => {
                record.error = Some(replacement.clone());
                error = replacement;
            }
            Ok(None) => {}
            Err(raised) => {
                error!(
                    hook = %hook.name(),
                    cursor = position,
                    "Failure handler raised, aborting unwind"
                );
                return Err(UnrecoveredFailure {
                    hook: hook.name().to_string(),
                    cursor: position,
                    error: raised,
                    recovering: error,
                });
            }
        }
    }

    Ok(Outcome::Recovered { error, site })
}
