//! Demo router: a core routing function wrapped with the stock hooks.
//!
//! Arguments are positional: `[url, body]`. The router answers
//! `/example` when the body carries `id == "banana"` and rejects every other
//! request. Hooks registered by [`build`]:
//!
//! 1. [`InjectField`] writes the configured id into the body
//! 2. [`ReportFailure`] logs whatever failed
//! 3. [`TraceHook`] (optional) logs input and output
//!
//! The last-registered hook runs first on entry, so the trace sees the raw
//! request before the id is injected.

use std::sync::Arc;

use serde_json::{Value, json};

use hookwrap_core::config::router::RouterConfig;
use hookwrap_core::error::AppError;
use hookwrap_core::result::AppResult;
use hookwrap_hooks::{InjectField, ReportFailure, TraceHook};
use hookwrap_pipeline::{Outcome, Pipeline};

/// Router pipeline over JSON values.
pub type RouterPipeline = Pipeline<Value, Value, AppError>;

/// Core routing function.
pub async fn route(args: Vec<Value>) -> Result<Value, AppError> {
    let url = args.first().and_then(Value::as_str).unwrap_or_default();
    let id = args.get(1).and_then(|body| body.get("id")).and_then(Value::as_str);

    match (url, id) {
        ("/example", Some("banana")) => Ok(json!({ "response": "🍌" })),
        ("/example", _) => Err(AppError::validation("/example requires a banana id")),
        ("/invalid", _) => Err(AppError::validation("/invalid is invalid")),
        _ => Err(AppError::not_found(format!("No route for '{url}'"))),
    }
}

/// Builds the router pipeline from configuration.
pub fn build(config: &RouterConfig) -> AppResult<RouterPipeline> {
    let inject = InjectField::new(1, config.inject_field.clone(), config.inject_value.clone());

    let mut pipeline = Pipeline::named("router", route)
        .register_interceptor(Arc::new(inject))?
        .register_interceptor(Arc::new(ReportFailure::<AppError>::new()))?;

    if config.trace {
        pipeline =
            pipeline.register_interceptor(Arc::new(TraceHook::<Value, Value, AppError>::new()))?;
    }

    tracing::debug!(hooks = ?pipeline.hooks(), "Router pipeline built");
    Ok(pipeline)
}

/// Sends one request through the pipeline and renders the reply.
///
/// A recovered failure becomes `{"error": "<message>"}`. Only a failure
/// hook that itself raised is returned as `Err`.
pub async fn dispatch(pipeline: &RouterPipeline, url: &str, body: Value) -> AppResult<Value> {
    match pipeline.invoke(vec![Value::from(url), body]).await? {
        Outcome::Success(reply) => Ok(reply),
        Outcome::Recovered { error, site } => {
            tracing::debug!(site = %site, kind = %error.kind, "Request recovered");
            Ok(json!({ "error": error.message }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_route_without_hooks() {
        let reply = route(vec![json!("/example"), json!({ "id": "banana" })]).await;
        assert_eq!(reply.unwrap(), json!({ "response": "🍌" }));

        let err = route(vec![json!("/example"), json!({})]).await.unwrap_err();
        assert_eq!(err.kind, hookwrap_core::error::ErrorKind::Validation);

        let err = route(vec![json!("/missing")]).await.unwrap_err();
        assert_eq!(err.kind, hookwrap_core::error::ErrorKind::NotFound);
    }

    #[test]
    fn test_build_registers_trace_when_enabled() {
        let mut config = RouterConfig::default();
        assert_eq!(build(&config).unwrap().hooks(), vec!["inject:id", "report", "trace"]);

        config.trace = false;
        assert_eq!(build(&config).unwrap().hooks(), vec!["inject:id", "report"]);
    }
}
