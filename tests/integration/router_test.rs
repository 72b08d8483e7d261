//! End-to-end tests for the demo router pipeline.

mod helpers;

use serde_json::{Value, json};

use hookwrap::router::{self, RouterPipeline};
use hookwrap_core::config::router::RouterConfig;
use hookwrap_core::error::{AppError, ErrorKind};
use hookwrap_pipeline::Outcome;

use helpers::quiet_router;

fn router() -> RouterPipeline {
    router::build(&quiet_router()).unwrap()
}

#[tokio::test]
async fn test_injected_id_reaches_the_router() {
    let reply = router::dispatch(&router(), "/example", json!({})).await.unwrap();
    assert_eq!(reply, json!({ "response": "🍌" }));
}

#[tokio::test]
async fn test_injected_id_overrides_caller_id() {
    let reply = router::dispatch(&router(), "/example", json!({ "id": "apple", "size": 3 }))
        .await
        .unwrap();
    assert_eq!(reply, json!({ "response": "🍌" }));
}

#[tokio::test]
async fn test_router_failure_becomes_error_reply() {
    let reply = router::dispatch(&router(), "/invalid", json!({})).await.unwrap();
    assert_eq!(reply, json!({ "error": "/invalid is invalid" }));

    let reply = router::dispatch(&router(), "/nowhere", json!({})).await.unwrap();
    assert_eq!(reply, json!({ "error": "No route for '/nowhere'" }));
}

#[tokio::test]
async fn test_recovered_outcome_carries_app_error() {
    let outcome = router()
        .invoke(vec![json!("/invalid"), json!({})])
        .await
        .unwrap();

    match outcome {
        Outcome::Recovered { error, .. } => {
            assert_eq!(error, AppError::validation("/invalid is invalid"));
        }
        Outcome::Success(v) => panic!("expected a recovered failure, got {v}"),
    }
}

#[tokio::test]
async fn test_non_object_body_is_not_injected() {
    let reply = router::dispatch(&router(), "/example", json!("plain text")).await.unwrap();
    assert_eq!(reply, json!({ "error": "/example requires a banana id" }));
}

#[tokio::test]
async fn test_configured_value_is_injected() {
    let config = RouterConfig {
        inject_value: "apple".to_string(),
        ..quiet_router()
    };
    let pipeline = router::build(&config).unwrap();

    let reply = router::dispatch(&pipeline, "/example", json!({})).await.unwrap();
    assert_eq!(reply, json!({ "error": "/example requires a banana id" }));
}

#[tokio::test]
async fn test_tracing_hook_does_not_change_replies() {
    let pipeline = router::build(&RouterConfig::default()).unwrap();
    assert!(pipeline.hooks().contains(&"trace".to_string()));

    let reply = router::dispatch(&pipeline, "/example", json!({})).await.unwrap();
    assert_eq!(reply, json!({ "response": "🍌" }));
}

#[tokio::test]
async fn test_raising_failure_hook_is_an_error() {
    let pipeline = router()
        .register_failure(|_| async { Err(AppError::internal("error sink offline")) });

    let err = router::dispatch(&pipeline, "/invalid", json!({})).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Hook);
    assert!(err.message.contains("error sink offline"));
    assert!(err.message.contains("/invalid is invalid"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_are_independent() {
    let pipeline = router();
    let urls = ["/example", "/invalid", "/example", "/elsewhere"];

    let handles: Vec<_> = urls
        .iter()
        .cycle()
        .take(32)
        .map(|url| {
            let pipeline = pipeline.clone();
            let url = url.to_string();
            tokio::spawn(async move {
                let reply = router::dispatch(&pipeline, &url, json!({})).await;
                (url, reply)
            })
        })
        .collect();

    for handle in handles {
        let (url, reply) = handle.await.unwrap();
        let reply: Value = reply.unwrap();
        match url.as_str() {
            "/example" => assert_eq!(reply, json!({ "response": "🍌" })),
            "/invalid" => assert_eq!(reply["error"], "/invalid is invalid"),
            _ => assert_eq!(reply["error"], "No route for '/elsewhere'"),
        }
    }
}
