//! Engine behavior through the public pipeline API.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use hookwrap_pipeline::prelude::*;

use helpers::{CallLog, failing, recording, summing};

#[tokio::test]
async fn test_entry_reverses_and_exit_mirrors_registration() {
    let log = CallLog::default();
    let pipeline = summing()
        .register(recording("a", &log))
        .unwrap()
        .register(recording("b", &log))
        .unwrap()
        .register(recording("c", &log))
        .unwrap();

    pipeline.invoke(vec![1]).await.unwrap();

    assert_eq!(
        log.entries(),
        vec!["c entry", "b entry", "a entry", "a exit", "b exit", "c exit"]
    );
}

#[tokio::test]
async fn test_repeated_invocations_keep_the_same_order() {
    let log = CallLog::default();
    let pipeline = summing()
        .register(recording("a", &log))
        .unwrap()
        .register(recording("b", &log))
        .unwrap();

    pipeline.invoke(vec![1]).await.unwrap();
    let first = log.entries();
    log.clear();
    pipeline.invoke(vec![1]).await.unwrap();

    assert_eq!(log.entries(), first);
    assert_eq!(pipeline.hooks(), vec!["a", "b"]);
}

#[tokio::test]
async fn test_input_passes_through_without_entry_handlers() {
    let pipeline = summing().register_exit(|_| async { Ok(None) });
    let outcome = pipeline.invoke(vec![2, 3, 4]).await.unwrap();
    assert_eq!(outcome, Outcome::Success(9));
}

#[tokio::test]
async fn test_entry_replacement_reaches_core() {
    let seen = CallLog::default();
    let probe = seen.clone();
    let pipeline = summing()
        .register_entry(move |ctx| {
            probe.push(format!("{:?}", ctx.input));
            async { Ok(None) }
        })
        .register_entry(|ctx| async move { Ok(Some(vec![ctx.input[0] * 10])) });

    let outcome = pipeline.invoke(vec![7, 100]).await.unwrap();

    assert_eq!(outcome.success(), Some(70));
    assert_eq!(seen.entries(), vec!["[70]"]);
}

#[tokio::test]
async fn test_output_passes_through_when_exits_are_absent() {
    let pipeline = summing()
        .register_exit(|_| async { Ok(None) })
        .register_exit(|_| async { Ok(None) });
    assert_eq!(pipeline.invoke(vec![5, 5]).await.unwrap().success(), Some(10));
}

#[tokio::test]
async fn test_last_non_absent_exit_write_wins() {
    // "outer" is registered last, so it exits last and its write stands.
    let pipeline = summing()
        .register_exit(|_| async { Ok(None) })
        .register(Hook::new("outer").on_exit(|_| async { Ok(Some(-1)) }))
        .unwrap();
    assert_eq!(pipeline.invoke(vec![3]).await.unwrap().success(), Some(-1));

    // An inner write followed by an absent outer exit keeps the inner value.
    let pipeline = summing()
        .register_exit(|_| async { Ok(Some(42)) })
        .register_exit(|ctx| {
            assert_eq!(ctx.output, Some(42));
            async { Ok(None) }
        });
    assert_eq!(pipeline.invoke(vec![3]).await.unwrap().success(), Some(42));
}

#[tokio::test]
async fn test_failure_value_is_returned_not_raised() {
    let pipeline = failing("router exploded")
        .register_failure(|ctx| async move { Ok(ctx.error.map(|e| format!("{{error: {e}}}"))) });

    let outcome = pipeline.invoke(vec![]).await.unwrap();

    assert!(!outcome.is_success());
    assert_eq!(outcome.site(), Some(&FailureSite::Core));
    assert_eq!(
        outcome.into_result(),
        Err("{error: router exploded}".to_string())
    );
}

#[tokio::test]
async fn test_raising_failure_hook_propagates() {
    let log = CallLog::default();
    // "outer" enters first and would unwind last, after the raising hook.
    let pipeline = failing("core down")
        .register_failure(|_| async { Err("reporter down".to_string()) })
        .register(recording("outer", &log))
        .unwrap();

    let err = pipeline.invoke(vec![]).await.unwrap_err();

    assert_eq!(err.error, "reporter down");
    assert_eq!(err.recovering, "core down");
    assert_eq!(err.hook, "failure#0");
    assert_eq!(log.entries(), vec!["outer entry"]);
}

#[tokio::test]
async fn test_hooks_can_settle_through_completion() {
    let pipeline = summing()
        .register_entry(|ctx| {
            let completion = ctx.completion();
            async move {
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    completion.resolve(Some(vec![1, 1]));
                });
                futures_pending().await
            }
        })
        .register_exit(|ctx| {
            ctx.resolve(ctx.output.map(|o| o * 3));
            async { Ok(None) }
        });

    assert_eq!(pipeline.invoke(vec![9]).await.unwrap().success(), Some(6));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_invocations_do_not_leak_state() {
    let pipeline = summing()
        .register_entry(|ctx| async move {
            tokio::time::sleep(Duration::from_millis(ctx.input[0] as u64)).await;
            Ok(None)
        })
        .register_exit(|ctx| async move {
            tokio::task::yield_now().await;
            let first = ctx.input[0];
            Ok(ctx.output.map(|o| o * 1000 + first))
        });
    let pipeline = Arc::new(pipeline);

    let handles: Vec<_> = (1..=16)
        .map(|n| {
            let pipeline = Arc::clone(&pipeline);
            tokio::spawn(async move { (n, pipeline.invoke(vec![n, n]).await) })
        })
        .collect();

    for handle in handles {
        let (n, result) = handle.await.unwrap();
        assert_eq!(result.unwrap().success(), Some(2 * n * 1000 + n));
    }
}

#[tokio::test]
async fn test_hook_macro_and_interceptors_share_the_registry() {
    let pipeline = summing()
        .register(hook!("negate", exit: |ctx: ExitContext<i32, i32, String>| async move {
            Ok(ctx.output.map(|o| -o))
        }))
        .unwrap();

    assert_eq!(pipeline.hooks(), vec!["negate"]);
    assert_eq!(pipeline.invoke(vec![4]).await.unwrap().success(), Some(-4));
}

async fn futures_pending() -> Result<Option<Vec<i32>>, String> {
    std::future::pending().await
}
