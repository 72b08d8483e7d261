//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use hookwrap_core::config::router::RouterConfig;
use hookwrap_pipeline::{Hook, Pipeline, wrap};

/// Pipeline shape used by the engine tests.
pub type Numbers = Pipeline<i32, i32, String>;

/// Records hook calls in the order they happen.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

/// Core function summing its arguments.
pub fn summing() -> Numbers {
    wrap(|args: Vec<i32>| async move { Ok(args.iter().sum::<i32>()) })
}

/// Core function that always fails with `message`.
pub fn failing(message: &'static str) -> Numbers {
    wrap(move |_: Vec<i32>| async move { Err(message.to_string()) })
}

/// A hook that logs `<name> entry|exit|failure` and changes nothing.
pub fn recording(name: &'static str, log: &CallLog) -> Hook<i32, i32, String> {
    let (entry, exit, failure) = (log.clone(), log.clone(), log.clone());
    Hook::new(name)
        .on_entry(move |_| {
            entry.push(format!("{name} entry"));
            async { Ok(None) }
        })
        .on_exit(move |_| {
            exit.push(format!("{name} exit"));
            async { Ok(None) }
        })
        .on_failure(move |_| {
            failure.push(format!("{name} failure"));
            async { Ok(None) }
        })
}

/// Router config with tracing off to keep test output quiet.
pub fn quiet_router() -> RouterConfig {
    RouterConfig {
        trace: false,
        ..RouterConfig::default()
    }
}
