//! Router demo pipeline configuration.

use serde::{Deserialize, Serialize};

/// Settings for the hooks wrapped around the router demo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Body field the injection hook writes before routing.
    #[serde(default = "default_inject_field")]
    pub inject_field: String,
    /// Value written into `inject_field`.
    #[serde(default = "default_inject_value")]
    pub inject_value: String,
    /// Whether to register the tracing hook around the router.
    #[serde(default = "default_true")]
    pub trace: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            inject_field: default_inject_field(),
            inject_value: default_inject_value(),
            trace: true,
        }
    }
}

fn default_inject_field() -> String {
    "id".to_string()
}

fn default_inject_value() -> String {
    "banana".to_string()
}

fn default_true() -> bool {
    true
}
