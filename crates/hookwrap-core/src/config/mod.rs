//! Application configuration schemas.
//!
//! Configuration is deserialized from an optional TOML file merged with
//! `HOOKWRAP__`-prefixed environment variables via the `config` crate.
//! Every section has defaults, so an absent file yields a usable config.

pub mod logging;
pub mod router;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::router::RouterConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Router demo pipeline settings.
    #[serde(default)]
    pub router: RouterConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// The file is optional. Environment variables such as
    /// `HOOKWRAP__LOGGING__LEVEL=debug` override file values.
    pub fn load(path: &str) -> Result<Self, AppError> {
        tracing::debug!(path = %path, "Loading configuration");

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("HOOKWRAP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
