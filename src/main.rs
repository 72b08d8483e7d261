//! Hookwrap router: sends one request through the demo router pipeline.
//!
//! ```text
//! hookwrap-router /example '{"name": "split"}'
//! {"response":"🍌"}
//! ```

use clap::Parser;
use serde_json::Value;
use tracing_subscriber::{EnvFilter, fmt};

use hookwrap::router;
use hookwrap_core::config::AppConfig;
use hookwrap_core::error::AppError;

/// Route a request through the hooked router pipeline
#[derive(Debug, Parser)]
#[command(name = "hookwrap-router", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Request URL, e.g. `/example`
    url: String,

    /// Request body as JSON
    #[arg(default_value = "{}")]
    body: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    match run(&cli, &config).await {
        Ok(reply) => println!("{}", reply),
        Err(e) => {
            tracing::error!("Router error: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Initialize tracing/logging. Logs go to stderr so stdout carries only the reply.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

async fn run(cli: &Cli, config: &AppConfig) -> Result<Value, AppError> {
    let body: Value = serde_json::from_str(&cli.body)?;
    let pipeline = router::build(&config.router)?;

    tracing::info!(url = %cli.url, "Dispatching request");
    router::dispatch(&pipeline, &cli.url, body).await
}
