//! ComandAPP - command line front end for the restaurant administration API.
//!
//! Sign in once with `comandapp login`; the token is kept in the configured
//! store and every protected command is checked against the route guard of
//! the page it mirrors.

mod cli;
mod commands;
mod output;

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use comandapp_core::Config;

use cli::Cli;

/// Log file prefix inside the cache directory
const LOG_FILE_PREFIX: &str = "comandapp.log";

/// Initialize the tracing subscriber for logging.
///
/// `RUST_LOG` controls the level (default `warn`). With `to_file`, a daily
/// rolling file in the cache directory receives the same events; the
/// returned guard must live until exit so buffered lines are flushed.
fn init_tracing(to_file: bool) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let mut guard = None;
    let file_layer = if to_file {
        match Config::cache_dir().and_then(|dir| {
            std::fs::create_dir_all(&dir)?;
            Ok(dir)
        }) {
            Ok(dir) => {
                let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
                let (writer, worker) = tracing_appender::non_blocking(appender);
                guard = Some(worker);
                Some(fmt::layer().with_ansi(false).with_writer(writer))
            }
            Err(e) => {
                eprintln!("Warning: file logging disabled: {:#}", e);
                None
            }
        }
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load()?;
    config.apply_overrides(|key| std::env::var(key).ok());
    if let Some(ref url) = cli.api_url {
        config.api_url = url.clone();
    }
    debug!(api_url = %config.api_url, backend = %config.token_backend, "Configuration loaded");
    Ok(config)
}

#[tokio::main]
async fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let log_guard = init_tracing(cli.log_file);
    info!("ComandAPP starting");

    let result = match load_config(&cli) {
        Ok(config) => commands::run(cli, config).await,
        Err(e) => Err(e),
    };

    let code = match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };
    drop(log_guard);
    std::process::exit(code);
}
