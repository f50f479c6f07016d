//! File-backed tracing setup.
//!
//! The viewer owns the terminal, so log output goes to
//! `${FOLIO_HOME}/logs/folio.log` through a non-blocking writer. `FOLIO_LOG`
//! takes precedence over the configured level.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

pub const LOG_ENV: &str = "FOLIO_LOG";
pub const LOG_FILE: &str = "folio.log";

/// Builds the filter: `FOLIO_LOG` if set and valid, else `configured`.
///
/// # Errors
/// Returns an error if neither directive parses.
pub fn filter(configured: &str) -> Result<EnvFilter> {
    if let Ok(directive) = std::env::var(LOG_ENV) {
        match EnvFilter::try_new(&directive) {
            Ok(filter) => return Ok(filter),
            Err(err) => eprintln!("Ignoring invalid {LOG_ENV}={directive}: {err}"),
        }
    }
    EnvFilter::try_new(configured)
        .with_context(|| format!("Invalid logging level '{configured}'"))
}

/// Installs the global subscriber.
///
/// Returns `None` when logging is disabled. The returned guard flushes
/// pending lines on drop and must be kept alive for the program's lifetime.
///
/// # Errors
/// Returns an error if the log directory cannot be created, the level is
/// invalid, or a global subscriber is already installed.
pub fn init(config: &LoggingConfig, log_dir: &Path) -> Result<Option<WorkerGuard>> {
    if !config.enabled {
        return Ok(None);
    }

    let filter = filter(&config.level)?;
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to install log subscriber: {err}"))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging initialized");
    Ok(Some(guard))
}
