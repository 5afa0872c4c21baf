//! File-backed `tracing` subscriber.
//!
//! The terminal belongs to the TUI, so events go to `<data_dir>/calldesk.log`.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "CALLDESK_LOG";

/// File name of the log inside the data directory.
pub const LOG_FILE: &str = "calldesk.log";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("I/O error opening log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("logging already initialised: {0}")]
    Init(String),
}

/// Builds the filter: `CALLDESK_LOG` when set and valid, else `fallback`.
pub fn filter(fallback: &str) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(fallback)?),
    }
}

/// Installs the global subscriber writing to `data_dir/calldesk.log`.
#[mutants::skip]
pub fn init(data_dir: &Path, fallback_filter: &str) -> Result<(), LoggingError> {
    fs::create_dir_all(data_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter(fallback_filter)?)
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "calldesk starting");
    Ok(())
}
