//! src/logging.rs
//!
//! Tracing setup. The terminal is in raw mode while the dashboard runs, so
//! log output goes to a file instead of stderr.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// Environment variable holding the filter directive (e.g. `debug`).
pub const LOG_ENV: &str = "DASHBOARD_LOG";

/// Install the global subscriber writing to `path`. `None` leaves logging off.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}
