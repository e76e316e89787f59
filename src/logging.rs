use crate::storage::data_dir;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "DAYCAL_LOG";

pub fn log_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("daycal.log"))
}

/// Installs the global subscriber, appending to `daycal.log` in the data dir.
/// The terminal is owned by the TUI, so nothing is written to stdout/stderr.
pub fn init() -> Result<PathBuf> {
    let path = log_path().context("No data directory available for the log file")?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;

    Ok(path)
}
