// File: ./src/logging.rs
//! File logging for the command-line client.
use crate::context::AppContext;
use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::OpenOptions;
use std::str::FromStr;
use std::sync::OnceLock;

static LOGGER_INSTALLED: OnceLock<LevelFilter> = OnceLock::new();

/// Installs a `WriteLogger` appending to the context's log file.
///
/// `level` is always validated. Only the first valid call installs anything;
/// later calls return Ok without touching the logger.
pub fn init_logging(ctx: &dyn AppContext, level: &str) -> Result<()> {
    let filter = LevelFilter::from_str(level.trim())
        .map_err(|_| anyhow::anyhow!("Unknown log level '{}'", level))?;
    if LOGGER_INSTALLED.get().is_some() {
        return Ok(());
    }

    let path = ctx
        .get_log_file_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine log file path"))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file '{}'", path.display()))?;

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    WriteLogger::init(filter, config, file)
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;

    let _ = LOGGER_INSTALLED.set(filter);
    log::debug!("Logging to {} at level {}", path.display(), filter);
    Ok(())
}
