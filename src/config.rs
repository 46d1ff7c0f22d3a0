// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::model::Sort;
use crate::storage::LocalStorage;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Overrides the todo.txt location inside the data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todo_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_file: Option<String>,
    /// Stamp today's date on tasks added without one.
    #[serde(default = "default_true")]
    pub prepend_date: bool,
    #[serde(default)]
    pub sort: Sort,
    #[serde(default = "default_true")]
    pub show_date: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            todo_file: None,
            done_file: None,
            // Match the serde defaults
            prepend_date: true,
            sort: Sort::default(),
            show_date: true,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like `load`, but a missing file yields the defaults.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Whether `err` means the config file does not exist.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    pub fn todo_path(&self, ctx: &dyn AppContext) -> Result<PathBuf> {
        match &self.todo_file {
            Some(p) => Ok(PathBuf::from(p)),
            None => ctx.get_todo_file_path(),
        }
    }

    pub fn done_path(&self, ctx: &dyn AppContext) -> Result<PathBuf> {
        match &self.done_file {
            Some(p) => Ok(PathBuf::from(p)),
            None => ctx.get_done_file_path(),
        }
    }
}
