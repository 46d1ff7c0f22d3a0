// File: ./src/context.rs
/*! Application context abstraction for filesystem paths.

`AppContext` decides where todo.txt, done.txt, the config file and the log
file live. `StandardContext` uses `directories::ProjectDirs` (or an override
root from `--root`); `TestContext` uses a temporary directory that is removed
on drop.

Code that touches the filesystem takes a `&dyn AppContext` explicitly; there
is no global path state.
*/

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

pub const TODO_FILENAME: &str = "todo.txt";
pub const DONE_FILENAME: &str = "done.txt";
pub const LOG_FILENAME: &str = "todotxt.log";

/// Defines the file system context for the application.
pub trait AppContext: Send + Sync + std::fmt::Debug {
    fn get_data_dir(&self) -> Result<PathBuf>;
    fn get_config_dir(&self) -> Result<PathBuf>;
    fn get_cache_dir(&self) -> Result<PathBuf>;

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join("config.toml"))
    }

    fn get_todo_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_data_dir()?.join(TODO_FILENAME))
    }

    fn get_done_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_data_dir()?.join(DONE_FILENAME))
    }

    fn get_log_file_path(&self) -> Option<PathBuf> {
        self.get_cache_dir().ok().map(|p| p.join(LOG_FILENAME))
    }
}

// --- Production Implementation ---

#[derive(Clone, Debug)]
pub struct StandardContext {
    override_root: Option<PathBuf>,
}

impl StandardContext {
    /// When `override_root` is `Some(path)`, everything lives under
    /// `path/data`, `path/config` and `path/cache`.
    pub fn new(override_root: Option<PathBuf>) -> Self {
        Self { override_root }
    }

    fn ensure_exists(path: PathBuf) -> Result<PathBuf> {
        if !path.exists() {
            std::fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(path)
    }

    fn get_proj_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "todotxt", "todotxt")
    }

    fn resolve(&self, subdir: &str) -> Result<PathBuf> {
        if let Some(root) = &self.override_root {
            return Self::ensure_exists(root.join(subdir));
        }
        let proj = Self::get_proj_dirs().ok_or_else(|| anyhow::anyhow!("No home directory"))?;
        let dir = match subdir {
            "data" => proj.data_dir(),
            "config" => proj.config_dir(),
            _ => proj.cache_dir(),
        };
        Self::ensure_exists(dir.to_path_buf())
    }
}

impl AppContext for StandardContext {
    fn get_data_dir(&self) -> Result<PathBuf> {
        self.resolve("data")
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        self.resolve("config")
    }

    fn get_cache_dir(&self) -> Result<PathBuf> {
        self.resolve("cache")
    }
}

// --- Test Implementation ---

/// Throwaway context rooted in a unique temp dir, removed on drop.
#[derive(Clone, Debug)]
pub struct TestContext {
    pub root: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let root = std::env::temp_dir().join(format!("todotxt_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&root).expect("failed to create TestContext temp dir");
        Self { root }
    }

    fn subdir(&self, name: &str) -> Result<PathBuf> {
        let p = self.root.join(name);
        std::fs::create_dir_all(&p)
            .with_context(|| format!("Failed to create directory: {:?}", p))?;
        Ok(p)
    }

    /// Writes `content` verbatim as this context's todo.txt and returns its path.
    pub fn seed_todo(&self, content: &str) -> Result<PathBuf> {
        let path = self.get_todo_file_path()?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to seed '{}'", path.display()))?;
        Ok(path)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext for TestContext {
    fn get_data_dir(&self) -> Result<PathBuf> {
        self.subdir("data")
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        self.subdir("config")
    }

    fn get_cache_dir(&self) -> Result<PathBuf> {
        self.subdir("cache")
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}
