// File: ./src/storage.rs
// Reads and writes todo.txt / done.txt files.
use crate::model::Task;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use fs2::FileExt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct LocalStorage;

impl LocalStorage {
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut name = file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".lock");
        file_path.with_file_name(name)
    }

    /// Runs `f` while holding an exclusive advisory lock next to `file_path`.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        if let Some(parent) = file_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Raw lines of a todo file. A missing file reads as empty. Line endings
    /// (`\n` or `\r\n`) are stripped; blank lines are skipped.
    pub fn load_lines(path: &Path) -> Result<Vec<String>> {
        if !path.exists() {
            return Ok(vec![]);
        }
        Self::with_lock(path, || {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read '{}'", path.display()))?;
            Ok(split_lines(&content))
        })
    }

    /// Replaces the file with one canonical line per task.
    pub fn save<'a, I>(path: &Path, tasks: I, today: NaiveDate) -> Result<()>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let body = render(tasks, today);
        Self::with_lock(path, || {
            Self::atomic_write(path, &body)
                .with_context(|| format!("Failed to write '{}'", path.display()))
        })?;
        log::debug!("Saved {}", path.display());
        Ok(())
    }

    /// Appends canonical lines to the end of the file, creating it if needed.
    pub fn append<'a, I>(path: &Path, tasks: I, today: NaiveDate) -> Result<()>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let body = render(tasks, today);
        if body.is_empty() {
            return Ok(());
        }
        Self::with_lock(path, || {
            let needs_newline = fs::read(path)
                .map(|bytes| bytes.last().is_some_and(|b| *b != b'\n'))
                .unwrap_or(false);
            let mut file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open '{}'", path.display()))?;
            if needs_newline {
                file.write_all(b"\n")?;
            }
            file.write_all(body.as_bytes())?;
            Ok(())
        })
    }
}

fn split_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn render<'a, I>(tasks: I, today: NaiveDate) -> String
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut out = String::new();
    for task in tasks {
        out.push_str(&task.in_file_format(today));
        out.push('\n');
    }
    out
}
