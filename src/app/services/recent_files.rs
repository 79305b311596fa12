//! Most-recently-used file history.
//!
//! The backing file is the only copy of the list: every mutation reads it,
//! edits the list and swaps a fresh file into place, so a failed write leaves
//! the previous history on disk intact. One absolute path per line, UTF-8,
//! no escaping; paths containing line breaks are rejected.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::app::infrastructure::error::{AppError, Result};
use crate::app::infrastructure::file_ops::write_atomic;
use crate::app::infrastructure::paths::create_dir_if_missing;

pub const DEFAULT_CAPACITY: usize = 10;

type WriteFn = fn(&Path, &[u8]) -> Result<()>;

#[derive(Debug, Clone)]
pub struct RecentFiles {
    file: PathBuf,
    capacity: usize,
    write: WriteFn,
}

impl RecentFiles {
    pub fn new(dir: impl Into<PathBuf>, file_name: &str, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(AppError::invalid("recent files capacity must be at least 1"));
        }
        if file_name.is_empty() {
            return Err(AppError::invalid("recent files file name must not be empty"));
        }
        let file = dir.into().join(file_name);
        tracing::debug!(
            "Recent files stored in {} (capacity {})",
            file.display(),
            capacity
        );
        Ok(Self {
            file,
            capacity,
            write: write_atomic,
        })
    }

    pub fn path(&self) -> &Path {
        &self.file
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries, most recent first. Creates an empty backing file if there is none.
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        let contents = match fs::read_to_string(&self.file) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                if let Some(dir) = self.file.parent() {
                    create_dir_if_missing(dir)?;
                }
                fs::write(&self.file, "")?;
                tracing::info!("Created empty recent files list at {}", self.file.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for line in contents.lines() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            match normalize(Path::new(line)) {
                Ok(path) if seen.insert(path.clone()) => entries.push(path),
                Ok(_) => {}
                Err(e) => tracing::warn!("Skipping recent file entry {:?}: {}", line, e),
            }
            if entries.len() == self.capacity {
                break;
            }
        }
        Ok(entries)
    }

    pub fn contains(&self, path: &Path) -> Result<bool> {
        let path = normalize(path)?;
        Ok(self.list()?.contains(&path))
    }

    /// Move `path` to the front, dropping the oldest entry past capacity.
    pub fn add(&mut self, path: &Path) -> Result<()> {
        let path = normalize(path)?;
        let mut entries = self.list()?;
        entries.retain(|p| p != &path);
        entries.insert(0, path.clone());
        entries.truncate(self.capacity);
        self.save(&entries)?;
        tracing::info!("Added recent file {}", path.display());
        Ok(())
    }

    /// Remove `path` if present. Absent entries are not an error.
    pub fn remove(&mut self, path: &Path) -> Result<()> {
        let path = normalize(path)?;
        let mut entries = self.list()?;
        let before = entries.len();
        entries.retain(|p| p != &path);
        if entries.len() == before {
            tracing::debug!("{} not in recent files, nothing to remove", path.display());
            return Ok(());
        }
        self.save(&entries)?;
        tracing::info!("Removed recent file {}", path.display());
        Ok(())
    }

    /// Delete the backing file; the next `list` starts over empty.
    pub fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.file) {
            Ok(()) => {
                tracing::info!("Cleared recent files");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, entries: &[PathBuf]) -> Result<()> {
        let mut contents = String::new();
        for entry in entries {
            // normalize() guarantees UTF-8 without line breaks
            contents.push_str(&entry.to_string_lossy());
            contents.push('\n');
        }
        (self.write)(&self.file, contents.as_bytes()).inspect_err(|e| {
            tracing::error!("Failed to write recent files {}: {}", self.file.display(), e);
        })
    }
}

/// Absolute, lexically normalized form of `path` used for history equality.
/// `.` components are dropped and `..` pops the previous component; symlinks
/// are left alone since the file may no longer exist.
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let Some(text) = path.to_str() else {
        return Err(AppError::invalid(format!(
            "path is not valid UTF-8: {}",
            path.display()
        )));
    };
    if text.is_empty() {
        return Err(AppError::invalid("path must not be empty"));
    }
    if text.contains(['\n', '\r']) {
        return Err(AppError::invalid(format!(
            "path contains a line break: {text:?}"
        )));
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}
