use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::error::Result;

const APP_DIR: &str = "scribepad";

pub const CONFIG_FILE: &str = "config.json";
pub const PREFERENCES_FILE: &str = "preferences.json";
pub const RECENT_FILES_FILE: &str = "recent_files";

/// Where ScribePad keeps its files on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub cache_dir: PathBuf,
}

impl AppPaths {
    /// Platform directories: config_dir/scribepad and cache_dir/scribepad
    pub fn platform() -> Self {
        let mut config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.push(APP_DIR);
        let mut cache_dir = dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."));
        cache_dir.push(APP_DIR);
        Self {
            config_dir,
            cache_dir,
        }
    }

    /// Everything below a single root, e.g. a portable install or a test directory.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            config_dir: root.join("config"),
            cache_dir: root.join("cache"),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    pub fn preferences_file(&self) -> PathBuf {
        self.config_dir.join(PREFERENCES_FILE)
    }

    /// Create both directories if they don't exist yet.
    pub fn ensure_dirs(&self) -> Result<()> {
        create_dir_if_missing(&self.config_dir)?;
        create_dir_if_missing(&self.cache_dir)?;
        Ok(())
    }
}

pub fn create_dir_if_missing(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).inspect_err(|e| {
            tracing::error!("Failed to create directory {}: {}", path.display(), e);
        })?;
        tracing::info!("Created directory: {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_under_root_layout() {
        let paths = AppPaths::under("/tmp/pad");
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/pad/config/config.json"));
        assert_eq!(
            paths.preferences_file(),
            PathBuf::from("/tmp/pad/config/preferences.json")
        );
        assert_eq!(paths.cache_dir, PathBuf::from("/tmp/pad/cache"));
    }

    #[test]
    fn test_platform_paths_end_with_app_dir() {
        let paths = AppPaths::platform();
        assert!(paths.config_dir.ends_with(APP_DIR));
        assert!(paths.cache_dir.ends_with(APP_DIR));
    }

    #[test]
    fn test_ensure_dirs_creates_and_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let paths = AppPaths::under(tmp.path().join("nested"));
        paths.ensure_dirs().unwrap();
        assert!(paths.config_dir.is_dir());
        assert!(paths.cache_dir.is_dir());
        paths.ensure_dirs().unwrap();
    }
}
