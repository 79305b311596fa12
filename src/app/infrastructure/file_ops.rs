use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use super::error::Result;

/// Reads and writes whole documents.
pub trait FileOperations {
    fn read(&self, path: &Path) -> Result<String>;

    /// Write `content` to `path`, truncating it. Fails with NotFound when the
    /// file is missing and `create_if_missing` is false.
    fn write(&self, path: &Path, content: &str, create_if_missing: bool) -> Result<()>;
}

/// `FileOperations` on the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsFileOperations;

impl FileOperations for FsFileOperations {
    fn read(&self, path: &Path) -> Result<String> {
        tracing::trace!("Reading {}", path.display());
        let content = fs::read_to_string(path)?;
        tracing::debug!("Read {} bytes from {}", content.len(), path.display());
        Ok(content)
    }

    fn write(&self, path: &Path, content: &str, create_if_missing: bool) -> Result<()> {
        tracing::trace!("Writing {}", path.display());
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(create_if_missing)
            .open(path)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }
}

/// Replace `path` with `content` through a temporary file in the same
/// directory. On failure the previous file is left as it was.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::infrastructure::error::AppError;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_replaces_and_leaves_no_temp_files() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sub").join("state");
        write_atomic(&path, b"one").unwrap();
        write_atomic(&path, b"two").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "two");
        let entries = fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_write_then_read() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test-write.txt");
        FsFileOperations.write(&path, "Hello World!", true).unwrap();
        assert_eq!(FsFileOperations.read(&path).unwrap(), "Hello World!");
    }

    #[test]
    fn test_write_truncates_previous_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doc.txt");
        fs::write(&path, "a much longer previous body").unwrap();
        FsFileOperations.write(&path, "short", false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "short");
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = FsFileOperations
            .read(&tmp.path().join("non-existing-file.txt"))
            .unwrap_err();
        match err {
            AppError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn test_write_without_create_requires_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing.txt");
        let err = FsFileOperations.write(&path, "x", false).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
        assert!(!path.exists());
    }
}
