//! Filesystem storage backend.
//!
//! Stores files under a base directory; record paths are relative to
//! that root. The maintenance service only needs `exists` and `delete`,
//! plus a startup round-trip check to catch permission and mount
//! problems early.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use olives_core::{Error, Result, StorageBackend};

/// Filesystem implementation of [`StorageBackend`].
pub struct FilesystemBackend {
    base_path: PathBuf,
}

impl FilesystemBackend {
    /// Create a new filesystem backend rooted at the given directory.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }

    /// Validate that the backend can write, read, and delete files.
    ///
    /// Performs a full round-trip at startup so filesystem issues
    /// surface before the first maintenance pass runs.
    pub async fn validate(&self) -> Result<()> {
        let test_dir = self.base_path.join(".health-check");
        let test_file = test_dir.join("probe.bin");
        let data = b"storage-health-check";

        fs::create_dir_all(&test_dir)
            .await
            .map_err(|e| Error::Storage(format!("create_dir_all({test_dir:?}): {e}")))?;
        fs::write(&test_file, data)
            .await
            .map_err(|e| Error::Storage(format!("write({test_file:?}): {e}")))?;
        let read_back = fs::read(&test_file)
            .await
            .map_err(|e| Error::Storage(format!("read({test_file:?}): {e}")))?;
        if read_back != data {
            return Err(Error::Storage("read-back mismatch".into()));
        }
        fs::remove_file(&test_file)
            .await
            .map_err(|e| Error::Storage(format!("remove_file({test_file:?}): {e}")))?;

        debug!(
            subsystem = "database",
            component = "storage",
            op = "validate",
            base_path = %self.base_path.display(),
            "Storage backend round-trip check passed"
        );
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for FilesystemBackend {
    async fn exists(&self, path: &str) -> Result<bool> {
        match fs::metadata(self.full_path(path)).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::Io(e)),
        }
    }

    async fn delete(&self, path: &str) -> Result<()> {
        fs::remove_file(self.full_path(path))
            .await
            .map_err(Error::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_exists_and_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FilesystemBackend::new(dir.path());

        std::fs::write(dir.path().join("junk.bin"), b"x").unwrap();
        assert!(backend.exists("junk.bin").await.unwrap());

        backend.delete("junk.bin").await.unwrap();
        assert!(!backend.exists("junk.bin").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FilesystemBackend::new(dir.path());
        assert!(backend.delete("absent.bin").await.is_err());
    }

    #[tokio::test]
    async fn test_validate_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FilesystemBackend::new(dir.path());
        backend.validate().await.unwrap();
    }
}
