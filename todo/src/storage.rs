//! File-backed key-value storage.
//!
//! Each key maps to one file under a root directory. Writes go to a hidden
//! temporary file that is synced and then renamed over the target, so a
//! crash mid-write leaves either the old value or the new one.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use taskflow_core::storage::{KeyValueStore, Result, validate_key};
use tokio::io::AsyncWriteExt;

/// Key-value store keeping one file per key in a directory
#[derive(Clone, Debug)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `root`. The directory is created on first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the stored files
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }

    // Keys never start with '.', so this cannot shadow a real key
    fn temp_path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!(".{key}.tmp"))
    }
}

impl KeyValueStore for FileKeyValueStore {
    async fn save(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;
        let temp = self.temp_path_for(key);

        tokio::fs::create_dir_all(&self.root).await?;

        let mut file = tokio::fs::File::create(&temp).await?;
        file.write_all(data).await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&temp, &path).await?;

        tracing::debug!(key, bytes = data.len(), path = %path.display(), "Saved value");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;

        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(key, "Deleted value");
                Ok(())
            },
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
