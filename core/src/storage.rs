//! Key-value storage for persisted application state.
//!
//! The reducer never touches storage. Callers load a value once at startup
//! and write it back after each transition, through a [`KeyValueStore`].
//!
//! # Implementations
//!
//! - `FileKeyValueStore` (in the `todo` crate): one file per key on local disk
//! - `InMemoryKeyValueStore` (in `taskflow-testing`): fast, deterministic testing
//!
//! # Example
//!
//! ```ignore
//! store.save("todos", br#"[{"id":1,"text":"buy milk","completed":false}]"#).await?;
//! let data = store.get("todos").await?;
//! assert!(data.is_some());
//! ```

use std::future::Future;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The underlying medium failed (disk, permissions, ...)
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be used by this backend
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Backend-specific failure
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A durable slot-per-key store, the local equivalent of a browser's
/// key-value storage.
///
/// Values are opaque bytes. Serialization is the caller's concern.
pub trait KeyValueStore: Send + Sync {
    /// Save data under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write fails.
    fn save(&self, key: &str, data: &[u8]) -> impl Future<Output = Result<()>> + Send;

    /// Get the data stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Some(data)` if found
    /// - `None` if nothing was ever stored
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the read fails.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send;

    /// Delete the data stored under `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the delete fails.
    fn delete(&self, key: &str) -> impl Future<Output = Result<()>> + Send;

    /// Check if data exists under `key`.
    ///
    /// Default implementation uses [`KeyValueStore::get`].
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the check fails.
    fn exists(&self, key: &str) -> impl Future<Output = Result<bool>> + Send {
        async move { Ok(self.get(key).await?.is_some()) }
    }
}

/// Validates a storage key.
///
/// Keys must be non-empty and limited to ASCII alphanumerics, `-`, `_` and `.`
/// (not starting with `.`), so every backend can map them to a file name or
/// column value without escaping.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] if the key is rejected.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
