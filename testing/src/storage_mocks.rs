//! In-memory key-value storage for tests
//!
//! [`InMemoryKeyValueStore`] stands in for the on-disk store so persistence
//! round trips can be asserted without touching the file system. It can also
//! be told to fail, to exercise error paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use taskflow_core::storage::{KeyValueStore, Result, StorageError, validate_key};

/// In-memory key-value store for fast, deterministic testing.
///
/// Clones share the same underlying map, so a test can keep one handle for
/// inspection while the code under test owns another.
///
/// # Example
///
/// ```
/// use taskflow_testing::InMemoryKeyValueStore;
/// use taskflow_core::storage::KeyValueStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryKeyValueStore::new();
/// store.save("todos", b"[]").await?;
/// assert_eq!(store.get("todos").await?, Some(b"[]".to_vec()));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryKeyValueStore {
    data: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    writes: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl InMemoryKeyValueStore {
    /// Create a new empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with `data` under `key`
    #[must_use]
    pub fn with_entry(key: &str, data: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        store
            .data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), data.into());
        store
    }

    /// Make every subsequent operation fail with a backend error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of successful `save` calls so far
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw bytes stored under `key`, bypassing failure injection
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Clear all data (for test isolation)
    pub fn clear(&self) {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn check(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("injected failure".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    async fn save(&self, key: &str, data: &[u8]) -> Result<()> {
        self.check(key)?;
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), data.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.check(key)?;
        Ok(self.raw(key))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.check(key)?;
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
