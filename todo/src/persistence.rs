//! Loading and saving the todo list.
//!
//! The list is stored as a JSON array of `{id, text, completed}` records
//! under a single key. Only the tasks are persisted; the filter always
//! starts at [`FilterMode::All`](crate::types::FilterMode::All).

use crate::error::Result;
use crate::types::TodoItem;
use std::collections::HashSet;
use taskflow_core::storage::KeyValueStore;

/// Key the list is stored under unless configured otherwise
pub const STORAGE_KEY: &str = "todos";

/// Reads and writes the todo list through a [`KeyValueStore`]
#[derive(Clone, Debug)]
pub struct TodoRepository<K> {
    store: K,
    key: String,
}

impl<K: KeyValueStore> TodoRepository<K> {
    /// Creates a repository using [`STORAGE_KEY`]
    #[must_use]
    pub fn new(store: K) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    /// Creates a repository storing the list under `key`
    #[must_use]
    pub fn with_key(store: K, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Key the list is stored under
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying store
    #[must_use]
    pub const fn store(&self) -> &K {
        &self.store
    }

    /// Loads the persisted list.
    ///
    /// Absent data yields an empty list. So does data that is not a valid
    /// list of records; that case is logged and the stored value is left
    /// untouched until the next save overwrites it. If records repeat an id,
    /// only the first record with that id is kept.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Storage`](crate::error::TodoError::Storage) if the
    /// store itself cannot be read.
    pub async fn load(&self) -> Result<Vec<TodoItem>> {
        let Some(bytes) = self.store.get(&self.key).await? else {
            tracing::debug!(key = %self.key, "No persisted todos, starting empty");
            return Ok(Vec::new());
        };

        let todos: Vec<TodoItem> = match serde_json::from_slice(&bytes) {
            Ok(todos) => todos,
            Err(error) => {
                tracing::warn!(
                    key = %self.key,
                    error = %error,
                    "Persisted todos are malformed, starting empty"
                );
                return Ok(Vec::new());
            },
        };

        let loaded = todos.len();
        let mut seen = HashSet::with_capacity(loaded);
        let todos: Vec<TodoItem> = todos.into_iter().filter(|todo| seen.insert(todo.id)).collect();

        if todos.len() < loaded {
            tracing::warn!(
                key = %self.key,
                dropped = loaded - todos.len(),
                "Persisted todos repeat ids, keeping the first of each"
            );
        }

        tracing::info!(key = %self.key, count = todos.len(), "Loaded todos");
        Ok(todos)
    }

    /// Replaces the persisted list with `todos`.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Serialization`](crate::error::TodoError::Serialization)
    /// if encoding fails, or [`TodoError::Storage`](crate::error::TodoError::Storage)
    /// if the write fails.
    pub async fn save(&self, todos: &[TodoItem]) -> Result<()> {
        let bytes = serde_json::to_vec(todos)?;
        self.store.save(&self.key, &bytes).await?;
        tracing::debug!(key = %self.key, count = todos.len(), "Persisted todos");
        Ok(())
    }

    /// Removes the persisted list
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Storage`](crate::error::TodoError::Storage) if the
    /// delete fails.
    pub async fn clear(&self) -> Result<()> {
        self.store.delete(&self.key).await?;
        Ok(())
    }
}
