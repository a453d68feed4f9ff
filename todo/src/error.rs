//! Error types for the todo application.

use taskflow_core::storage::StorageError;
use taskflow_runtime::StoreError;
use thiserror::Error;

/// Errors surfaced by the todo application
#[derive(Error, Debug)]
pub enum TodoError {
    /// Reading or writing the persisted list failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The store refused the action
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The list could not be encoded, or an action could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Terminal input or output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A shell line or command argument could not be understood
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

/// Result type for todo operations
pub type Result<T> = std::result::Result<T, TodoError>;
