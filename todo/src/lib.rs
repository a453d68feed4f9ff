//! A persistent todo list built on the Taskflow reducer architecture.
//!
//! The list is driven by a pure reducer over [`TodoState`]:
//!
//! - Add, toggle, edit and delete tasks
//! - Clear completed tasks, or complete (and reopen) everything at once
//! - Filter the view to all, active or completed tasks
//!
//! Around the reducer, [`TodoApp`] loads the list from a key-value store,
//! persists it after every change and reports each transition to a
//! [`TransitionHook`]. The `todo` binary exposes all of it on the command
//! line.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskflow_core::environment::SystemClock;
//! use todo::{FileKeyValueStore, NoopHook, TodoAction, TodoApp, TodoEnvironment, TodoRepository};
//!
//! # async fn example() -> Result<(), todo::TodoError> {
//! let repository = TodoRepository::new(FileKeyValueStore::new(".taskflow"));
//! let environment = TodoEnvironment::new(Arc::new(SystemClock));
//! let mut app = TodoApp::load(repository, environment, NoopHook).await?;
//!
//! let view = app.dispatch(TodoAction::AddTodo("Buy milk".to_string())).await?;
//! println!("{} item(s) left", view.items_left);
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod hook;
pub mod persistence;
pub mod reducer;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use app::TodoApp;
pub use config::Config;
pub use error::TodoError;
pub use filter::{TodoView, visible};
pub use hook::{NoopHook, TracingHook, Transition, TransitionHook};
pub use persistence::{STORAGE_KEY, TodoRepository};
pub use reducer::{TodoEnvironment, TodoReducer, reduce};
pub use storage::FileKeyValueStore;
pub use types::{FilterMode, TaskId, TodoAction, TodoItem, TodoState};
