//! The todo application: reducer, store, persistence and logging wired together.
//!
//! [`TodoApp`] owns the only [`Store`] for the list. Each dispatched action
//! is applied under the store's write lock; afterwards the transition hook
//! runs and, if the task list changed, the list is written back to storage.
//! Filter changes and no-op actions never touch storage.

use crate::config::Config;
use crate::error::Result;
use crate::filter::TodoView;
use crate::hook::{TracingHook, Transition, TransitionHook};
use crate::persistence::TodoRepository;
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::storage::FileKeyValueStore;
use crate::types::{TodoAction, TodoState};
use std::sync::Arc;
use taskflow_core::environment::SystemClock;
use taskflow_core::storage::KeyValueStore;
use taskflow_runtime::Store;

/// Store type driving the todo list
pub type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// A loaded todo list that persists itself after every change
pub struct TodoApp<K, H = TracingHook> {
    store: TodoStore,
    repository: TodoRepository<K>,
    hook: H,
}

impl TodoApp<FileKeyValueStore, TracingHook> {
    /// Opens the list stored under `config.data_dir`, using the system clock
    /// and structured logging.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Storage`](crate::error::TodoError::Storage) if the
    /// stored list cannot be read.
    pub async fn open(config: &Config) -> Result<Self> {
        tracing::info!(
            data_dir = %config.data_dir.display(),
            key = %config.storage_key,
            "Opening todo list"
        );

        let repository = TodoRepository::with_key(
            FileKeyValueStore::new(config.data_dir.clone()),
            config.storage_key.clone(),
        );
        let environment = TodoEnvironment::new(Arc::new(SystemClock));

        Self::load(repository, environment, TracingHook).await
    }
}

impl<K, H> TodoApp<K, H>
where
    K: KeyValueStore,
    H: TransitionHook,
{
    /// Loads the persisted list and builds the store around it.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Storage`](crate::error::TodoError::Storage) if the
    /// store cannot be read. Malformed data is not an error; it loads as an
    /// empty list.
    pub async fn load(
        repository: TodoRepository<K>,
        environment: TodoEnvironment,
        hook: H,
    ) -> Result<Self> {
        let todos = repository.load().await?;
        let store = Store::new(TodoState::with_todos(todos), TodoReducer::new(), environment);

        Ok(Self {
            store,
            repository,
            hook,
        })
    }

    /// Applies `action`, persists the list if it changed, and returns the new view.
    ///
    /// Takes `&mut self` so only one dispatch, and therefore one write to
    /// storage, is in flight at a time.
    ///
    /// # Errors
    ///
    /// - [`TodoError::Store`](crate::error::TodoError::Store) if the app is shutting down
    /// - [`TodoError::Storage`](crate::error::TodoError::Storage) or
    ///   [`TodoError::Serialization`](crate::error::TodoError::Serialization)
    ///   if persisting fails. The in-memory transition has already happened
    ///   in that case; the next successful save catches storage up.
    #[tracing::instrument(skip_all, fields(action = action.action_type()))]
    pub async fn dispatch(&mut self, action: TodoAction) -> Result<TodoView> {
        let action_type = action.action_type();
        let hook = &self.hook;

        let (changed, view) = self
            .store
            .send_observed(action, |before, after| {
                let transition = Transition {
                    action_type,
                    before,
                    after,
                };
                hook.on_transition(&transition);

                let changed = transition.todos_changed().then(|| after.todos.clone());
                (changed, TodoView::from_state(after))
            })
            .await?;

        if let Some(todos) = changed {
            if let Err(error) = self.repository.save(&todos).await {
                tracing::error!(action = action_type, error = %error, "Failed to persist todos");
                return Err(error);
            }
        }

        Ok(view)
    }

    /// Dispatches each action in order, stopping at the first error
    ///
    /// # Errors
    ///
    /// Same as [`TodoApp::dispatch`].
    pub async fn dispatch_all(
        &mut self,
        actions: impl IntoIterator<Item = TodoAction>,
    ) -> Result<TodoView> {
        for action in actions {
            self.dispatch(action).await?;
        }
        Ok(self.view().await)
    }

    /// Current view of the list
    pub async fn view(&self) -> TodoView {
        self.store.state(TodoView::from_state).await
    }

    /// Snapshot of the full state
    pub async fn state(&self) -> TodoState {
        self.store.state(TodoState::clone).await
    }

    /// Repository the list is persisted through
    #[must_use]
    pub const fn repository(&self) -> &TodoRepository<K> {
        &self.repository
    }

    /// Stops accepting actions
    ///
    /// Every save happens inside [`TodoApp::dispatch`], so nothing is left
    /// to flush. Later dispatches fail with
    /// [`TodoError::Store`](crate::error::TodoError::Store).
    pub fn shutdown(&self) {
        self.store.shutdown();
    }
}
