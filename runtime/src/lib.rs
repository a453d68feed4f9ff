//! # Taskflow Runtime
//!
//! Runtime implementation for the Taskflow architecture.
//!
//! This crate provides the Store runtime that owns state and runs every
//! action through the reducer, one at a time.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that owns state and serializes every action through the reducer
//! - **`StoreError`**: Why the store refused an action
//!
//! ## Example
//!
//! ```ignore
//! use taskflow_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action and look at what it changed
//! let changed = store
//!     .send_observed(Action::DoSomething, |before, after| before != after)
//!     .await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use taskflow_core::reducer::Reducer;
use tokio::sync::RwLock;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when an action is sent after
        /// [`Store::shutdown`](crate::Store::shutdown).
        #[error("Store is shutting down")]
        ShutdownInProgress,
    }
}

pub use error::StoreError;

pub mod store {
    use super::{AtomicBool, Ordering, Reducer, RwLock, StoreError};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`, so every transition is applied by a single writer)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: RwLock<S>,
        reducer: R,
        environment: E,
        shutdown: AtomicBool,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self {
                state: RwLock::new(initial_state),
                reducer,
                environment,
                shutdown: AtomicBool::new(false),
            }
        }

        /// Send an action and observe the transition it caused
        ///
        /// 1. Acquires write lock on state
        /// 2. Calls reducer with (state, action, environment)
        /// 3. Hands the state before and after to `observe`, still under the lock
        ///
        /// Concurrent calls serialize on the write lock, so the reducer always
        /// sees the state left by the previous transition and `observe` never
        /// races another sender. Use it for follow-up work such as persistence
        /// and logging.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip_all, name = "store_send")]
        pub async fn send_observed<F, T>(&self, action: A, observe: F) -> Result<T, StoreError>
        where
            S: Clone,
            F: FnOnce(&S, &S) -> T,
        {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            tracing::debug!("Processing action");
            metrics::counter!("store.commands.total").increment(1);

            let mut state = self.state.write().await;
            tracing::trace!("Acquired write lock on state");

            let before = S::clone(&state);

            {
                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                let start = std::time::Instant::now();
                self.reducer.reduce(&mut state, action, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());
            }

            Ok(observe(&before, &*state))
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.todos.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Stop accepting actions
        ///
        /// Every later [`Store::send_observed`] fails with
        /// [`StoreError::ShutdownInProgress`]. State stays readable.
        pub fn shutdown(&self) {
            if self.shutdown.swap(true, Ordering::AcqRel) {
                tracing::debug!("Shutdown already requested");
                return;
            }
            tracing::info!("Store shut down");
            metrics::counter!("store.shutdown.initiated").increment(1);
        }

        /// Returns true once [`Store::shutdown`] has been called
        #[must_use]
        pub fn is_shutting_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }
    }
}

// Re-export for convenience
pub use store::Store;
