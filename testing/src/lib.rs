//! # Taskflow Testing
//!
//! Testing utilities and helpers for the Taskflow architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - An in-memory key-value store for persistence tests
//! - A Given-When-Then harness for reducers
//!
//! ## Example
//!
//! ```ignore
//! use taskflow_testing::{test_clock, ReducerTest};
//!
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(TodoEnvironment::new(Arc::new(test_clock())))
//!     .given_state(TodoState::default())
//!     .when_action(TodoAction::AddTodo("buy milk".to_string()))
//!     .then_state(|state| assert_eq!(state.todos.len(), 1))
//!     .run();
//! ```

use chrono::{DateTime, Duration, Utc};
use taskflow_core::environment::Clock;

/// Ergonomic Given-When-Then testing for reducers
pub mod reducer_test;

/// In-memory storage backends
pub mod storage_mocks;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Duration, Utc};
    use std::sync::Mutex;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use taskflow_testing::mocks::FixedClock;
    /// use taskflow_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that advances by a fixed step on every reading
    ///
    /// Useful for exercising code that derives identifiers from timestamps.
    #[derive(Debug)]
    pub struct SteppingClock {
        next: Mutex<DateTime<Utc>>,
        step: Duration,
    }

    impl SteppingClock {
        /// Create a clock starting at `start` that moves `step` per reading
        #[must_use]
        pub const fn new(start: DateTime<Utc>, step: Duration) -> Self {
            Self {
                next: Mutex::new(start),
                step,
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let mut next = self
                .next
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            let now = *next;
            *next = now + self.step;
            now
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::UNIX_EPOCH + Duration::days(20_089))
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, SteppingClock, test_clock};
pub use reducer_test::ReducerTest;
pub use storage_mocks::InMemoryKeyValueStore;
