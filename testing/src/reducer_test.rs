//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use taskflow_core::reducer::Reducer;

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for transition assertion functions (state before, state after)
type TransitionAssertion<S> = Box<dyn FnOnce(&S, &S)>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// Several `when_action` calls dispatch their actions in order; assertions
/// run once, against the state after the last action.
///
/// # Example
///
/// ```ignore
/// use taskflow_testing::ReducerTest;
///
/// ReducerTest::new(TodoReducer::new())
///     .with_env(test_environment())
///     .given_state(TodoState::default())
///     .when_action(TodoAction::AddTodo("walk dog".to_string()))
///     .then_state(|state| {
///         assert_eq!(state.todos.len(), 1);
///     })
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    actions: Vec<A>,
    state_assertions: Vec<StateAssertion<S>>,
    transition_assertions: Vec<TransitionAssertion<S>>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
    S: Clone,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            actions: Vec::new(),
            state_assertions: Vec::new(),
            transition_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Add an action to dispatch (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.actions.push(action);
        self
    }

    /// Add several actions to dispatch in order (When)
    #[must_use]
    pub fn when_actions(mut self, actions: impl IntoIterator<Item = A>) -> Self {
        self.actions.extend(actions);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion comparing the given state with the resulting state (Then)
    #[must_use]
    pub fn then_transition<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S, &S) + 'static,
    {
        self.transition_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertions fail.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let initial = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        assert!(
            !self.actions.is_empty(),
            "At least one action must be set with when_action()"
        );

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        let mut state = initial.clone();
        for action in self.actions {
            self.reducer.reduce(&mut state, action, &env);
        }

        for assertion in self.state_assertions {
            assertion(&state);
        }

        for assertion in self.transition_assertions {
            assertion(&initial, &state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct ChecklistState {
        checked: Vec<bool>,
    }

    #[derive(Clone, Debug)]
    enum ChecklistAction {
        Push,
        Flip(usize),
    }

    struct ChecklistReducer;

    struct TestEnv;

    impl Reducer for ChecklistReducer {
        type State = ChecklistState;
        type Action = ChecklistAction;
        type Environment = TestEnv;

        fn reduce(&self, state: &mut Self::State, action: Self::Action, _env: &Self::Environment) {
            match action {
                ChecklistAction::Push => state.checked.push(false),
                ChecklistAction::Flip(index) => {
                    if let Some(item) = state.checked.get_mut(index) {
                        *item = !*item;
                    }
                },
            }
        }
    }

    #[test]
    fn test_single_action() {
        ReducerTest::new(ChecklistReducer)
            .with_env(TestEnv)
            .given_state(ChecklistState { checked: vec![] })
            .when_action(ChecklistAction::Push)
            .then_state(|state| {
                assert_eq!(state.checked, vec![false]);
            })
            .run();
    }

    #[test]
    fn test_action_sequence_and_transition() {
        ReducerTest::new(ChecklistReducer)
            .with_env(TestEnv)
            .given_state(ChecklistState {
                checked: vec![false, true],
            })
            .when_actions([ChecklistAction::Flip(0), ChecklistAction::Flip(0)])
            .then_transition(|before, after| {
                assert_eq!(before, after);
            })
            .run();
    }

    #[test]
    fn test_assertions_see_the_final_state() {
        ReducerTest::new(ChecklistReducer)
            .with_env(TestEnv)
            .given_state(ChecklistState { checked: vec![] })
            .when_actions([ChecklistAction::Push, ChecklistAction::Push, ChecklistAction::Flip(1)])
            .then_state(|state| assert_eq!(state.checked, vec![false, true]))
            .then_transition(|before, after| {
                assert!(before.checked.is_empty());
                assert_eq!(after.checked.len(), 2);
            })
            .run();
    }

    #[test]
    #[should_panic(expected = "At least one action")]
    fn test_run_requires_an_action() {
        ReducerTest::new(ChecklistReducer)
            .with_env(TestEnv)
            .given_state(ChecklistState { checked: vec![] })
            .run();
    }
}
