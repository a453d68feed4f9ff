//! Reducer logic for the todo list.
//!
//! Every action is a plain state transition. Actions that name a task which
//! is not in the list, and actions the reducer does not understand, leave the
//! state as it was. Persistence and logging are the caller's job (see
//! [`crate::app::TodoApp`]).

use crate::types::{TaskId, TodoAction, TodoItem, TodoState};
use std::sync::Arc;
use taskflow_core::{environment::Clock, reducer::Reducer};

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock used to mint task ids
    pub clock: Arc<dyn Clock>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

/// Reducer for the todo list
#[derive(Clone, Debug)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Picks the id for a task added now.
    ///
    /// The id is the clock reading in milliseconds, bumped past the largest
    /// live id so two adds within the same millisecond never collide.
    ///
    /// When the largest live id is `u64::MAX` there is nothing above it, so
    /// the search walks down from the candidate to the first free id.
    fn next_id(state: &TodoState, env: &TodoEnvironment) -> TaskId {
        let millis = u64::try_from(env.clock.now().timestamp_millis()).unwrap_or(0);
        let mut candidate = match state.max_id() {
            Some(max) => max
                .get()
                .checked_add(1)
                .map_or(millis, |floor| millis.max(floor)),
            None => millis,
        };

        // Terminates: the list holds far fewer than 2^64 ids
        while state.exists(TaskId::new(candidate)) {
            candidate = candidate.wrapping_sub(1);
        }
        TaskId::new(candidate)
    }

    fn find_mut(state: &mut TodoState, id: TaskId) -> Option<&mut TodoItem> {
        state.todos.iter_mut().find(|todo| todo.id == id)
    }
}

impl Default for TodoReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(&self, state: &mut Self::State, action: Self::Action, env: &Self::Environment) {
        match action {
            TodoAction::AddTodo(text) => {
                let id = Self::next_id(state, env);
                state.todos.push(TodoItem::new(id, text));
            },

            TodoAction::ToggleTodo(id) => {
                if let Some(todo) = Self::find_mut(state, id) {
                    todo.completed = !todo.completed;
                }
            },

            TodoAction::DeleteTodo(id) => {
                state.todos.retain(|todo| todo.id != id);
            },

            TodoAction::ClearComplete => {
                state.todos.retain(|todo| !todo.completed);
            },

            TodoAction::EditTodo { id, text } => {
                if let Some(todo) = Self::find_mut(state, id) {
                    todo.text = text;
                }
            },

            TodoAction::SetFilter(filter) => {
                state.filter = filter;
            },

            TodoAction::CheckAll => {
                // Computed once, before any task is touched
                let all_completed = state.todos.iter().all(|todo| todo.completed);
                for todo in &mut state.todos {
                    todo.completed = !all_completed;
                }
            },

            TodoAction::Unrecognized => {},
        }
    }
}

/// Applies `action` to a copy of `state` and returns the result.
///
/// The input state is never modified. Equivalent to running
/// [`TodoReducer`] on a clone.
#[must_use]
pub fn reduce(state: &TodoState, action: TodoAction, env: &TodoEnvironment) -> TodoState {
    let mut next = state.clone();
    TodoReducer::new().reduce(&mut next, action, env);
    next
}
