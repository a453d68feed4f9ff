//! Derived views over the todo list.
//!
//! Nothing here is stored; every value is computed from [`TodoState`] on
//! demand.

use crate::types::{FilterMode, TodoItem, TodoState};
use serde::Serialize;

/// Tasks shown under `filter`, in list order.
///
/// The returned iterator borrows `todos` and yields matching items lazily.
pub fn visible(todos: &[TodoItem], filter: FilterMode) -> impl Iterator<Item = &TodoItem> + '_ {
    todos.iter().filter(move |todo| filter.matches(todo))
}

/// Number of tasks not yet completed ("items left")
#[must_use]
pub fn items_left(todos: &[TodoItem]) -> usize {
    todos.iter().filter(|todo| !todo.completed).count()
}

/// True if at least one task is completed, i.e. "clear completed" has work to do
#[must_use]
pub fn has_completed(todos: &[TodoItem]) -> bool {
    todos.iter().any(|todo| todo.completed)
}

/// Snapshot of what a renderer needs to draw the list
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TodoView {
    /// Active filter
    pub filter: FilterMode,
    /// Tasks passing the filter, in list order
    pub visible: Vec<TodoItem>,
    /// Total number of tasks
    pub total: usize,
    /// Tasks not yet completed
    pub items_left: usize,
    /// True if "clear completed" should be offered
    pub has_completed: bool,
}

impl TodoView {
    /// Builds the view for `state`
    #[must_use]
    pub fn from_state(state: &TodoState) -> Self {
        Self {
            filter: state.filter,
            visible: visible(&state.todos, state.filter).cloned().collect(),
            total: state.todos.len(),
            items_left: items_left(&state.todos),
            has_completed: has_completed(&state.todos),
        }
    }

    /// Number of completed tasks
    #[must_use]
    pub const fn completed(&self) -> usize {
        self.total.saturating_sub(self.items_left)
    }

    /// True when the list holds no tasks at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }
}
