//! Domain types for the todo list.
//!
//! A todo list is an ordered collection of short text tasks plus the filter
//! mode that decides which of them are shown. Display order is insertion
//! order; new tasks are appended.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use taskflow_macros::Action;

/// Unique identifier for a todo item
///
/// Serialized as a bare number so persisted lists stay in the
/// `{id, text, completed}` record format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Creates a `TaskId` from its raw value
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier, immutable after creation
    pub id: TaskId,
    /// Task text
    pub text: String,
    /// Whether the task is done
    pub completed: bool,
}

impl TodoItem {
    /// Creates a new, not yet completed, todo item
    #[must_use]
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }
}

/// Which tasks the view shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterMode {
    /// Every task
    #[default]
    All,
    /// Tasks not yet completed
    Active,
    /// Completed tasks
    Completed,
}

impl FilterMode {
    /// Returns true if `item` is shown under this filter
    #[must_use]
    pub const fn matches(self, item: &TodoItem) -> bool {
        match self {
            Self::All => true,
            Self::Active => !item.completed,
            Self::Completed => item.completed,
        }
    }

    /// Wire name of this mode
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a filter mode name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter mode `{0}` (expected all, active or completed)")]
pub struct ParseFilterModeError(String);

impl FromStr for FilterMode {
    type Err = ParseFilterModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseFilterModeError(s.to_string())),
        }
    }
}

/// State of the todo list
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// All todos, in insertion order
    pub todos: Vec<TodoItem>,
    /// Current view filter
    pub filter: FilterMode,
}

impl TodoState {
    /// Creates a new empty todo state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state holding previously persisted todos, with the default filter
    #[must_use]
    pub fn with_todos(todos: Vec<TodoItem>) -> Self {
        Self {
            todos,
            filter: FilterMode::default(),
        }
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&TodoItem> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Largest id currently in the list
    #[must_use]
    pub fn max_id(&self) -> Option<TaskId> {
        self.todos.iter().map(|todo| todo.id).max()
    }
}

/// Actions that drive the todo list
///
/// On the wire an action is `{"type": "ADD_TODO", "payload": ...}`. Any
/// `type` this enum does not know, or a known `type` with a payload of the
/// wrong shape, is read as [`TodoAction::Unrecognized`].
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    from = "WireAction"
)]
pub enum TodoAction {
    /// Append a new task with this text
    AddTodo(String),

    /// Flip `completed` on a task
    ToggleTodo(TaskId),

    /// Remove a task
    DeleteTodo(TaskId),

    /// Remove every completed task
    ClearComplete,

    /// Replace the text of a task
    EditTodo {
        /// Task to edit
        id: TaskId,
        /// New text
        text: String,
    },

    /// Change the view filter
    SetFilter(FilterMode),

    /// Mark every task completed, or every task active if all already are
    CheckAll,

    /// Anything the reducer does not understand
    Unrecognized,
}

/// Loosely typed action as it arrives from outside
#[derive(Deserialize)]
struct WireAction {
    #[serde(rename = "type")]
    action_type: String,
    #[serde(default)]
    payload: serde_json::Value,
}

#[derive(Deserialize)]
struct EditPayload {
    id: TaskId,
    text: String,
}

impl From<WireAction> for TodoAction {
    fn from(wire: WireAction) -> Self {
        fn payload<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Option<T> {
            serde_json::from_value(value).ok()
        }

        let WireAction {
            action_type,
            payload: value,
        } = wire;

        let action = match action_type.as_str() {
            "ADD_TODO" => payload(value).map(Self::AddTodo),
            "TOGGLE_TODO" => payload(value).map(Self::ToggleTodo),
            "DELETE_TODO" => payload(value).map(Self::DeleteTodo),
            "CLEAR_COMPLETE" => Some(Self::ClearComplete),
            "EDIT_TODO" => payload::<EditPayload>(value).map(|edit| Self::EditTodo {
                id: edit.id,
                text: edit.text,
            }),
            "SET_FILTER" => payload(value).map(Self::SetFilter),
            "CHECK_ALL" => Some(Self::CheckAll),
            _ => None,
        };

        action.unwrap_or_else(|| {
            tracing::debug!(action_type = %action_type, "Unrecognized action");
            Self::Unrecognized
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn task_id_display_and_parse() {
        let id = TaskId::new(1_735_689_600_000);
        assert_eq!(id.to_string(), "1735689600000");
        assert_eq!(" 1735689600000 ".parse::<TaskId>().unwrap(), id);
        assert!("abc".parse::<TaskId>().is_err());
    }

    #[test]
    fn todo_item_new_is_active() {
        let item = TodoItem::new(TaskId::new(1), "buy milk");
        assert_eq!(item.text, "buy milk");
        assert!(!item.completed);
    }

    #[test]
    fn todo_item_record_format() {
        let item = TodoItem::new(TaskId::new(42), "walk dog");
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value, json!({"id": 42, "text": "walk dog", "completed": false}));
    }

    #[test]
    fn filter_mode_parse_and_display() {
        assert_eq!("Active".parse::<FilterMode>().unwrap(), FilterMode::Active);
        assert_eq!("COMPLETED".parse::<FilterMode>().unwrap(), FilterMode::Completed);
        assert_eq!(FilterMode::default(), FilterMode::All);
        assert_eq!(FilterMode::Active.to_string(), "ACTIVE");
        assert!("done".parse::<FilterMode>().is_err());
    }

    #[test]
    fn filter_mode_matches() {
        let mut item = TodoItem::new(TaskId::new(1), "x");
        assert!(FilterMode::All.matches(&item));
        assert!(FilterMode::Active.matches(&item));
        assert!(!FilterMode::Completed.matches(&item));

        item.completed = true;
        assert!(FilterMode::All.matches(&item));
        assert!(!FilterMode::Active.matches(&item));
        assert!(FilterMode::Completed.matches(&item));
    }

    #[test]
    fn todo_state_lookup() {
        let state = TodoState::with_todos(vec![
            TodoItem::new(TaskId::new(3), "a"),
            TodoItem::new(TaskId::new(9), "b"),
        ]);
        assert!(state.exists(TaskId::new(9)));
        assert!(!state.exists(TaskId::new(4)));
        assert_eq!(state.max_id(), Some(TaskId::new(9)));
        assert_eq!(TodoState::new().max_id(), None);
    }

    #[test]
    fn action_types_match_wire_tags() {
        assert_eq!(TodoAction::AddTodo(String::new()).action_type(), "ADD_TODO");
        assert_eq!(TodoAction::ClearComplete.action_type(), "CLEAR_COMPLETE");
        assert_eq!(
            TodoAction::EditTodo {
                id: TaskId::new(1),
                text: String::new()
            }
            .action_type(),
            "EDIT_TODO"
        );
        assert_eq!(TodoAction::CheckAll.action_type(), "CHECK_ALL");
    }

    #[test]
    fn action_serializes_adjacently_tagged() {
        let value = serde_json::to_value(TodoAction::EditTodo {
            id: TaskId::new(7),
            text: "new".to_string(),
        })
        .unwrap();
        assert_eq!(
            value,
            json!({"type": "EDIT_TODO", "payload": {"id": 7, "text": "new"}})
        );

        let value = serde_json::to_value(TodoAction::SetFilter(FilterMode::Active)).unwrap();
        assert_eq!(value, json!({"type": "SET_FILTER", "payload": "ACTIVE"}));
    }

    #[test]
    fn action_deserializes_every_known_type() {
        let cases = [
            (json!({"type": "ADD_TODO", "payload": "milk"}), TodoAction::AddTodo("milk".into())),
            (json!({"type": "TOGGLE_TODO", "payload": 5}), TodoAction::ToggleTodo(TaskId::new(5))),
            (json!({"type": "DELETE_TODO", "payload": 5}), TodoAction::DeleteTodo(TaskId::new(5))),
            (json!({"type": "CLEAR_COMPLETE"}), TodoAction::ClearComplete),
            (
                json!({"type": "EDIT_TODO", "payload": {"id": 5, "text": "t"}}),
                TodoAction::EditTodo { id: TaskId::new(5), text: "t".into() },
            ),
            (
                json!({"type": "SET_FILTER", "payload": "COMPLETED"}),
                TodoAction::SetFilter(FilterMode::Completed),
            ),
            (json!({"type": "CHECK_ALL", "payload": null}), TodoAction::CheckAll),
        ];

        for (value, expected) in cases {
            let action: TodoAction = serde_json::from_value(value).unwrap();
            assert_eq!(action, expected);
        }
    }

    #[test]
    fn unknown_or_malformed_actions_are_unrecognized() {
        for value in [
            json!({"type": "UNDO"}),
            json!({"type": "RESET", "payload": 3}),
            json!({"type": "TOGGLE_TODO", "payload": "not-an-id"}),
            json!({"type": "SET_FILTER", "payload": "DONE"}),
        ] {
            let action: TodoAction = serde_json::from_value(value).unwrap();
            assert_eq!(action, TodoAction::Unrecognized);
        }
    }
}
