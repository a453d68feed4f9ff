//! End-to-end walk through the todo reducer and view filter.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use taskflow_testing::test_clock;
use todo::{FilterMode, TaskId, TodoAction, TodoEnvironment, TodoState, reduce, visible};

fn env() -> TodoEnvironment {
    TodoEnvironment::new(Arc::new(test_clock()))
}

fn id_of(state: &TodoState, text: &str) -> TaskId {
    state.todos.iter().find(|todo| todo.text == text).unwrap().id
}

#[test]
fn shopping_list_scenario() {
    let env = env();
    let state = TodoState::new();

    let state = reduce(&state, TodoAction::AddTodo("buy milk".into()), &env);
    assert_eq!(state.todos.len(), 1);
    assert_eq!(state.todos[0].text, "buy milk");
    assert!(!state.todos[0].completed);

    let state = reduce(&state, TodoAction::AddTodo("walk dog".into()), &env);
    let texts: Vec<_> = state.todos.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, ["buy milk", "walk dog"]);

    let milk = id_of(&state, "buy milk");
    let dog = id_of(&state, "walk dog");
    assert_ne!(milk, dog);

    let state = reduce(&state, TodoAction::ToggleTodo(milk), &env);
    assert!(state.get(milk).unwrap().completed);
    assert!(!state.get(dog).unwrap().completed);

    let state = reduce(&state, TodoAction::SetFilter(FilterMode::Active), &env);
    let shown: Vec<_> = visible(&state.todos, state.filter)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(shown, ["walk dog"]);

    let state = reduce(&state, TodoAction::ClearComplete, &env);
    assert!(!state.exists(milk));
    assert!(state.exists(dog));
    assert_eq!(state.todos.len(), 1);

    let state = reduce(&state, TodoAction::CheckAll, &env);
    assert!(state.get(dog).unwrap().completed);
    assert_eq!(state.filter, FilterMode::Active);
}

#[test]
fn actions_from_json_drive_the_reducer() {
    let env = env();
    let script = [
        r#"{"type":"ADD_TODO","payload":"buy milk"}"#,
        r#"{"type":"ADD_TODO","payload":"walk dog"}"#,
        r#"{"type":"CHECK_ALL"}"#,
        r#"{"type":"SET_FILTER","payload":"COMPLETED"}"#,
        r#"{"type":"REDO","payload":{"steps":2}}"#,
    ];

    let state = script.iter().fold(TodoState::new(), |state, raw| {
        let action: TodoAction = serde_json::from_str(raw).unwrap();
        reduce(&state, action, &env)
    });

    assert_eq!(state.todos.len(), 2);
    assert!(state.todos.iter().all(|t| t.completed));
    assert_eq!(state.filter, FilterMode::Completed);
    assert_eq!(visible(&state.todos, state.filter).count(), 2);
}
