//! Transition observers.
//!
//! [`TodoApp`](crate::app::TodoApp) calls a [`TransitionHook`] after every
//! dispatched action with the state before and after it. The reducer itself
//! never logs.

use crate::filter;
use crate::types::TodoState;

/// One applied action, as seen by a hook
#[derive(Debug, Clone, Copy)]
pub struct Transition<'a> {
    /// Wire tag of the action, e.g. `ADD_TODO`
    pub action_type: &'static str,
    /// State the action was applied to
    pub before: &'a TodoState,
    /// State the action produced
    pub after: &'a TodoState,
}

impl Transition<'_> {
    /// True if the task list changed, which is what triggers persistence
    #[must_use]
    pub fn todos_changed(&self) -> bool {
        self.before.todos != self.after.todos
    }

    /// True if the action changed nothing at all
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.before == self.after
    }
}

/// Observer invoked for every transition
///
/// Hooks run while the store's write lock is held, so they must be quick
/// and must not dispatch.
pub trait TransitionHook: Send + Sync {
    /// Called once per dispatched action
    fn on_transition(&self, transition: &Transition<'_>);
}

impl<H: TransitionHook + ?Sized> TransitionHook for std::sync::Arc<H> {
    fn on_transition(&self, transition: &Transition<'_>) {
        (**self).on_transition(transition);
    }
}

/// Hook that emits one structured `tracing` event per transition
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHook;

impl TransitionHook for TracingHook {
    fn on_transition(&self, transition: &Transition<'_>) {
        let after = transition.after;

        if transition.is_identity() {
            tracing::debug!(action = transition.action_type, "Action left state unchanged");
            return;
        }

        tracing::info!(
            action = transition.action_type,
            todos_before = transition.before.todos.len(),
            todos_after = after.todos.len(),
            items_left = filter::items_left(&after.todos),
            filter = %after.filter,
            todos_changed = transition.todos_changed(),
            "Applied action"
        );
    }
}

/// Hook that ignores every transition
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl TransitionHook for NoopHook {
    fn on_transition(&self, _transition: &Transition<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FilterMode, TaskId, TodoItem};
    use std::sync::Mutex;

    #[test]
    fn transition_change_detection() {
        let before = TodoState::new();
        let mut after = before.clone();
        after.filter = FilterMode::Active;

        let filter_only = Transition {
            action_type: "SET_FILTER",
            before: &before,
            after: &after,
        };
        assert!(!filter_only.todos_changed());
        assert!(!filter_only.is_identity());

        after.todos.push(TodoItem::new(TaskId::new(1), "a"));
        let added = Transition {
            action_type: "ADD_TODO",
            before: &before,
            after: &after,
        };
        assert!(added.todos_changed());
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<&'static str>>);

    impl TransitionHook for Recorder {
        fn on_transition(&self, transition: &Transition<'_>) {
            self.0
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(transition.action_type);
        }
    }

    #[test]
    fn hooks_receive_transitions() {
        let recorder = Recorder::default();
        let state = TodoState::new();
        let transition = Transition {
            action_type: "CHECK_ALL",
            before: &state,
            after: &state,
        };

        recorder.on_transition(&transition);
        NoopHook.on_transition(&transition);
        TracingHook.on_transition(&transition);

        let seen = recorder.0.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        assert_eq!(*seen, ["CHECK_ALL"]);
    }
}
