//! Tests for #[derive(Action)] macro

use taskflow_macros::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum ListAction {
    AddItem(String),

    RenameItem { id: u64, text: String },

    ClearDone,

    #[action_type = "MARK_ALL"]
    CheckAll,
}

#[derive(Action, Debug)]
enum Wrapped<T> {
    Value(T),
    Empty,
}

#[test]
fn test_tuple_variant_tag() {
    let action = ListAction::AddItem("milk".to_string());
    assert_eq!(action.action_type(), "ADD_ITEM");
}

#[test]
fn test_struct_variant_tag() {
    let action = ListAction::RenameItem {
        id: 7,
        text: "walk dog".to_string(),
    };
    assert_eq!(action.action_type(), "RENAME_ITEM");
}

#[test]
fn test_unit_variant_tag() {
    assert_eq!(ListAction::ClearDone.action_type(), "CLEAR_DONE");
}

#[test]
fn test_explicit_tag_override() {
    assert_eq!(ListAction::CheckAll.action_type(), "MARK_ALL");
}

#[test]
fn test_action_types_in_declaration_order() {
    assert_eq!(
        ListAction::ACTION_TYPES,
        &["ADD_ITEM", "RENAME_ITEM", "CLEAR_DONE", "MARK_ALL"]
    );
}

#[test]
fn test_generic_enum() {
    assert_eq!(Wrapped::Value(3_u8).action_type(), "VALUE");
    assert_eq!(Wrapped::<u8>::Empty.action_type(), "EMPTY");
    assert_eq!(Wrapped::<u8>::ACTION_TYPES.len(), 2);
}
