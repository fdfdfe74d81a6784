//! Tests for #[derive(Action)] macro

use tasklist_macros::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum ListAction {
    #[command]
    AddList { name: String },

    #[command]
    Refresh,

    #[command]
    Rename(u64, String),

    #[event]
    ListsLoaded { count: usize },

    #[event]
    Rejected(String),

    Untagged,
}

#[test]
fn commands_are_commands() {
    let action = ListAction::AddList {
        name: "Groceries".to_string(),
    };
    assert!(action.is_command());
    assert!(!action.is_event());

    assert!(ListAction::Refresh.is_command());
    assert!(ListAction::Rename(1, "Work".to_string()).is_command());
}

#[test]
fn events_are_events() {
    let action = ListAction::ListsLoaded { count: 3 };
    assert!(action.is_event());
    assert!(!action.is_command());
    assert!(ListAction::Rejected("empty name".to_string()).is_event());
}

#[test]
fn untagged_variant_is_neither() {
    assert!(!ListAction::Untagged.is_command());
    assert!(!ListAction::Untagged.is_event());
}

#[test]
fn name_matches_variant() {
    assert_eq!(
        ListAction::AddList {
            name: String::new()
        }
        .name(),
        "AddList"
    );
    assert_eq!(ListAction::Refresh.name(), "Refresh");
    assert_eq!(ListAction::Rename(2, String::new()).name(), "Rename");
    assert_eq!(ListAction::ListsLoaded { count: 0 }.name(), "ListsLoaded");
    assert_eq!(ListAction::Untagged.name(), "Untagged");
}
