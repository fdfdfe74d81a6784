//! Storage keys and slots for the two stored layouts.

use crate::types::{Todo, TodoList};
use std::sync::Arc;
use tasklist_storage::{JsonSlot, KeyValueStore};

/// Key of the multi-list collection
pub const LISTS_KEY: &str = "@lists";

/// Key of the single-list layout: a bare array of todos
pub const TODOS_KEY: &str = "@todos";

/// Slot holding every list with its todos
pub fn lists_slot(store: Arc<dyn KeyValueStore>) -> JsonSlot<Vec<TodoList>> {
    JsonSlot::new(store, LISTS_KEY)
}

/// Slot holding a single unnamed list of todos
pub fn todos_slot(store: Arc<dyn KeyValueStore>) -> JsonSlot<Vec<Todo>> {
    JsonSlot::new(store, TODOS_KEY)
}
