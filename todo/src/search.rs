//! Case-insensitive filtering of a list's todos.

use crate::types::Todo;

/// Todos whose title or description contains `query`, in list order
///
/// A blank query matches everything.
#[must_use]
pub fn filter<'a>(todos: &'a [Todo], query: &str) -> Vec<&'a Todo> {
    if query.trim().is_empty() {
        return todos.iter().collect();
    }

    let needle = query.to_lowercase();
    todos.iter().filter(|todo| matches(todo, &needle)).collect()
}

/// Returns true if the title or description contains the lowercase `needle`
#[must_use]
pub fn matches(todo: &Todo, needle: &str) -> bool {
    todo.title.to_lowercase().contains(needle)
        || todo
            .description
            .as_deref()
            .is_some_and(|description| description.to_lowercase().contains(needle))
}
