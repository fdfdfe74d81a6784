//! Pure operations on the list collection.
//!
//! Every function takes the current collection by reference and returns a
//! new one, so callers can keep the previous value and a rejected operation
//! can never leave a half-applied change behind. Fresh ids come from the
//! caller; nothing here reads a clock.

use crate::error::ValidationError;
use crate::types::{ListId, Todo, TodoFields, TodoId, TodoList};

/// Collection and active pointer to use once stored lists are read
///
/// An empty store yields a single list built by `default_list`. Otherwise
/// the stored lists are kept as they are and the first one becomes active.
pub fn initialize(
    stored: Vec<TodoList>,
    default_list: impl FnOnce() -> TodoList,
) -> (Vec<TodoList>, ListId) {
    if let Some(first) = stored.first() {
        let active = first.id;
        return (stored, active);
    }

    let list = default_list();
    let active = list.id;
    (vec![list], active)
}

/// Largest list or todo id in the collection
///
/// Id generators must skip past it after a load so new ids never collide
/// with stored ones.
#[must_use]
pub fn highest_id(lists: &[TodoList]) -> Option<u64> {
    lists
        .iter()
        .flat_map(|list| {
            std::iter::once(list.id.get()).chain(list.todos.iter().map(|todo| todo.id.get()))
        })
        .max()
}

/// Append an empty list and make it active
///
/// # Errors
///
/// Returns [`ValidationError::EmptyListName`] if `name` is blank.
pub fn add_list(
    lists: &[TodoList],
    id: ListId,
    name: &str,
) -> Result<(Vec<TodoList>, ListId), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyListName);
    }

    let mut next = lists.to_vec();
    next.push(TodoList::new(id, name));
    Ok((next, id))
}

/// Check that a list may be removed from the collection
///
/// # Errors
///
/// Returns [`ValidationError::LastListRemaining`] when at most one list is left.
pub fn ensure_deletable(lists: &[TodoList]) -> Result<(), ValidationError> {
    if lists.len() <= 1 {
        return Err(ValidationError::LastListRemaining);
    }
    Ok(())
}

/// Remove a list, moving the active pointer if it pointed at it
///
/// The pointer moves to the first remaining list. If nothing remains, a
/// list built by `default_list` takes its place so the collection is never
/// empty. An unknown `list_id` changes nothing.
pub fn delete_list(
    lists: &[TodoList],
    active: Option<ListId>,
    list_id: ListId,
    default_list: impl FnOnce() -> TodoList,
) -> (Vec<TodoList>, Option<ListId>) {
    if !lists.iter().any(|list| list.id == list_id) {
        return (lists.to_vec(), active);
    }

    let mut next: Vec<TodoList> = lists
        .iter()
        .filter(|list| list.id != list_id)
        .cloned()
        .collect();

    if next.is_empty() {
        let list = default_list();
        let id = list.id;
        next.push(list);
        return (next, Some(id));
    }

    let active = match active {
        Some(id) if id != list_id => Some(id),
        _ => next.first().map(|list| list.id),
    };
    (next, active)
}

/// Point at another list; unknown ids leave the pointer where it was
#[must_use]
pub fn select_list(lists: &[TodoList], current: Option<ListId>, list_id: ListId) -> Option<ListId> {
    if lists.iter().any(|list| list.id == list_id) {
        Some(list_id)
    } else {
        current
    }
}

/// Append an open todo to the active list
///
/// # Errors
///
/// Returns [`ValidationError::EmptyTitle`] for a blank title, then
/// [`ValidationError::NoListSelected`] if no active list exists.
pub fn add_todo(
    lists: &[TodoList],
    active: Option<ListId>,
    todo_id: TodoId,
    fields: TodoFields,
) -> Result<Vec<TodoList>, ValidationError> {
    if fields.has_blank_title() {
        return Err(ValidationError::EmptyTitle);
    }
    let active = active
        .filter(|id| lists.iter().any(|list| list.id == *id))
        .ok_or(ValidationError::NoListSelected)?;

    Ok(with_active_list(lists, Some(active), |list| {
        list.todos.push(Todo::new(todo_id, fields));
    }))
}

/// Replace the editable fields of a todo in the active list
///
/// The todo keeps its id and completion flag. An unknown `todo_id` changes
/// nothing.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyTitle`] for a blank title.
pub fn update_todo(
    lists: &[TodoList],
    active: Option<ListId>,
    todo_id: TodoId,
    fields: TodoFields,
) -> Result<Vec<TodoList>, ValidationError> {
    if fields.has_blank_title() {
        return Err(ValidationError::EmptyTitle);
    }

    Ok(with_active_list(lists, active, |list| {
        if let Some(todo) = list.todos.iter_mut().find(|todo| todo.id == todo_id) {
            todo.apply(fields);
        }
    }))
}

/// Remove a todo from the active list
#[must_use]
pub fn delete_todo(lists: &[TodoList], active: Option<ListId>, todo_id: TodoId) -> Vec<TodoList> {
    with_active_list(lists, active, |list| {
        list.todos.retain(|todo| todo.id != todo_id);
    })
}

/// Flip the completion flag of a todo in the active list
#[must_use]
pub fn toggle_complete(
    lists: &[TodoList],
    active: Option<ListId>,
    todo_id: TodoId,
) -> Vec<TodoList> {
    with_active_list(lists, active, |list| {
        if let Some(todo) = list.todos.iter_mut().find(|todo| todo.id == todo_id) {
            todo.completed = !todo.completed;
        }
    })
}

fn with_active_list(
    lists: &[TodoList],
    active: Option<ListId>,
    edit: impl FnOnce(&mut TodoList),
) -> Vec<TodoList> {
    let mut next = lists.to_vec();
    if let Some(list) = active.and_then(|id| next.iter_mut().find(|list| list.id == id)) {
        edit(list);
    }
    next
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can unwrap
mod tests {
    use super::*;
    use crate::types::DEFAULT_LIST_NAME;

    fn list(id: u64, name: &str) -> TodoList {
        TodoList::new(ListId::new(id), name)
    }

    fn default_list() -> TodoList {
        TodoList::default_list(ListId::new(99))
    }

    #[test]
    fn initialize_empty_store_synthesizes_default() {
        let (lists, active) = initialize(Vec::new(), default_list);

        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].name, DEFAULT_LIST_NAME);
        assert!(lists[0].todos.is_empty());
        assert_eq!(active, ListId::new(99));
    }

    #[test]
    fn initialize_keeps_stored_lists_and_activates_first() {
        let stored = vec![list(1, "Home"), list(2, "Work")];
        let (lists, active) = initialize(stored.clone(), || unreachable!());

        assert_eq!(lists, stored);
        assert_eq!(active, ListId::new(1));
    }

    #[test]
    fn first_run_add_list_then_todo() {
        let (lists, _) = initialize(Vec::new(), || TodoList::default_list(ListId::new(1)));
        let (lists, active) = add_list(&lists, ListId::new(2), "Groceries").unwrap();
        assert_eq!(active, ListId::new(2));

        let lists = add_todo(&lists, Some(active), TodoId::new(3), TodoFields::titled("Milk")).unwrap();

        let names: Vec<&str> = lists.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Default List", "Groceries"]);
        assert!(lists[0].todos.is_empty());
        assert_eq!(lists[1].todos.len(), 1);
        assert_eq!(lists[1].todos[0].title, "Milk");
        assert!(!lists[1].todos[0].completed);
    }

    #[test]
    fn highest_id_covers_lists_and_todos() {
        assert_eq!(highest_id(&[]), None);

        let mut home = list(4_999, "Home");
        home.todos.push(Todo::new(TodoId::new(5_000), TodoFields::titled("Milk")));
        assert_eq!(highest_id(&[list(7, "Work"), home]), Some(5_000));
    }

    #[test]
    fn add_list_trims_name() {
        let (lists, _) = add_list(&[], ListId::new(1), "  Errands ").unwrap();
        assert_eq!(lists[0].name, "Errands");
    }

    #[test]
    fn add_list_rejects_blank_names() {
        let lists = vec![list(1, "Home")];
        assert_eq!(
            add_list(&lists, ListId::new(2), ""),
            Err(ValidationError::EmptyListName)
        );
        assert_eq!(
            add_list(&lists, ListId::new(2), "   "),
            Err(ValidationError::EmptyListName)
        );
    }

    #[test]
    fn deleting_active_list_moves_to_first_remaining() {
        let lists = vec![list(1, "A"), list(2, "B"), list(3, "C")];
        let (lists, active) = delete_list(&lists, Some(ListId::new(2)), ListId::new(2), || {
            unreachable!()
        });

        assert_eq!(lists.len(), 2);
        assert_eq!(active, Some(ListId::new(1)));
    }

    #[test]
    fn deleting_other_list_keeps_pointer() {
        let lists = vec![list(1, "A"), list(2, "B")];
        let (lists, active) =
            delete_list(&lists, Some(ListId::new(2)), ListId::new(1), || unreachable!());

        assert_eq!(lists, vec![list(2, "B")]);
        assert_eq!(active, Some(ListId::new(2)));
    }

    #[test]
    fn deleting_only_list_leaves_one_default_active() {
        let lists = vec![list(1, "Solo")];
        let (lists, active) = delete_list(&lists, Some(ListId::new(1)), ListId::new(1), default_list);

        assert_eq!(lists, vec![default_list()]);
        assert_eq!(active, Some(ListId::new(99)));
    }

    #[test]
    fn deleting_unknown_list_changes_nothing() {
        let lists = vec![list(1, "A")];
        let (next, active) = delete_list(&lists, Some(ListId::new(1)), ListId::new(5), default_list);

        assert_eq!(next, lists);
        assert_eq!(active, Some(ListId::new(1)));
    }

    #[test]
    fn ensure_deletable_guards_last_list() {
        assert_eq!(
            ensure_deletable(&[list(1, "A")]),
            Err(ValidationError::LastListRemaining)
        );
        assert_eq!(ensure_deletable(&[list(1, "A"), list(2, "B")]), Ok(()));
    }

    #[test]
    fn select_list_ignores_unknown_ids() {
        let lists = vec![list(1, "A"), list(2, "B")];
        assert_eq!(
            select_list(&lists, Some(ListId::new(1)), ListId::new(2)),
            Some(ListId::new(2))
        );
        assert_eq!(
            select_list(&lists, Some(ListId::new(1)), ListId::new(7)),
            Some(ListId::new(1))
        );
    }

    #[test]
    fn add_todo_checks_title_before_list() {
        assert_eq!(
            add_todo(&[], None, TodoId::new(1), TodoFields::titled("  ")),
            Err(ValidationError::EmptyTitle)
        );
        assert_eq!(
            add_todo(&[], None, TodoId::new(1), TodoFields::titled("Milk")),
            Err(ValidationError::NoListSelected)
        );
    }

    #[test]
    fn add_todo_rejects_dangling_pointer() {
        let lists = vec![list(1, "A")];
        assert_eq!(
            add_todo(&lists, Some(ListId::new(4)), TodoId::new(1), TodoFields::titled("Milk")),
            Err(ValidationError::NoListSelected)
        );
    }

    #[test]
    fn edit_keeps_id_and_completion() {
        let mut home = list(1, "Home");
        let mut todo = Todo::new(TodoId::new(5), TodoFields::titled("Call mom"));
        todo.completed = true;
        home.todos.push(todo);
        let lists = vec![home];

        let lists = update_todo(
            &lists,
            Some(ListId::new(1)),
            TodoId::new(5),
            TodoFields::titled("Call mom").with_description("Sunday"),
        )
        .unwrap();

        let todo = &lists[0].todos[0];
        assert_eq!(todo.id, TodoId::new(5));
        assert!(todo.completed);
        assert_eq!(todo.description.as_deref(), Some("Sunday"));
    }

    #[test]
    fn edit_rejects_blank_title() {
        let lists = vec![list(1, "Home")];
        assert_eq!(
            update_todo(&lists, Some(ListId::new(1)), TodoId::new(5), TodoFields::default()),
            Err(ValidationError::EmptyTitle)
        );
    }

    #[test]
    fn missing_todo_operations_are_noops() {
        let lists = vec![list(1, "Home")];
        let active = Some(ListId::new(1));

        assert_eq!(delete_todo(&lists, active, TodoId::new(8)), lists);
        assert_eq!(toggle_complete(&lists, active, TodoId::new(8)), lists);
        assert_eq!(
            update_todo(&lists, active, TodoId::new(8), TodoFields::titled("x")).unwrap(),
            lists
        );
    }

    #[test]
    fn mutations_touch_only_the_active_list() {
        let lists = vec![list(1, "A"), list(2, "B")];
        let lists =
            add_todo(&lists, Some(ListId::new(2)), TodoId::new(10), TodoFields::titled("x")).unwrap();
        let lists = toggle_complete(&lists, Some(ListId::new(1)), TodoId::new(10));

        assert!(!lists[1].todos[0].completed);
        let lists = toggle_complete(&lists, Some(ListId::new(2)), TodoId::new(10));
        assert!(lists[1].todos[0].completed);
    }
}
