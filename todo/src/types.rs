//! Domain types for named to-do lists.
//!
//! A collection is an ordered `Vec<TodoList>`; each list owns an ordered
//! `Vec<Todo>`. The serde layout matches the stored `@lists` document:
//! numeric ids, camelCase field names, optional fields omitted when absent.

use crate::error::ValidationError;
use crate::search;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tasklist_macros::Action;

/// Name given to lists synthesized when none exist
pub const DEFAULT_LIST_NAME: &str = "Default List";

/// Unique identifier for a list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(u64);

impl ListId {
    /// Wraps a raw id
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a todo, unique within its list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Wraps a raw id
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The user-editable fields of a todo, as submitted by the add and edit forms
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoFields {
    /// Title; must not be blank
    pub title: String,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Local URI of an attached picture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// When the todo is due
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl TodoFields {
    /// Fields with only a title
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the image URI
    #[must_use]
    pub fn with_image(mut self, uri: impl Into<String>) -> Self {
        self.image = Some(uri.into());
        self
    }

    /// Sets the due date
    #[must_use]
    pub const fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Returns true if the title is empty after trimming
    #[must_use]
    pub fn has_blank_title(&self) -> bool {
        self.title.trim().is_empty()
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier within the owning list
    pub id: TodoId,
    /// Title of the todo
    pub title: String,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Local URI of an attached picture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// When the todo is due
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Whether the todo is done
    #[serde(default)]
    pub completed: bool,
}

impl Todo {
    /// Creates an open todo from submitted fields
    #[must_use]
    pub fn new(id: TodoId, fields: TodoFields) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            image: fields.image,
            due_date: fields.due_date,
            completed: false,
        }
    }

    /// The editable fields, e.g. to prefill an edit form
    #[must_use]
    pub fn fields(&self) -> TodoFields {
        TodoFields {
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            due_date: self.due_date,
        }
    }

    /// Replaces the editable fields, keeping id and completion
    pub fn apply(&mut self, fields: TodoFields) {
        self.title = fields.title;
        self.description = fields.description;
        self.image = fields.image;
        self.due_date = fields.due_date;
    }
}

/// A named, ordered list of todos
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    /// Unique identifier
    pub id: ListId,
    /// Display name
    pub name: String,
    /// Todos in insertion order
    #[serde(default)]
    pub todos: Vec<Todo>,
}

impl TodoList {
    /// Creates an empty list
    #[must_use]
    pub fn new(id: ListId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            todos: Vec::new(),
        }
    }

    /// Creates an empty list named [`DEFAULT_LIST_NAME`]
    #[must_use]
    pub fn default_list(id: ListId) -> Self {
        Self::new(id, DEFAULT_LIST_NAME)
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn todo(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.completed).count()
    }
}

/// Confirmation shown to the user after an accepted change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    /// A todo was added to the active list
    TodoAdded,
    /// A todo was edited
    TodoUpdated,
    /// A todo was removed
    TodoDeleted,
    /// A list was created and activated
    ListCreated,
    /// A list was removed
    ListDeleted,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::TodoAdded => "To-Do item added",
            Self::TodoUpdated => "To-Do item updated",
            Self::TodoDeleted => "To-Do item deleted",
            Self::ListCreated => "New list created",
            Self::ListDeleted => "List has been deleted",
        };
        f.write_str(text)
    }
}

/// Application state: the collection, the active list pointer and what the
/// screen shows
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TodoState {
    /// All lists in display order
    pub lists: Vec<TodoList>,
    /// The active list; `Some` and valid once loaded
    pub current_list_id: Option<ListId>,
    /// Current search text
    pub query: String,
    /// Active list's todos matching `query`, recomputed after every change
    pub visible: Vec<Todo>,
    /// Last validation error (if any)
    pub last_error: Option<ValidationError>,
    /// Confirmation for the last accepted change (if any)
    pub last_notice: Option<Notice>,
    /// Whether stored lists have been loaded
    pub loaded: bool,
}

impl TodoState {
    /// Creates an empty, not yet loaded state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the active list
    #[must_use]
    pub fn current_list(&self) -> Option<&TodoList> {
        self.current_list_id.and_then(|id| self.get_list(id))
    }

    /// Name of the active list, shown as the screen title
    #[must_use]
    pub fn current_list_name(&self) -> Option<&str> {
        self.current_list().map(|list| list.name.as_str())
    }

    /// Returns a list by ID
    #[must_use]
    pub fn get_list(&self, id: ListId) -> Option<&TodoList> {
        self.lists.iter().find(|list| list.id == id)
    }

    /// Returns a todo of the active list by ID
    #[must_use]
    pub fn get_todo(&self, id: TodoId) -> Option<&Todo> {
        self.current_list().and_then(|list| list.todo(id))
    }

    /// Returns the number of todos in the active list
    #[must_use]
    pub fn count(&self) -> usize {
        self.current_list().map_or(0, |list| list.todos.len())
    }

    /// Returns the number of completed todos in the active list
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.current_list().map_or(0, TodoList::completed_count)
    }

    /// Recompute `visible` from the active list and the query
    pub fn refresh_view(&mut self) {
        self.visible = self
            .current_list()
            .map(|list| {
                search::filter(&list.todos, &self.query)
                    .into_iter()
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
    }
}

/// Actions representing commands and events for the to-do lists
///
/// Commands come from the user interface. Events are produced by the
/// reducer's effects (`ListsLoaded`) or by rejected commands
/// (`ValidationFailed`).
#[derive(Action, Clone, Debug, PartialEq)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Command: Read stored lists (once, at startup)
    #[command]
    LoadLists,

    /// Command: Create a list and make it active
    #[command]
    AddList {
        /// Display name; must not be blank
        name: String,
    },

    /// Command: Remove a list (refused for the only list)
    #[command]
    DeleteList {
        /// List to delete
        id: ListId,
    },

    /// Command: Make a list active
    #[command]
    SelectList {
        /// List to activate
        id: ListId,
    },

    /// Command: Append a todo to the active list
    #[command]
    AddTodo {
        /// Submitted fields
        fields: TodoFields,
    },

    /// Command: Replace the editable fields of a todo in the active list
    #[command]
    UpdateTodo {
        /// Todo to edit
        id: TodoId,
        /// New field values
        fields: TodoFields,
    },

    /// Command: Remove a todo from the active list
    #[command]
    DeleteTodo {
        /// Todo to delete
        id: TodoId,
    },

    /// Command: Flip a todo's completion flag
    #[command]
    ToggleComplete {
        /// Todo to toggle
        id: TodoId,
    },

    /// Command: Filter the active list
    #[command]
    Search {
        /// Search text; blank shows everything
        query: String,
    },

    /// Command: Write the whole collection to storage
    #[command]
    Persist,

    // ========== Events ==========
    /// Event: Stored lists were read
    #[event]
    ListsLoaded {
        /// Lists as stored; empty if nothing was stored
        lists: Vec<TodoList>,
    },

    /// Event: Command validation failed
    #[event]
    ValidationFailed {
        /// What was wrong
        error: ValidationError,
    },
}
