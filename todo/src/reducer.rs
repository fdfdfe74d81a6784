//! Reducer logic for the to-do lists.
//!
//! Commands are validated through [`repository`](crate::repository), which
//! either returns the new collection or a [`ValidationError`]. Rejections go
//! through `ValidationFailed` and leave the collection as it was. Storage is
//! touched only by `LoadLists` and `Persist`, both as effects.

use crate::error::ValidationError;
use crate::repository;
use crate::storage;
use crate::types::{DEFAULT_LIST_NAME, ListId, Notice, TodoAction, TodoId, TodoList, TodoState};
use std::sync::Arc;
use tasklist_core::{
    SmallVec, async_effect, effect::Effect, environment::IdGenerator, reducer::Reducer, smallvec,
};
use tasklist_storage::{JsonSlot, KeyValueStore, SaveQueue};

/// Environment dependencies for the to-do reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Source of list and todo ids
    pub ids: Arc<dyn IdGenerator>,
    /// Where the collection is read from
    pub lists: JsonSlot<Vec<TodoList>>,
    /// Serialized writer for the collection
    pub saves: SaveQueue<Vec<TodoList>>,
    /// Name of lists synthesized when none exist
    pub default_list_name: String,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment` storing lists under `@lists` in `store`
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime, since the save writer task
    /// is spawned here.
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>, store: Arc<dyn KeyValueStore>) -> Self {
        let lists = storage::lists_slot(store);
        let saves = SaveQueue::spawn(lists.clone());
        Self {
            ids,
            lists,
            saves,
            default_list_name: DEFAULT_LIST_NAME.to_string(),
        }
    }

    /// Use `name` for synthesized lists
    #[must_use]
    pub fn with_default_list_name(mut self, name: impl Into<String>) -> Self {
        self.default_list_name = name.into();
        self
    }

    fn default_list(&self) -> TodoList {
        TodoList::new(ListId::new(self.ids.next_id()), self.default_list_name.clone())
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment")
            .field("lists", &self.lists)
            .field("saves", &self.saves)
            .field("default_list_name", &self.default_list_name)
            .finish_non_exhaustive()
    }
}

/// Reducer for the to-do lists
#[derive(Clone, Debug)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Applies a list-mutating command, returning the confirmation to show
    ///
    /// On error nothing in `state` has changed.
    fn apply_command(
        state: &mut TodoState,
        action: TodoAction,
        env: &TodoEnvironment,
    ) -> Result<Option<Notice>, ValidationError> {
        match action {
            TodoAction::AddList { name } => {
                let id = ListId::new(env.ids.next_id());
                let (lists, active) = repository::add_list(&state.lists, id, &name)?;
                state.lists = lists;
                state.current_list_id = Some(active);
                Ok(Some(Notice::ListCreated))
            }

            TodoAction::DeleteList { id } => {
                if state.get_list(id).is_none() {
                    return Ok(None);
                }
                repository::ensure_deletable(&state.lists)?;
                let (lists, active) =
                    repository::delete_list(&state.lists, state.current_list_id, id, || {
                        env.default_list()
                    });
                state.lists = lists;
                state.current_list_id = active;
                Ok(Some(Notice::ListDeleted))
            }

            TodoAction::SelectList { id } => {
                state.current_list_id =
                    repository::select_list(&state.lists, state.current_list_id, id);
                Ok(None)
            }

            TodoAction::AddTodo { fields } => {
                let id = TodoId::new(env.ids.next_id());
                state.lists =
                    repository::add_todo(&state.lists, state.current_list_id, id, fields)?;
                Ok(Some(Notice::TodoAdded))
            }

            TodoAction::UpdateTodo { id, fields } => {
                let existed = state.get_todo(id).is_some();
                state.lists =
                    repository::update_todo(&state.lists, state.current_list_id, id, fields)?;
                Ok(existed.then_some(Notice::TodoUpdated))
            }

            TodoAction::DeleteTodo { id } => {
                let existed = state.get_todo(id).is_some();
                state.lists = repository::delete_todo(&state.lists, state.current_list_id, id);
                Ok(existed.then_some(Notice::TodoDeleted))
            }

            TodoAction::ToggleComplete { id } => {
                state.lists = repository::toggle_complete(&state.lists, state.current_list_id, id);
                Ok(None)
            }

            // Handled in `reduce`
            TodoAction::LoadLists
            | TodoAction::Search { .. }
            | TodoAction::Persist
            | TodoAction::ListsLoaded { .. }
            | TodoAction::ValidationFailed { .. } => Ok(None),
        }
    }

    /// Applies an event to state
    fn apply_event(state: &mut TodoState, action: TodoAction, env: &TodoEnvironment) {
        match action {
            TodoAction::ListsLoaded { lists } => {
                if let Some(id) = repository::highest_id(&lists) {
                    env.ids.observe(id);
                }
                let (lists, active) = repository::initialize(lists, || env.default_list());
                tracing::info!(lists = lists.len(), active = %active, "lists loaded");
                state.lists = lists;
                state.current_list_id = Some(active);
                state.loaded = true;
                state.last_error = None;
                state.refresh_view();
            }
            TodoAction::ValidationFailed { error } => {
                tracing::debug!(%error, "command rejected");
                state.last_error = Some(error);
                state.last_notice = None;
            }
            // Commands are not applied as events
            _ => {}
        }
    }
}

impl Default for TodoReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        tracing::debug!(action = action.name(), "reducing");

        match action {
            // ========== Commands ==========
            TodoAction::LoadLists => {
                let slot = env.lists.clone();
                smallvec![async_effect! {
                    Some(TodoAction::ListsLoaded { lists: slot.load().await })
                }]
            }

            TodoAction::Search { query } => {
                state.query = query;
                state.refresh_view();
                SmallVec::new()
            }

            TodoAction::Persist => {
                if !state.loaded {
                    tracing::debug!("persist before load ignored");
                    return SmallVec::new();
                }
                // Queued under the state lock so queue order follows state order.
                let generation = env.saves.submit(state.lists.clone());
                let saves = env.saves.clone();
                smallvec![async_effect! {
                    saves.wait_for(generation).await;
                    None
                }]
            }

            command if command.is_command() => {
                if !state.loaded {
                    tracing::debug!(action = command.name(), "ignored before lists are loaded");
                    return SmallVec::new();
                }

                match Self::apply_command(state, command, env) {
                    Ok(notice) => {
                        state.last_error = None;
                        state.last_notice = notice;
                        state.refresh_view();
                    }
                    Err(error) => {
                        Self::apply_event(state, TodoAction::ValidationFailed { error }, env);
                    }
                }
                SmallVec::new()
            }

            // ========== Events ==========
            event => {
                Self::apply_event(state, event, env);
                SmallVec::new()
            }
        }
    }
}
