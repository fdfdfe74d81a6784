//! Named to-do lists with local JSON persistence.
//!
//! Users keep several named lists, each an ordered sequence of todos with an
//! optional description, picture and due date. The active list can be
//! filtered by a search query. The whole collection is stored as one JSON
//! document under `@lists` and rewritten in full on every persist.
//!
//! - [`repository`]: pure operations on the collection
//! - [`search`]: case-insensitive filtering
//! - [`reducer`]: commands, validation and storage effects
//! - [`storage`]: keys and slots for the stored layouts
//! - [`config`]: environment-based configuration
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tasklist_core::environment::{ClockIds, SystemClock};
//! use tasklist_runtime::Store;
//! use tasklist_storage::InMemoryStore;
//! use todo::{TodoAction, TodoEnvironment, TodoFields, TodoReducer, TodoState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ids = Arc::new(ClockIds::new(Arc::new(SystemClock)));
//! let env = TodoEnvironment::new(ids, Arc::new(InMemoryStore::new()));
//! let store = Store::new(TodoState::new(), TodoReducer::new(), env);
//!
//! // Read stored lists; an empty store yields one "Default List"
//! store.send(TodoAction::LoadLists).await.wait().await?;
//!
//! store
//!     .send(TodoAction::AddTodo { fields: TodoFields::titled("Buy milk") })
//!     .await
//!     .wait()
//!     .await?;
//! store.send(TodoAction::Persist).await.wait().await?;
//!
//! println!("Todos: {}", store.state(TodoState::count).await);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod reducer;
pub mod repository;
pub mod search;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use config::{ConfigError, TodoConfig};
pub use error::ValidationError;
pub use reducer::{TodoEnvironment, TodoReducer};
pub use types::{ListId, Notice, Todo, TodoAction, TodoFields, TodoId, TodoList, TodoState};
