//! # Tasklist Storage
//!
//! Local persistence for tasklist state: a single JSON document per key.
//!
//! ## Layers
//!
//! - [`KeyValueStore`]: string values under string keys, implemented by
//!   [`FileStore`] (one file per key) and [`InMemoryStore`]
//! - [`JsonSlot`]: a typed JSON value bound to one key, failing soft
//! - [`SaveQueue`]: a single writer in front of a slot, so saves never land
//!   out of order
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use tasklist_storage::{InMemoryStore, JsonSlot};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let slot: JsonSlot<Vec<String>> = JsonSlot::new(Arc::new(InMemoryStore::new()), "@notes");
//!
//! // Nothing stored yet: the default value comes back.
//! assert!(slot.load().await.is_empty());
//!
//! slot.save(&vec!["first".to_string()]).await;
//! assert_eq!(slot.load().await, vec!["first".to_string()]);
//! # }
//! ```

mod file;
mod kv;
mod memory;
mod queue;
mod slot;

pub use file::FileStore;
pub use kv::{KeyValueStore, StorageError, StorageFuture};
pub use memory::{InMemoryStore, WRITE_LOG_CAPACITY};
pub use queue::SaveQueue;
pub use slot::JsonSlot;
