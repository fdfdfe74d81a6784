//! In-memory key-value store for tests and ephemeral sessions.

use crate::kv::{KeyValueStore, StorageFuture};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Number of recent writes kept for [`InMemoryStore::write_log`]
pub const WRITE_LOG_CAPACITY: usize = 256;

/// `HashMap`-backed store; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
    writes: Arc<RwLock<VecDeque<(String, String)>>>,
}

impl InMemoryStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one entry
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries: Arc::new(RwLock::new(entries)),
            writes: Arc::default(),
        }
    }

    /// Raw value currently stored under `key`
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    /// Recent successful `set`s, oldest first
    ///
    /// Only the last [`WRITE_LOG_CAPACITY`] writes are kept.
    pub async fn write_log(&self) -> Vec<(String, String)> {
        self.writes.read().await.iter().cloned().collect()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<String>> {
        Box::pin(async move { Ok(self.entries.read().await.get(key).cloned()) })
    }

    fn set<'a>(&'a self, key: &'a str, value: String) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            {
                let mut writes = self.writes.write().await;
                if writes.len() == WRITE_LOG_CAPACITY {
                    writes.pop_front();
                }
                writes.push_back((key.to_string(), value.clone()));
            }
            self.entries.write().await.insert(key.to_string(), value);
            Ok(())
        })
    }

    fn remove<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            self.entries.write().await.remove(key);
            Ok(())
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can unwrap
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_remove() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", "v".to_string()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));

        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn clones_share_entries() {
        let store = InMemoryStore::with_entry("k", "v");
        let other = store.clone();
        other.set("k", "w".to_string()).await.unwrap();
        assert_eq!(store.raw("k").await.as_deref(), Some("w"));
        assert_eq!(store.write_log().await.len(), 1);
    }

    #[tokio::test]
    async fn write_log_keeps_only_recent_writes() {
        let store = InMemoryStore::new();
        for n in 0..WRITE_LOG_CAPACITY + 10 {
            store.set("k", n.to_string()).await.unwrap();
        }

        let log = store.write_log().await;
        assert_eq!(log.len(), WRITE_LOG_CAPACITY);
        assert_eq!(log[0].1, "10");
        assert_eq!(log.last().map(|(_, v)| v.as_str()), Some("265"));
    }
}
