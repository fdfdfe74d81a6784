//! Storage doubles for fail-soft paths.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tasklist_storage::{KeyValueStore, StorageError, StorageFuture};

/// Key-value store whose every operation fails
///
/// Counts attempts so tests can check a write was tried and swallowed.
#[derive(Debug, Clone, Default)]
pub struct FailingStore {
    attempts: Arc<AtomicUsize>,
}

impl FailingStore {
    /// Creates a store that rejects everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of operations attempted so far
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    fn fail<T>(&self, op: &str, key: &str) -> Result<T, StorageError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Backend(format!("{op} {key}: storage unavailable")))
    }
}

impl KeyValueStore for FailingStore {
    fn get<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<String>> {
        Box::pin(async move { self.fail("get", key) })
    }

    fn set<'a>(&'a self, key: &'a str, _value: String) -> StorageFuture<'a, ()> {
        Box::pin(async move { self.fail("set", key) })
    }

    fn remove<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(async move { self.fail("remove", key) })
    }
}
