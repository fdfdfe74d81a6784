//! Key-value store abstraction.

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by [`KeyValueStore`] operations
pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Errors that can occur during storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("I/O error for key {key}: {source}")]
    Io {
        /// The key being accessed.
        key: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The stored value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A backend-specific failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Asynchronous string storage under string keys.
///
/// # Dyn Compatibility
///
/// Methods return [`StorageFuture`] instead of using `async fn` so the trait
/// can be shared as `Arc<dyn KeyValueStore>`.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if absent.
    fn get<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<String>>;

    /// Replace the value stored under `key`.
    ///
    /// Implementations must never leave a partially written value behind.
    fn set<'a>(&'a self, key: &'a str, value: String) -> StorageFuture<'a, ()>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()>;
}
