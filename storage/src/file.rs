//! File-backed key-value store.
//!
//! Each key is one file inside a data directory. Writes land in a temporary
//! sibling first and are renamed over the target, so readers see either the
//! old value or the new one.

use crate::kv::{KeyValueStore, StorageError, StorageFuture};
use std::fmt::Write as _;
use tokio::io::AsyncWriteExt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Key-value store keeping one JSON file per key under a directory
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    writes: AtomicU64,
}

impl FileStore {
    /// Creates a store rooted at `root`
    ///
    /// The directory is created lazily on the first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            writes: AtomicU64::new(0),
        }
    }

    /// Creates a store rooted at `root`, creating the directory now
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let store = Self::new(root);
        tokio::fs::create_dir_all(&store.root)
            .await
            .map_err(|source| StorageError::Io {
                key: String::new(),
                source,
            })?;
        Ok(store)
    }

    /// Directory holding the stored files
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", encode_key(key)))
    }

    async fn write_atomically(&self, key: &str, value: String) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };

        tokio::fs::create_dir_all(&self.root).await.map_err(io_err)?;

        let target = self.path_for(key);
        let sequence = self.writes.fetch_add(1, Ordering::Relaxed);
        let staging = target.with_extension(format!("json.{sequence}.tmp"));

        if let Err(source) = write_synced(&staging, value.as_bytes()).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(io_err(source));
        }
        if let Err(source) = tokio::fs::rename(&staging, &target).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(io_err(source));
        }

        tracing::trace!(key, path = %target.display(), "wrote value");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<String>> {
        Box::pin(async move {
            match tokio::fs::read_to_string(self.path_for(key)).await {
                Ok(contents) => Ok(Some(contents)),
                Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
                Err(source) => Err(StorageError::Io {
                    key: key.to_string(),
                    source,
                }),
            }
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: String) -> StorageFuture<'a, ()> {
        Box::pin(self.write_atomically(key, value))
    }

    fn remove<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            match tokio::fs::remove_file(self.path_for(key)).await {
                Ok(()) => Ok(()),
                Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
                Err(source) => Err(StorageError::Io {
                    key: key.to_string(),
                    source,
                }),
            }
        })
    }
}

/// Write `contents` to a fresh file at `path` and flush it to disk
///
/// The data must be durable before the rename publishes it, or a crash can
/// leave an empty file under the real name.
async fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await
}

/// Map a key to a file stem: ASCII alphanumerics, `-` and `_` pass through,
/// every other byte becomes `%XX`.
fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            encoded.push(char::from(byte));
        } else {
            let _ = write!(encoded, "%{byte:02X}");
        }
    }
    encoded
}
