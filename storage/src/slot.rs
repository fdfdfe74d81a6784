//! Typed JSON value bound to a single key.

use crate::kv::{KeyValueStore, StorageError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;

/// A JSON document of type `T` stored under one key
///
/// [`load`](Self::load) and [`save`](Self::save) fail soft: errors are logged
/// and never reach the caller. Use [`try_load`](Self::try_load) and
/// [`try_save`](Self::try_save) to observe them.
pub struct JsonSlot<T> {
    store: Arc<dyn KeyValueStore>,
    key: Arc<str>,
    _value: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonSlot<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: Arc::clone(&self.key),
            _value: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for JsonSlot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonSlot")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl<T> JsonSlot<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Binds `key` in `store` to values of type `T`
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            key: key.into(),
            _value: PhantomData,
        }
    }

    /// The key this slot reads and writes
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read and decode the stored value
    ///
    /// # Errors
    ///
    /// Returns the backend error, or [`StorageError::Serialization`] if the
    /// stored text is not valid JSON for `T`.
    pub async fn try_load(&self) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Read the stored value, falling back to `T::default()`
    ///
    /// A missing key, an unreadable backend or a corrupt document all produce
    /// the default value.
    pub async fn load(&self) -> T {
        match self.try_load().await {
            Ok(Some(value)) => value,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no stored value, using default");
                T::default()
            }
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "failed to load stored value, using default");
                T::default()
            }
        }
    }

    /// Encode and store `value`, replacing any prior value
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Serialization`] if `value` cannot be encoded,
    /// or the backend error if the write fails.
    pub async fn try_save(&self, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(&self.key, raw).await
    }

    /// Store `value`, logging instead of returning failures
    ///
    /// Returns whether the value was written. On failure the previously
    /// stored value is left as it was.
    pub async fn save(&self, value: &T) -> bool {
        match self.try_save(value).await {
            Ok(()) => true,
            Err(error) => {
                tracing::error!(key = %self.key, %error, "failed to save value");
                false
            }
        }
    }
}
