//! Serialized writer in front of a [`JsonSlot`].
//!
//! Callers hand snapshots to the queue; a single background task writes them
//! one at a time. Snapshots submitted while a write is in flight coalesce and
//! only the newest is written next, so an older snapshot can never overwrite a
//! newer one.

use crate::slot::JsonSlot;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::watch;

/// The latest submitted snapshot and its generation number
struct Pending<T> {
    generation: u64,
    value: Option<T>,
}

/// Last-write-wins save queue
///
/// Cloning the queue shares the same writer task. The task stops once every
/// clone has been dropped and the last snapshot has been written.
pub struct SaveQueue<T> {
    submitted: Arc<watch::Sender<Pending<T>>>,
    written: watch::Receiver<u64>,
    key: Arc<str>,
}

impl<T> Clone for SaveQueue<T> {
    fn clone(&self) -> Self {
        Self {
            submitted: Arc::clone(&self.submitted),
            written: self.written.clone(),
            key: Arc::clone(&self.key),
        }
    }
}

impl<T> std::fmt::Debug for SaveQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveQueue")
            .field("key", &self.key)
            .field("submitted", &self.submitted.borrow().generation)
            .field("written", &*self.written.borrow())
            .finish()
    }
}

impl<T> SaveQueue<T>
where
    T: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static,
{
    /// Start the writer task for `slot` on the current tokio runtime
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn spawn(slot: JsonSlot<T>) -> Self {
        let (submitted, pending) = watch::channel(Pending {
            generation: 0,
            value: None,
        });
        let (done, written) = watch::channel(0);
        let key: Arc<str> = Arc::from(slot.key());

        tokio::spawn(write_loop(slot, pending, done));

        Self {
            submitted: Arc::new(submitted),
            written,
            key,
        }
    }

    /// Queue `value` for writing and return its generation number
    ///
    /// Does not wait for the write.
    pub fn submit(&self, value: T) -> u64 {
        let mut generation = 0;
        self.submitted.send_modify(|pending| {
            pending.generation += 1;
            pending.value = Some(value);
            generation = pending.generation;
        });
        tracing::trace!(key = %self.key, generation, "queued snapshot");
        generation
    }

    /// Queue `value` and wait until it, or a newer snapshot, has been written
    pub async fn save(&self, value: T) {
        let generation = self.submit(value);
        self.wait_for(generation).await;
    }

    /// Wait until the newest submitted snapshot has been written
    pub async fn flush(&self) {
        let latest = self.submitted.borrow().generation;
        self.wait_for(latest).await;
    }

    /// Generation number of the last snapshot the writer finished with
    #[must_use]
    pub fn written_generation(&self) -> u64 {
        *self.written.borrow()
    }

    /// Wait until snapshot `generation`, or a newer one, has been written
    pub async fn wait_for(&self, generation: u64) {
        let mut written = self.written.clone();
        if written.wait_for(|done| *done >= generation).await.is_err() {
            tracing::warn!(key = %self.key, generation, "save writer stopped before snapshot was written");
        }
    }
}

async fn write_loop<T>(
    slot: JsonSlot<T>,
    mut pending: watch::Receiver<Pending<T>>,
    done: watch::Sender<u64>,
) where
    T: Serialize + DeserializeOwned + Default + Clone,
{
    while pending.changed().await.is_ok() {
        let (generation, value) = {
            let latest = pending.borrow_and_update();
            (latest.generation, latest.value.clone())
        };

        if let Some(value) = value {
            let previous = *done.borrow();
            if generation > previous + 1 {
                tracing::trace!(
                    key = slot.key(),
                    skipped = generation - previous - 1,
                    "coalesced superseded snapshots"
                );
            }
            if slot.save(&value).await {
                tracing::debug!(key = slot.key(), generation, "persisted snapshot");
            }
        }

        done.send_replace(generation);
    }
    tracing::trace!(key = slot.key(), "save writer stopped");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can unwrap
mod tests {
    use super::*;
    use crate::InMemoryStore;

    fn queue_over(store: &InMemoryStore) -> SaveQueue<Vec<u32>> {
        SaveQueue::spawn(JsonSlot::new(Arc::new(store.clone()), "@nums"))
    }

    #[tokio::test]
    async fn save_waits_for_the_write() {
        let store = InMemoryStore::new();
        let queue = queue_over(&store);

        queue.save(vec![1]).await;
        assert_eq!(store.raw("@nums").await.as_deref(), Some("[1]"));
        assert_eq!(queue.written_generation(), 1);
    }

    #[tokio::test]
    async fn newest_snapshot_is_written_last() {
        let store = InMemoryStore::new();
        let queue = queue_over(&store);

        for n in 1..=50 {
            queue.submit(vec![n]);
        }
        queue.flush().await;

        assert_eq!(store.raw("@nums").await.as_deref(), Some("[50]"));

        // Writes never go backwards, whatever got coalesced.
        let log = store.write_log().await;
        let written: Vec<u32> = log
            .iter()
            .map(|(_, raw)| serde_json::from_str::<Vec<u32>>(raw).unwrap()[0])
            .collect();
        assert!(written.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(written.last(), Some(&50));
    }

    #[tokio::test]
    async fn flush_without_submissions_returns() {
        let store = InMemoryStore::new();
        let queue = queue_over(&store);
        queue.flush().await;
        assert!(store.write_log().await.is_empty());
    }
}
