//! # Tasklist Runtime
//!
//! Runtime for the tasklist reducer architecture.
//!
//! This crate provides the [`Store`] that owns state, runs the reducer for
//! each action and executes the effects it returns.
//!
//! ## Core Components
//!
//! - **Store**: Holds state behind a lock so actions are reduced one at a time
//! - **Effect Executor**: Runs effect descriptions and feeds produced actions back
//! - **`EffectHandle`**: Lets callers wait until an action's effects have settled
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action and wait for its effects
//! store.send(Action::Load).await.wait().await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::time::Duration;
use tasklist_core::{effect::Effect, reducer::Reducer};
use tokio::task::JoinHandle;

pub use error::StoreError;
pub use store::Store;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// A spawned effect task failed, typically because it panicked
        #[error("Effect task failed: {0}")]
        TaskJoin(#[from] tokio::task::JoinError),

        /// Waiting for effects exceeded the given timeout
        #[error("Timed out waiting for effects after {0:?}")]
        Timeout(std::time::Duration),
    }
}

/// Handle to the effects started by one `send`
///
/// Waiting on the handle also waits on every action fed back by those
/// effects, and on their effects in turn.
#[derive(Debug, Default)]
#[must_use = "dropping the handle does not cancel effects, but you lose the ability to wait for them"]
pub struct EffectHandle {
    tasks: Vec<JoinHandle<Result<(), StoreError>>>,
}

impl EffectHandle {
    /// A handle with nothing to wait for
    pub fn completed() -> Self {
        Self::default()
    }

    /// Number of effect tasks started by the action
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true if the action started no effect tasks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Wait for all effects (and their feedback actions) to finish
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TaskJoin`] if an effect task panicked.
    pub async fn wait(self) -> Result<(), StoreError> {
        for task in self.tasks {
            task.await??;
        }
        Ok(())
    }

    /// Like [`wait`](Self::wait), bounded by `timeout`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] when the timeout elapses first, or any
    /// error from [`wait`](Self::wait).
    pub async fn wait_with_timeout(self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout(timeout))?
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{Effect, EffectHandle, Reducer, StoreError};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`, one action reduced at a time)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// Clones share the same state.
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
            }
        }

        /// Send an action through the reducer and start its effects
        ///
        /// The state lock is held only while the reducer runs. Effects run on
        /// the tokio runtime; use the returned handle to wait for them.
        #[tracing::instrument(skip_all, name = "store_send")]
        pub async fn send(&self, action: A) -> EffectHandle {
            metrics::counter!("store.actions.total").increment(1);

            let effects = {
                let mut state = self.state.write().await;
                tracing::trace!("Acquired write lock on state");

                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut *state, action, &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                effects
            };

            tracing::trace!("Reducer returned {} effects", effects.len());

            let mut handle = EffectHandle::completed();
            for effect in effects {
                if let Some(task) = self.execute_effect(effect) {
                    handle.tasks.push(task);
                }
            }
            handle
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let list_count = store.state(|s| s.lists.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        fn execute_effect(
            &self,
            effect: Effect<A>,
        ) -> Option<tokio::task::JoinHandle<Result<(), StoreError>>> {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                    None
                }
                Effect::Future(fut) => {
                    tracing::trace!("Executing Effect::Future");
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);

                    let store = self.clone();
                    Some(tokio::spawn(async move {
                        match fut.await {
                            Some(action) => {
                                tracing::trace!("Effect::Future produced an action, sending to store");
                                store.send(action).await.wait().await
                            }
                            None => {
                                tracing::trace!("Effect::Future completed with no action");
                                Ok(())
                            }
                        }
                    }))
                }
            }
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
            }
        }
    }
}
