//! # Tasklist Testing
//!
//! Testing utilities and helpers for the tasklist reducer architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits (clock, id generator)
//! - Storage doubles (in-memory and always-failing key-value stores)
//! - The [`ReducerTest`] Given-When-Then harness and effect assertions
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_testing::{ReducerTest, assertions};
//!
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(test_environment())
//!     .given_state(loaded_state())
//!     .when_action(TodoAction::AddList { name: "Errands".into() })
//!     .then_state(|state| assert_eq!(state.lists.len(), 2))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use tasklist_core::environment::{Clock, IdGenerator};

pub mod reducer_test;
pub mod storage_mocks;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use tasklist_testing::mocks::FixedClock;
    /// use tasklist_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Predictable ids: `start`, `start + 1`, ...
    #[derive(Debug)]
    pub struct SequentialIds {
        next: AtomicU64,
    }

    impl SequentialIds {
        /// Ids counting up from `start`
        #[must_use]
        pub const fn starting_at(start: u64) -> Self {
            Self {
                next: AtomicU64::new(start),
            }
        }
    }

    impl Default for SequentialIds {
        fn default() -> Self {
            Self::starting_at(1)
        }
    }

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> u64 {
            self.next.fetch_add(1, Ordering::SeqCst)
        }

        fn observe(&self, id: u64) {
            self.next.fetch_max(id.saturating_add(1), Ordering::SeqCst);
        }
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, SequentialIds};
pub use reducer_test::{ReducerTest, assertions, run_effect};
pub use storage_mocks::FailingStore;
pub use tasklist_storage::InMemoryStore;
