//! Validation errors reported to the user.

use thiserror::Error;

/// Why a command was rejected
///
/// Rejected commands leave the collection untouched. The messages are the
/// ones shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// A list name was empty or only whitespace
    #[error("List name cannot be empty.")]
    EmptyListName,

    /// A todo title was empty or only whitespace
    #[error("Title is required")]
    EmptyTitle,

    /// A todo was submitted while no list is active
    #[error("Please create or select a list first.")]
    NoListSelected,

    /// The only remaining list cannot be deleted
    #[error("At least one list must exist.")]
    LastListRemaining,
}
