//! Domain errors for task notes.

use thiserror::Error;

/// Validation failures raised by the note aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteDomainError {
    /// Note text was empty or whitespace only.
    #[error("note text must not be empty")]
    EmptyNoteText,
}
