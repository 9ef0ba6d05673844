//! Domain model for task notes.

mod error;
mod ids;
mod note;

pub use error::NoteDomainError;
pub use ids::NoteId;
pub use note::{PersistedNoteData, TaskNote};
