//! Port contracts for the task note ledger.

pub mod repository;

pub use repository::{NoteRepositoryError, NoteRepositoryResult, TaskNoteRepository};
