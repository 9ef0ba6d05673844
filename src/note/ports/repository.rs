//! Repository port for task notes.

use crate::identity::domain::UserId;
use crate::note::domain::{NoteId, TaskNote};
use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for note repository operations.
pub type NoteRepositoryResult<T> = Result<T, NoteRepositoryError>;

/// Note persistence contract.
///
/// Listings are ordered by creation time ascending; notes created at the
/// same instant come back in insertion order.
#[async_trait]
pub trait TaskNoteRepository: Send + Sync {
    /// Stores a new note together with the updated parent task.
    ///
    /// Both writes succeed or neither does. The task is checked against its
    /// stored version exactly as in
    /// [`crate::task::ports::TaskRepository::update`].
    ///
    /// # Errors
    ///
    /// Returns [`NoteRepositoryError::DuplicateNote`] when the note ID is
    /// taken, [`NoteRepositoryError::TaskNotFound`] when the task is gone or
    /// [`NoteRepositoryError::ConcurrentModification`] when the task changed
    /// since it was loaded.
    async fn append(&self, note: &TaskNote, task: &Task) -> NoteRepositoryResult<()>;

    /// Finds a note by identifier.
    async fn find_by_id(&self, id: NoteId) -> NoteRepositoryResult<Option<TaskNote>>;

    /// Persists a note's edited text.
    ///
    /// # Errors
    ///
    /// Returns [`NoteRepositoryError::NotFound`] when the note does not exist.
    async fn update(&self, note: &TaskNote) -> NoteRepositoryResult<()>;

    /// Deletes a note, returning `false` when it did not exist.
    async fn delete(&self, id: NoteId) -> NoteRepositoryResult<bool>;

    /// Returns the task's notes.
    async fn list_for_task(&self, task_id: TaskId) -> NoteRepositoryResult<Vec<TaskNote>>;

    /// Returns the task's notes written by one author.
    async fn list_for_task_and_author(
        &self,
        task_id: TaskId,
        author_id: UserId,
    ) -> NoteRepositoryResult<Vec<TaskNote>>;

    /// Counts the task's notes.
    async fn count_for_task(&self, task_id: TaskId) -> NoteRepositoryResult<usize>;
}

/// Errors returned by note repository implementations.
#[derive(Debug, Clone, Error)]
pub enum NoteRepositoryError {
    /// A note with the same identifier already exists.
    #[error("duplicate note identifier: {0}")]
    DuplicateNote(NoteId),

    /// The note was not found.
    #[error("note not found: {0}")]
    NotFound(NoteId),

    /// The parent task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The parent task was modified by another writer since it was loaded.
    #[error("task {0} was modified concurrently")]
    ConcurrentModification(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl NoteRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
