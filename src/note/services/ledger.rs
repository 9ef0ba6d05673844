//! Service layer for the task note ledger.

use crate::identity::domain::UserId;
use crate::note::{
    domain::{NoteDomainError, NoteId, TaskNote},
    ports::{NoteRepositoryError, TaskNoteRepository},
};
use crate::task::{
    domain::TaskId,
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for note operations.
#[derive(Debug, Error)]
pub enum NoteLedgerError {
    /// The note failed validation.
    #[error(transparent)]
    Domain(#[from] NoteDomainError),
    /// The parent task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// Note repository operation failed.
    #[error(transparent)]
    Repository(#[from] NoteRepositoryError),
    /// Task repository operation failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
}

/// Result type for note ledger operations.
pub type NoteLedgerResult<T> = Result<T, NoteLedgerError>;

/// Request payload for appending a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendNoteRequest {
    task_id: TaskId,
    author_id: UserId,
    text: String,
    is_admin_note: bool,
}

impl AppendNoteRequest {
    /// Creates a regular (non-admin) note request.
    #[must_use]
    pub fn new(task_id: TaskId, author_id: UserId, text: impl Into<String>) -> Self {
        Self {
            task_id,
            author_id,
            text: text.into(),
            is_admin_note: false,
        }
    }

    /// Marks the note as an admin note.
    #[must_use]
    pub const fn as_admin_note(mut self) -> Self {
        self.is_admin_note = true;
        self
    }
}

/// Append-mostly ledger of notes attached to tasks.
///
/// Appending a note raises the parent task's unread-notes flag in the same
/// repository write. Editing or deleting notes leaves the flag alone.
#[derive(Clone)]
pub struct TaskNoteLedger<N, R, C>
where
    N: TaskNoteRepository,
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    notes: Arc<N>,
    tasks: Arc<R>,
    clock: Arc<C>,
}

impl<N, R, C> TaskNoteLedger<N, R, C>
where
    N: TaskNoteRepository,
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new note ledger.
    #[must_use]
    pub const fn new(notes: Arc<N>, tasks: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            notes,
            tasks,
            clock,
        }
    }

    /// Appends a note to a task and flags the task as having unread notes.
    ///
    /// # Errors
    ///
    /// Returns [`NoteLedgerError::TaskNotFound`] when the task does not exist,
    /// [`NoteLedgerError::Domain`] for blank text, or
    /// [`NoteLedgerError::Repository`] when the combined write fails.
    pub async fn append(&self, request: AppendNoteRequest) -> NoteLedgerResult<TaskNote> {
        let AppendNoteRequest {
            task_id,
            author_id,
            text,
            is_admin_note,
        } = request;
        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(NoteLedgerError::TaskNotFound(task_id))?;

        let note = TaskNote::new(task_id, author_id, text, is_admin_note, &*self.clock)?;
        task.flag_unread_notes(&*self.clock);
        self.notes.append(&note, &task).await?;
        info!(note_id = %note.id(), %task_id, %author_id, is_admin_note, "note appended");
        Ok(note)
    }

    /// Lists a task's notes, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`NoteLedgerError::Repository`] when the lookup fails.
    pub async fn list(&self, task_id: TaskId) -> NoteLedgerResult<Vec<TaskNote>> {
        Ok(self.notes.list_for_task(task_id).await?)
    }

    /// Lists a task's notes by one author, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`NoteLedgerError::Repository`] when the lookup fails.
    pub async fn list_by_author(
        &self,
        task_id: TaskId,
        author_id: UserId,
    ) -> NoteLedgerResult<Vec<TaskNote>> {
        Ok(self
            .notes
            .list_for_task_and_author(task_id, author_id)
            .await?)
    }

    /// Replaces a note's text.
    ///
    /// Returns `Ok(None)` when the note does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`NoteLedgerError::Domain`] for blank text or
    /// [`NoteLedgerError::Repository`] when persistence fails.
    pub async fn update(
        &self,
        id: NoteId,
        text: impl Into<String>,
    ) -> NoteLedgerResult<Option<TaskNote>> {
        let Some(mut note) = self.notes.find_by_id(id).await? else {
            return Ok(None);
        };
        note.edit(text, &*self.clock)?;
        self.notes.update(&note).await?;
        debug!(note_id = %id, "note edited");
        Ok(Some(note))
    }

    /// Deletes a note, returning whether it existed.
    ///
    /// # Errors
    ///
    /// Returns [`NoteLedgerError::Repository`] when persistence fails.
    pub async fn delete(&self, id: NoteId) -> NoteLedgerResult<bool> {
        let deleted = self.notes.delete(id).await?;
        debug!(note_id = %id, deleted, "note delete requested");
        Ok(deleted)
    }

    /// Counts a task's notes.
    ///
    /// # Errors
    ///
    /// Returns [`NoteLedgerError::Repository`] when the lookup fails.
    pub async fn count(&self, task_id: TaskId) -> NoteLedgerResult<usize> {
        Ok(self.notes.count_for_task(task_id).await?)
    }
}
