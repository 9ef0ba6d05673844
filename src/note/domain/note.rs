//! Task note entity.

use super::{NoteDomainError, NoteId};
use crate::identity::domain::UserId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A note attached to a task.
///
/// Only the text can change after creation; the author, the parent task and
/// the admin marker are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskNote {
    id: NoteId,
    task_id: TaskId,
    author_id: UserId,
    text: String,
    is_admin_note: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedNoteData {
    /// Persisted note identifier.
    pub id: NoteId,
    /// Persisted parent task.
    pub task_id: TaskId,
    /// Persisted author.
    pub author_id: UserId,
    /// Persisted text.
    pub text: String,
    /// Persisted admin marker.
    pub is_admin_note: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskNote {
    /// Creates a note timestamped now.
    ///
    /// # Errors
    ///
    /// Returns [`NoteDomainError::EmptyNoteText`] when the text is blank.
    pub fn new(
        task_id: TaskId,
        author_id: UserId,
        text: impl Into<String>,
        is_admin_note: bool,
        clock: &impl Clock,
    ) -> Result<Self, NoteDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: NoteId::new(),
            task_id,
            author_id,
            text: validated_text(text.into())?,
            is_admin_note,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a note from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedNoteData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            author_id: data.author_id,
            text: data.text,
            is_admin_note: data.is_admin_note,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the note identifier.
    #[must_use]
    pub const fn id(&self) -> NoteId {
        self.id
    }

    /// Returns the parent task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the author.
    #[must_use]
    pub const fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Returns the note text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` for notes written from the administrative side.
    #[must_use]
    pub const fn is_admin_note(&self) -> bool {
        self.is_admin_note
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the note text.
    ///
    /// # Errors
    ///
    /// Returns [`NoteDomainError::EmptyNoteText`] when the text is blank. The
    /// note is left unchanged in that case.
    pub fn edit(
        &mut self,
        text: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), NoteDomainError> {
        self.text = validated_text(text.into())?;
        self.updated_at = clock.utc();
        Ok(())
    }
}

fn validated_text(text: String) -> Result<String, NoteDomainError> {
    if text.trim().is_empty() {
        return Err(NoteDomainError::EmptyNoteText);
    }
    Ok(text)
}
