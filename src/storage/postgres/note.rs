//! Note repository for `PostgreSQL`.

use super::{
    PostgresStore,
    models::{NewNoteRow, NoteRow},
    schema::task_notes,
    task::{to_task_row, update_versioned},
};
use crate::identity::domain::UserId;
use crate::note::{
    domain::{NoteId, PersistedNoteData, TaskNote},
    ports::{NoteRepositoryError, NoteRepositoryResult, TaskNoteRepository},
};
use crate::task::{
    domain::{Task, TaskId},
    ports::TaskRepositoryError,
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

#[async_trait]
impl TaskNoteRepository for PostgresStore {
    async fn append(&self, note: &TaskNote, task: &Task) -> NoteRepositoryResult<()> {
        let note_id = note.id();
        let task_row = to_task_row(task).map_err(NoteRepositoryError::persistence)?;
        let note_row = NewNoteRow {
            id: note_id.into_inner(),
            task_id: note.task_id().into_inner(),
            author_id: note.author_id().into_inner(),
            text: note.text().to_owned(),
            is_admin_note: note.is_admin_note(),
            created_at: note.created_at(),
            updated_at: note.updated_at(),
        };
        self.run_blocking(NoteRepositoryError::persistence, move |connection| {
            connection.transaction(|tx| {
                update_versioned(tx, &task_row).map_err(|err| match err {
                    TaskRepositoryError::NotFound(id) => NoteRepositoryError::TaskNotFound(id),
                    TaskRepositoryError::ConcurrentModification(id) => {
                        NoteRepositoryError::ConcurrentModification(id)
                    }
                    other => NoteRepositoryError::persistence(other),
                })?;
                diesel::insert_into(task_notes::table)
                    .values(&note_row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            NoteRepositoryError::DuplicateNote(note_id)
                        }
                        _ => NoteRepositoryError::persistence(err),
                    })?;
                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(&self, id: NoteId) -> NoteRepositoryResult<Option<TaskNote>> {
        self.run_blocking(NoteRepositoryError::persistence, move |connection| {
            let row = task_notes::table
                .filter(task_notes::id.eq(id.into_inner()))
                .select(NoteRow::as_select())
                .first::<NoteRow>(connection)
                .optional()
                .map_err(NoteRepositoryError::persistence)?;
            Ok(row.map(row_to_note))
        })
        .await
    }

    async fn update(&self, note: &TaskNote) -> NoteRepositoryResult<()> {
        let note_id = note.id();
        let text = note.text().to_owned();
        let updated_at = note.updated_at();
        self.run_blocking(NoteRepositoryError::persistence, move |connection| {
            let target = task_notes::table.filter(task_notes::id.eq(note_id.into_inner()));
            let updated = diesel::update(target)
                .set((task_notes::text.eq(text), task_notes::updated_at.eq(updated_at)))
                .execute(connection)
                .map_err(NoteRepositoryError::persistence)?;
            if updated == 0 {
                return Err(NoteRepositoryError::NotFound(note_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: NoteId) -> NoteRepositoryResult<bool> {
        self.run_blocking(NoteRepositoryError::persistence, move |connection| {
            let target = task_notes::table.filter(task_notes::id.eq(id.into_inner()));
            let deleted = diesel::delete(target)
                .execute(connection)
                .map_err(NoteRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn list_for_task(&self, task_id: TaskId) -> NoteRepositoryResult<Vec<TaskNote>> {
        self.run_blocking(NoteRepositoryError::persistence, move |connection| {
            let rows = task_notes::table
                .filter(task_notes::task_id.eq(task_id.into_inner()))
                .order((task_notes::created_at.asc(), task_notes::sequence.asc()))
                .select(NoteRow::as_select())
                .load::<NoteRow>(connection)
                .map_err(NoteRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_note).collect())
        })
        .await
    }

    async fn list_for_task_and_author(
        &self,
        task_id: TaskId,
        author_id: UserId,
    ) -> NoteRepositoryResult<Vec<TaskNote>> {
        self.run_blocking(NoteRepositoryError::persistence, move |connection| {
            let rows = task_notes::table
                .filter(task_notes::task_id.eq(task_id.into_inner()))
                .filter(task_notes::author_id.eq(author_id.into_inner()))
                .order((task_notes::created_at.asc(), task_notes::sequence.asc()))
                .select(NoteRow::as_select())
                .load::<NoteRow>(connection)
                .map_err(NoteRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_note).collect())
        })
        .await
    }

    async fn count_for_task(&self, task_id: TaskId) -> NoteRepositoryResult<usize> {
        self.run_blocking(NoteRepositoryError::persistence, move |connection| {
            let count = task_notes::table
                .filter(task_notes::task_id.eq(task_id.into_inner()))
                .count()
                .get_result::<i64>(connection)
                .map_err(NoteRepositoryError::persistence)?;
            usize::try_from(count).map_err(NoteRepositoryError::persistence)
        })
        .await
    }
}

fn row_to_note(row: NoteRow) -> TaskNote {
    TaskNote::from_persisted(PersistedNoteData {
        id: NoteId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        author_id: UserId::from_uuid(row.author_id),
        text: row.text,
        is_admin_note: row.is_admin_note,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

impl From<DieselError> for NoteRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}
