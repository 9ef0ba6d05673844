//! Note repository over the arena.
//!
//! Notes are kept in a plain vector, so insertion order is preserved and a
//! stable sort on creation time yields the ledger order.

use super::InMemoryStore;
use crate::identity::domain::UserId;
use crate::note::{
    domain::{NoteId, TaskNote},
    ports::{NoteRepositoryError, NoteRepositoryResult, TaskNoteRepository},
};
use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;

fn ledger_order(mut notes: Vec<TaskNote>) -> Vec<TaskNote> {
    notes.sort_by_key(TaskNote::created_at);
    notes
}

#[async_trait]
impl TaskNoteRepository for InMemoryStore {
    async fn append(&self, note: &TaskNote, task: &Task) -> NoteRepositoryResult<()> {
        let mut state = self.write().map_err(NoteRepositoryError::persistence)?;
        if state.notes.iter().any(|existing| existing.id() == note.id()) {
            return Err(NoteRepositoryError::DuplicateNote(note.id()));
        }
        let slot = state
            .tasks
            .get_mut(&task.id())
            .ok_or(NoteRepositoryError::TaskNotFound(task.id()))?;
        if slot.value.version() + 1 != task.version() {
            return Err(NoteRepositoryError::ConcurrentModification(task.id()));
        }
        slot.value = task.clone();
        state.notes.push(note.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: NoteId) -> NoteRepositoryResult<Option<TaskNote>> {
        let state = self.read().map_err(NoteRepositoryError::persistence)?;
        Ok(state.notes.iter().find(|note| note.id() == id).cloned())
    }

    async fn update(&self, note: &TaskNote) -> NoteRepositoryResult<()> {
        let mut state = self.write().map_err(NoteRepositoryError::persistence)?;
        let stored = state
            .notes
            .iter_mut()
            .find(|existing| existing.id() == note.id())
            .ok_or(NoteRepositoryError::NotFound(note.id()))?;
        *stored = note.clone();
        Ok(())
    }

    async fn delete(&self, id: NoteId) -> NoteRepositoryResult<bool> {
        let mut state = self.write().map_err(NoteRepositoryError::persistence)?;
        let before = state.notes.len();
        state.notes.retain(|note| note.id() != id);
        Ok(state.notes.len() != before)
    }

    async fn list_for_task(&self, task_id: TaskId) -> NoteRepositoryResult<Vec<TaskNote>> {
        let state = self.read().map_err(NoteRepositoryError::persistence)?;
        Ok(ledger_order(
            state
                .notes
                .iter()
                .filter(|note| note.task_id() == task_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_for_task_and_author(
        &self,
        task_id: TaskId,
        author_id: UserId,
    ) -> NoteRepositoryResult<Vec<TaskNote>> {
        let state = self.read().map_err(NoteRepositoryError::persistence)?;
        Ok(ledger_order(
            state
                .notes
                .iter()
                .filter(|note| note.task_id() == task_id && note.author_id() == author_id)
                .cloned()
                .collect(),
        ))
    }

    async fn count_for_task(&self, task_id: TaskId) -> NoteRepositoryResult<usize> {
        let state = self.read().map_err(NoteRepositoryError::persistence)?;
        Ok(state
            .notes
            .iter()
            .filter(|note| note.task_id() == task_id)
            .count())
    }
}
