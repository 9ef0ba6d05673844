//! Task repository over the arena.

use super::{InMemoryStore, ordered};
use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        let slot = state.slot(task.clone());
        state.tasks.insert(task.id(), slot);
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        let slot = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        if slot.value.version() + 1 != task.version() {
            return Err(TaskRepositoryError::ConcurrentModification(task.id()));
        }
        slot.value = task.clone();
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        Ok(state.remove_task(id))
    }

    async fn delete_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        let doomed: Vec<TaskId> = state
            .tasks
            .values()
            .filter(|slot| slot.value.project_id() == project_id)
            .map(|slot| slot.value.id())
            .collect();
        for id in &doomed {
            state.remove_task(*id);
        }
        Ok(doomed.len())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state.tasks.get(&id).map(|slot| slot.value.clone()))
    }

    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(ordered(
            state
                .tasks
                .values()
                .filter(|slot| slot.value.project_id() == project_id),
            Task::created_at,
        ))
    }

    async fn find_by_assignee(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(ordered(
            state
                .tasks
                .values()
                .filter(|slot| slot.value.assignee() == Some(user_id)),
            Task::created_at,
        ))
    }

    async fn find_by_project_and_assignee(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(ordered(
            state.tasks.values().filter(|slot| {
                slot.value.project_id() == project_id && slot.value.assignee() == Some(user_id)
            }),
            Task::created_at,
        ))
    }
}
