//! Repository port for task persistence and lookup.

use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// The stored version must be exactly one behind `task.version()`. This
    /// is what keeps two concurrent transitions of the same task from both
    /// succeeding.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// or [`TaskRepositoryError::ConcurrentModification`] when the stored
    /// version does not match.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task and its notes.
    ///
    /// Returns `false` when the task did not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Deletes every task of a project, with their notes, and returns how
    /// many tasks were removed.
    async fn delete_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the project's tasks, oldest first.
    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the tasks assigned to a user, oldest first.
    async fn find_by_assignee(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the project's tasks assigned to a user, oldest first.
    async fn find_by_project_and_assignee(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task was modified by another writer since it was loaded.
    #[error("task {0} was modified concurrently")]
    ConcurrentModification(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
