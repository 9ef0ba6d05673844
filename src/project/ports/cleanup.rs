//! Port through which project deletion clears the project's tasks.

use crate::project::domain::ProjectId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Removes every task belonging to a project.
///
/// Implemented by the task lifecycle service so that project deletion never
/// leaves tasks pointing at a missing project.
#[async_trait]
pub trait ProjectTaskCleanup: Send + Sync {
    /// Deletes all tasks under the project and returns how many were removed.
    async fn delete_all_under_project(
        &self,
        project_id: ProjectId,
    ) -> Result<usize, TaskCleanupError>;
}

/// Failure raised while clearing a project's tasks.
#[derive(Debug, Clone, Error)]
#[error("failed to delete tasks of project {project_id}: {cause}")]
pub struct TaskCleanupError {
    /// Project whose tasks could not be deleted.
    pub project_id: ProjectId,
    /// Underlying failure.
    pub cause: Arc<dyn std::error::Error + Send + Sync>,
}
