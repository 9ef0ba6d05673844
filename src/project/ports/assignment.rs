//! Repository port for project assignments.

use crate::identity::domain::UserId;
use crate::project::domain::{ProjectAssignment, ProjectId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for assignment repository operations.
pub type AssignmentRepositoryResult<T> = Result<T, AssignmentRepositoryError>;

/// Assignment persistence contract.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Stores a new assignment.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentRepositoryError::DuplicateAssignment`] when the
    /// (project, user) pair is already assigned.
    async fn store(&self, assignment: &ProjectAssignment) -> AssignmentRepositoryResult<()>;

    /// Returns `true` when the user is assigned to the project.
    async fn exists_for_project_and_user(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> AssignmentRepositoryResult<bool>;

    /// Removes the assignment for the pair, if any.
    ///
    /// Returns `true` when an assignment was removed.
    async fn delete_for_project_and_user(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> AssignmentRepositoryResult<bool>;

    /// Returns the project's assignments ordered by creation time.
    async fn find_by_project(
        &self,
        project_id: ProjectId,
    ) -> AssignmentRepositoryResult<Vec<ProjectAssignment>>;

    /// Returns the user's assignments ordered by creation time.
    async fn find_by_user(&self, user_id: UserId)
    -> AssignmentRepositoryResult<Vec<ProjectAssignment>>;
}

/// Errors returned by assignment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AssignmentRepositoryError {
    /// The user is already assigned to the project.
    #[error("user {user_id} is already assigned to project {project_id}")]
    DuplicateAssignment {
        /// Project of the existing assignment.
        project_id: ProjectId,
        /// User of the existing assignment.
        user_id: UserId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AssignmentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
