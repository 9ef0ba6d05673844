//! Repository port for project persistence and lookup.

use crate::identity::domain::UserId;
use crate::project::domain::{Project, ProjectId, ProjectStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateProject`] when the project
    /// ID already exists.
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Persists changes to an existing project.
    ///
    /// The stored version must be exactly one behind `project.version()`;
    /// otherwise another writer got there first.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does not
    /// exist or [`ProjectRepositoryError::ConcurrentModification`] when the
    /// stored version does not match.
    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Deletes a project together with its assignments and the active-project
    /// pointers referring to it.
    ///
    /// Returns `false` when the project did not exist.
    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<bool>;

    /// Finds a project by identifier.
    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Returns all projects with the given status, oldest first.
    async fn find_by_status(&self, status: ProjectStatus) -> ProjectRepositoryResult<Vec<Project>>;

    /// Returns all projects owned by the given user, oldest first.
    async fn find_by_owner(&self, owner_id: UserId) -> ProjectRepositoryResult<Vec<Project>>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// The project was modified by another writer since it was loaded.
    #[error("project {0} was modified concurrently")]
    ConcurrentModification(ProjectId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
