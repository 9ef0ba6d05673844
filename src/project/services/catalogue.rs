//! Service layer for project creation, updates, status changes and deletion.

use crate::identity::domain::UserId;
use crate::project::{
    domain::{
        ParseProjectStatusError, Project, ProjectDomainError, ProjectId, ProjectPatch,
        ProjectStatus,
    },
    ports::{ProjectRepository, ProjectRepositoryError, ProjectTaskCleanup, TaskCleanupError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: Option<String>,
    owner_id: Option<UserId>,
}

impl CreateProjectRequest {
    /// Creates a request with the required project name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            owner_id: None,
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the owning user.
    #[must_use]
    pub const fn with_owner(mut self, owner_id: UserId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }
}

/// Request payload for a partial project update.
///
/// The status arrives as free text; an unrecognized value is ignored rather
/// than failing the whole update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    name: Option<String>,
    description: Option<String>,
    status: Option<String>,
}

impl UpdateProjectRequest {
    /// Creates an empty update request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the replacement name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the replacement status text.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Outcome of a partial project update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectUpdate {
    /// Project after the update was persisted.
    pub project: Project,
    /// Status text that was ignored because it did not parse.
    pub ignored_status: Option<String>,
}

/// Service-level errors for project catalogue operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// The requested status is not a known project status.
    #[error(transparent)]
    InvalidStatus(#[from] ParseProjectStatusError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
    /// Clearing the project's tasks failed; the project was kept.
    #[error(transparent)]
    TaskCleanup(#[from] TaskCleanupError),
}

/// Result type for project catalogue operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project catalogue orchestration service.
#[derive(Clone)]
pub struct ProjectCatalogueService<P, T, C>
where
    P: ProjectRepository,
    T: ProjectTaskCleanup,
    C: Clock + Send + Sync,
{
    repository: Arc<P>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<P, T, C> ProjectCatalogueService<P, T, C>
where
    P: ProjectRepository,
    T: ProjectTaskCleanup,
    C: Clock + Send + Sync,
{
    /// Creates a new project catalogue service.
    #[must_use]
    pub const fn new(repository: Arc<P>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            repository,
            tasks,
            clock,
        }
    }

    /// Creates a new `Active` project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError`] when the name is blank or the
    /// repository rejects persistence.
    pub async fn create(&self, request: CreateProjectRequest) -> ProjectServiceResult<Project> {
        let CreateProjectRequest {
            name,
            description,
            owner_id,
        } = request;
        let project = Project::new(name, description, owner_id, &*self.clock)?;
        self.repository.store(&project).await?;
        info!(project_id = %project.id(), "project created");
        Ok(project)
    }

    /// Applies a partial update to a project.
    ///
    /// Returns `Ok(None)` when the project does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError`] when a supplied name is blank or
    /// persistence fails.
    pub async fn update(
        &self,
        id: ProjectId,
        request: UpdateProjectRequest,
    ) -> ProjectServiceResult<Option<ProjectUpdate>> {
        let Some(mut project) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        let UpdateProjectRequest {
            name,
            description,
            status,
        } = request;
        let mut patch = ProjectPatch {
            name,
            description,
            status: None,
        };
        let mut ignored_status = None;
        if let Some(raw_status) = status {
            match ProjectStatus::try_from(raw_status.as_str()) {
                Ok(parsed) => patch.status = Some(parsed),
                Err(err) => {
                    warn!(project_id = %id, %err, "ignoring unknown status in project update");
                    ignored_status = Some(raw_status);
                }
            }
        }

        project.apply_patch(patch, &*self.clock)?;
        self.repository.update(&project).await?;
        debug!(project_id = %id, version = project.version(), "project updated");
        Ok(Some(ProjectUpdate {
            project,
            ignored_status,
        }))
    }

    /// Sets a project's status from its textual name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::InvalidStatus`] when the text is not a
    /// known status, or [`ProjectServiceError::Repository`] when the project
    /// does not exist or persistence fails.
    pub async fn set_status(&self, id: ProjectId, status: &str) -> ProjectServiceResult<Project> {
        let parsed = ProjectStatus::try_from(status)?;
        let mut project = self.find_by_id_or_error(id).await?;
        project.set_status(parsed, &*self.clock);
        self.repository.update(&project).await?;
        info!(project_id = %id, status = %parsed, "project status changed");
        Ok(project)
    }

    /// Deletes a project after deleting every task under it.
    ///
    /// Returns `false` when the project does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError`] when task cleanup or project deletion
    /// fails.
    pub async fn delete(&self, id: ProjectId) -> ProjectServiceResult<bool> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        let removed_tasks = self.tasks.delete_all_under_project(id).await?;
        let deleted = self.repository.delete(id).await?;
        info!(project_id = %id, removed_tasks, "project deleted");
        Ok(deleted)
    }

    /// Finds a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, id: ProjectId) -> ProjectServiceResult<Option<Project>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists projects by textual status. Unknown status text yields an empty
    /// list.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_by_status(&self, status: &str) -> ProjectServiceResult<Vec<Project>> {
        let Ok(parsed) = ProjectStatus::try_from(status) else {
            return Ok(Vec::new());
        };
        Ok(self.repository.find_by_status(parsed).await?)
    }

    /// Lists `Active` projects.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_active(&self) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.repository.find_by_status(ProjectStatus::Active).await?)
    }

    /// Lists `Inactive` projects.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_inactive(&self) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.repository.find_by_status(ProjectStatus::Inactive).await?)
    }

    /// Lists projects owned by a user.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_by_owner(&self, owner_id: UserId) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.repository.find_by_owner(owner_id).await?)
    }

    async fn find_by_id_or_error(&self, id: ProjectId) -> ProjectServiceResult<Project> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProjectRepositoryError::NotFound(id).into())
    }
}
