//! Service layer for the per-user active-project pointer.

use crate::identity::{
    domain::UserId,
    ports::{IdentityDirectory, IdentityError},
};
use crate::project::{
    domain::{ProjectId, UserActiveProject},
    ports::{
        ActiveProjectRepository, ActiveProjectRepositoryError, ProjectRepository,
        ProjectRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for active-project operations.
#[derive(Debug, Error)]
pub enum ActiveProjectError {
    /// The user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// Pointer repository operation failed.
    #[error(transparent)]
    Repository(#[from] ActiveProjectRepositoryError),
    /// Project repository operation failed.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),
    /// Identity lookup failed.
    #[error(transparent)]
    Identity(#[from] IdentityError),
}

/// Result type for active-project operations.
pub type ActiveProjectResult<T> = Result<T, ActiveProjectError>;

/// Tracks which project each user currently has in focus.
#[derive(Clone)]
pub struct ActiveProjectService<R, P, I, C>
where
    R: ActiveProjectRepository,
    P: ProjectRepository,
    I: IdentityDirectory,
    C: Clock + Send + Sync,
{
    pointers: Arc<R>,
    projects: Arc<P>,
    identity: Arc<I>,
    clock: Arc<C>,
}

impl<R, P, I, C> ActiveProjectService<R, P, I, C>
where
    R: ActiveProjectRepository,
    P: ProjectRepository,
    I: IdentityDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new active-project service.
    #[must_use]
    pub const fn new(pointers: Arc<R>, projects: Arc<P>, identity: Arc<I>, clock: Arc<C>) -> Self {
        Self {
            pointers,
            projects,
            identity,
            clock,
        }
    }

    /// Returns the project the user currently has in focus.
    ///
    /// # Errors
    ///
    /// Returns [`ActiveProjectError::Repository`] when persistence lookup
    /// fails.
    pub async fn get(&self, user_id: UserId) -> ActiveProjectResult<Option<ProjectId>> {
        Ok(self
            .pointers
            .find_by_user(user_id)
            .await?
            .map(|pointer| pointer.project_id()))
    }

    /// Points the user at a project, replacing any previous focus.
    ///
    /// # Errors
    ///
    /// Returns [`ActiveProjectError::UserNotFound`] or
    /// [`ActiveProjectError::ProjectNotFound`] when either side is missing.
    pub async fn set(
        &self,
        user_id: UserId,
        project_id: ProjectId,
    ) -> ActiveProjectResult<UserActiveProject> {
        if !self.identity.exists(user_id).await? {
            return Err(ActiveProjectError::UserNotFound(user_id));
        }
        if self.projects.find_by_id(project_id).await?.is_none() {
            return Err(ActiveProjectError::ProjectNotFound(project_id));
        }

        let pointer = match self.pointers.find_by_user(user_id).await? {
            Some(mut existing) => {
                existing.focus(project_id, &*self.clock);
                existing
            }
            None => UserActiveProject::new(user_id, project_id, &*self.clock),
        };
        self.pointers.upsert(&pointer).await?;
        debug!(%user_id, %project_id, "active project set");
        Ok(pointer)
    }
}
