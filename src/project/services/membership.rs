//! Service layer for staffing projects.
//!
//! Assignment is gated by role: only users whose role is assignable (see
//! [`crate::identity::domain::Role::is_assignable`]) may join a project, and
//! each user may be assigned to a given project at most once.

use crate::identity::{
    domain::{Role, UserId},
    ports::{IdentityDirectory, IdentityError},
};
use crate::project::{
    domain::{AssignedUser, Project, ProjectAssignment, ProjectId, ProjectStatus},
    ports::{
        AssignmentRepository, AssignmentRepositoryError, ProjectRepository,
        ProjectRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Service-level errors for project membership operations.
#[derive(Debug, Error)]
pub enum MembershipError {
    /// The user is already assigned to the project.
    #[error("user {user_id} is already assigned to project {project_id}")]
    Conflict {
        /// Target project.
        project_id: ProjectId,
        /// Target user.
        user_id: UserId,
    },
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// The user's role does not allow project assignment.
    #[error("user {user_id} with role {role} cannot be assigned to projects")]
    RoleNotEligible {
        /// Rejected user.
        user_id: UserId,
        /// Role the user holds.
        role: Role,
    },
    /// Project repository operation failed.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),
    /// Assignment repository operation failed.
    #[error(transparent)]
    Assignments(#[from] AssignmentRepositoryError),
    /// Identity lookup failed.
    #[error(transparent)]
    Identity(#[from] IdentityError),
}

/// Result type for membership operations.
pub type MembershipResult<T> = Result<T, MembershipError>;

/// Project membership orchestration service.
#[derive(Clone)]
pub struct MembershipService<P, A, I, C>
where
    P: ProjectRepository,
    A: AssignmentRepository,
    I: IdentityDirectory,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    assignments: Arc<A>,
    identity: Arc<I>,
    clock: Arc<C>,
}

impl<P, A, I, C> MembershipService<P, A, I, C>
where
    P: ProjectRepository,
    A: AssignmentRepository,
    I: IdentityDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new membership service.
    #[must_use]
    pub const fn new(
        projects: Arc<P>,
        assignments: Arc<A>,
        identity: Arc<I>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            projects,
            assignments,
            identity,
            clock,
        }
    }

    /// Assigns a user to a project.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError::Conflict`] when the pair already exists,
    /// [`MembershipError::ProjectNotFound`] or
    /// [`MembershipError::UserNotFound`] when either side is missing, and
    /// [`MembershipError::RoleNotEligible`] when the user's role is not
    /// assignable.
    pub async fn assign(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> MembershipResult<ProjectAssignment> {
        if self
            .assignments
            .exists_for_project_and_user(project_id, user_id)
            .await?
        {
            return Err(MembershipError::Conflict {
                project_id,
                user_id,
            });
        }
        if self.projects.find_by_id(project_id).await?.is_none() {
            return Err(MembershipError::ProjectNotFound(project_id));
        }
        let role = self
            .identity
            .role_of(user_id)
            .await?
            .ok_or(MembershipError::UserNotFound(user_id))?;
        if !role.is_assignable() {
            return Err(MembershipError::RoleNotEligible { user_id, role });
        }

        let assignment = ProjectAssignment::new(project_id, user_id, &*self.clock);
        self.assignments
            .store(&assignment)
            .await
            .map_err(|err| match err {
                AssignmentRepositoryError::DuplicateAssignment {
                    project_id: existing_project,
                    user_id: existing_user,
                } => MembershipError::Conflict {
                    project_id: existing_project,
                    user_id: existing_user,
                },
                other => other.into(),
            })?;
        info!(%project_id, %user_id, %role, "user assigned to project");
        Ok(assignment)
    }

    /// Removes a user from a project.
    ///
    /// Succeeds whether or not the user was assigned; the returned flag tells
    /// whether an assignment was actually removed.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError::Assignments`] when persistence fails.
    pub async fn remove(&self, project_id: ProjectId, user_id: UserId) -> MembershipResult<bool> {
        let removed = self
            .assignments
            .delete_for_project_and_user(project_id, user_id)
            .await?;
        debug!(%project_id, %user_id, removed, "user removed from project");
        Ok(removed)
    }

    /// Returns `true` when the user is assigned to the project.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError::Assignments`] when persistence fails.
    pub async fn is_assigned(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> MembershipResult<bool> {
        Ok(self
            .assignments
            .exists_for_project_and_user(project_id, user_id)
            .await?)
    }

    /// Lists a project's members with their display data, in assignment
    /// order.
    ///
    /// Users that the identity directory no longer knows are left out.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError`] when persistence or identity lookup fails.
    pub async fn list_assigned_users(
        &self,
        project_id: ProjectId,
    ) -> MembershipResult<Vec<AssignedUser>> {
        let assignments = self.assignments.find_by_project(project_id).await?;
        let mut members = Vec::with_capacity(assignments.len());
        for assignment in assignments {
            let Some(user) = self.identity.find_user(assignment.user_id()).await? else {
                debug!(
                    %project_id,
                    user_id = %assignment.user_id(),
                    "skipping unknown assigned user"
                );
                continue;
            };
            members.push(AssignedUser {
                user_id: user.id(),
                name: user.name().to_owned(),
                email: user.email().to_owned(),
                role: user.role().clone(),
                assigned_at: assignment.created_at(),
            });
        }
        Ok(members)
    }

    /// Lists the `Active` projects a user is assigned to, in assignment
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError`] when persistence lookup fails.
    pub async fn projects_for_user(&self, user_id: UserId) -> MembershipResult<Vec<Project>> {
        let assignments = self.assignments.find_by_user(user_id).await?;
        let mut projects = Vec::with_capacity(assignments.len());
        for assignment in assignments {
            if let Some(project) = self.projects.find_by_id(assignment.project_id()).await? {
                if project.status() == ProjectStatus::Active {
                    projects.push(project);
                }
            }
        }
        Ok(projects)
    }
}
