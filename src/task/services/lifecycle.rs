//! Service layer for the task lifecycle.
//!
//! Every mutating operation follows the same shape: load the task, let the
//! domain aggregate validate and apply the change, then persist it with an
//! optimistic version check.

use super::requests::{AssignmentOutcome, CreateTaskRequest, TaskWrite, UpdateTaskRequest};
use crate::identity::{
    domain::{Role, UserId},
    ports::{IdentityDirectory, IdentityError},
};
use crate::project::{
    domain::ProjectId,
    ports::{ProjectRepository, ProjectRepositoryError, ProjectTaskCleanup, TaskCleanupError},
};
use crate::task::{
    domain::{NewTask, ParseTaskStateError, Task, TaskDomainError, TaskId, TaskPatch, TaskState},
    ports::{TaskRepository, TaskRepositoryError},
};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation or a lifecycle guard failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The requested state is not a known task state.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStateError),
    /// The task's project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The user to assign does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// The user's role does not allow task assignment.
    #[error("user {user_id} with role {role} cannot be assigned to tasks")]
    RoleNotEligible {
        /// Rejected user.
        user_id: UserId,
        /// Role the user holds.
        role: Role,
    },
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Project repository operation failed.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),
    /// Identity lookup failed.
    #[error(transparent)]
    Identity(#[from] IdentityError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, P, I, C>
where
    R: TaskRepository,
    P: ProjectRepository,
    I: IdentityDirectory,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    projects: Arc<P>,
    identity: Arc<I>,
    clock: Arc<C>,
}

impl<R, P, I, C> TaskLifecycleService<R, P, I, C>
where
    R: TaskRepository,
    P: ProjectRepository,
    I: IdentityDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        projects: Arc<P>,
        identity: Arc<I>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            projects,
            identity,
            clock,
        }
    }

    /// Creates a task in [`TaskState::NotStarted`].
    ///
    /// A requested assignee is attached only when the user exists and holds
    /// an assignable role; otherwise the task is created unassigned and the
    /// returned [`AssignmentOutcome`] says why.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::ProjectNotFound`] when the project does
    /// not exist, or [`TaskLifecycleError`] when validation or persistence
    /// fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<TaskWrite> {
        let CreateTaskRequest {
            name,
            priority,
            project_id,
            description,
            estimated_hours,
            assignee,
            assigned_at,
        } = request;
        if self.projects.find_by_id(project_id).await?.is_none() {
            return Err(TaskLifecycleError::ProjectNotFound(project_id));
        }

        let mut task = Task::new(
            NewTask {
                name,
                description,
                priority,
                project_id,
                estimated_hours,
            },
            &*self.clock,
        )?;
        let assignment = self.screen_assignee(task.id(), assignee).await?;
        if let AssignmentOutcome::Assigned(user_id) = assignment {
            task.attach_assignee(user_id, assigned_at, &*self.clock);
        }

        self.repository.store(&task).await?;
        info!(task_id = %task.id(), %project_id, "task created");
        Ok(TaskWrite { task, assignment })
    }

    /// Applies a partial update to a task.
    ///
    /// Returns `Ok(None)` when the task does not exist. The requested
    /// assignee is screened exactly as in [`Self::create`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when a supplied name is blank or
    /// persistence fails.
    pub async fn update(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<Option<TaskWrite>> {
        let Some(mut task) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };
        let UpdateTaskRequest {
            name,
            description,
            priority,
            estimated_hours,
            state,
            assignee,
        } = request;

        let assignment = self.screen_assignee(id, assignee).await?;
        let patch = TaskPatch {
            name,
            description,
            priority,
            estimated_hours,
            state,
            assignee: match assignment {
                AssignmentOutcome::Assigned(user_id) => Some(user_id),
                _ => None,
            },
        };
        task.apply_patch(patch, &*self.clock)?;
        self.repository.update(&task).await?;
        debug!(task_id = %id, version = task.version(), "task updated");
        Ok(Some(TaskWrite { task, assignment }))
    }

    /// Deletes a task and its notes.
    ///
    /// Returns `false` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn delete(&self, id: TaskId) -> TaskLifecycleResult<bool> {
        let deleted = self.repository.delete(id).await?;
        debug!(task_id = %id, deleted, "task delete requested");
        Ok(deleted)
    }

    /// Assigns a task to a user.
    ///
    /// A task in [`TaskState::NotStarted`] moves to [`TaskState::InProgress`]
    /// in the same step.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] with `NotFound` for an
    /// unknown task, [`TaskLifecycleError::UserNotFound`] for an unknown user
    /// and [`TaskLifecycleError::RoleNotEligible`] when the user's role is not
    /// assignable. The task is left unchanged on every failure.
    pub async fn assign(&self, id: TaskId, user_id: UserId) -> TaskLifecycleResult<Task> {
        let mut task = self.find_by_id_or_error(id).await?;
        let role = self
            .identity
            .role_of(user_id)
            .await?
            .ok_or(TaskLifecycleError::UserNotFound(user_id))?;
        if !role.is_assignable() {
            return Err(TaskLifecycleError::RoleNotEligible { user_id, role });
        }

        let previous = task.state();
        task.assign(user_id, &*self.clock);
        self.repository.update(&task).await?;
        info!(task_id = %id, %user_id, from = %previous, to = %task.state(), "task assigned");
        Ok(task)
    }

    /// Starts work on an assigned task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::Unassigned`] (wrapped) when the task has no
    /// assignee.
    pub async fn start(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.transition(id, "start", |task, clock| task.start(clock))
            .await
    }

    /// Submits an assigned task for approval.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::Unassigned`] (wrapped) when the task has no
    /// assignee.
    pub async fn finish(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.transition(id, "finish", |task, clock| task.finish(clock))
            .await
    }

    /// Approves a task awaiting approval.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidState`] (wrapped) unless the task is
    /// waiting for approval.
    pub async fn approve(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.transition(id, "approve", |task, clock| task.approve(clock))
            .await
    }

    /// Rejects a task awaiting approval.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidState`] (wrapped) unless the task is
    /// waiting for approval.
    pub async fn reject(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.transition(id, "reject", |task, clock| task.reject(clock))
            .await
    }

    /// Sets a task's state directly from its textual name
    /// (case-insensitive), bypassing the named-transition guards.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::InvalidStatus`] for unknown state text
    /// and [`TaskDomainError::Unassigned`] (wrapped) when the target state
    /// requires an assignee the task does not have.
    pub async fn change_status(&self, id: TaskId, status: &str) -> TaskLifecycleResult<Task> {
        let target = TaskState::try_from(status)?;
        self.transition(id, "change status of", |task, clock| {
            task.change_status(target, clock)
        })
        .await
    }

    /// Clears the task's unread-notes flag.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the task does not
    /// exist or persistence fails.
    pub async fn mark_notes_read(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.transition(id, "mark notes read on", |task, clock| {
            task.mark_notes_read(clock);
            Ok(())
        })
        .await
    }

    /// Deletes every task under a project and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn delete_all_under_project(
        &self,
        project_id: ProjectId,
    ) -> TaskLifecycleResult<usize> {
        let removed = self.repository.delete_by_project(project_id).await?;
        if removed > 0 {
            info!(%project_id, removed, "deleted project tasks");
        }
        Ok(removed)
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists a project's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_by_project(&self, project_id: ProjectId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.find_by_project(project_id).await?)
    }

    /// Lists the tasks assigned to a user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_by_assignee(&self, user_id: UserId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.find_by_assignee(user_id).await?)
    }

    /// Lists a project's tasks assigned to a user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_by_project_and_assignee(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self
            .repository
            .find_by_project_and_assignee(project_id, user_id)
            .await?)
    }

    /// Loads a task, applies a domain operation and persists the result.
    async fn transition<F>(
        &self,
        id: TaskId,
        operation: &str,
        apply: F,
    ) -> TaskLifecycleResult<Task>
    where
        F: FnOnce(&mut Task, &C) -> Result<(), TaskDomainError> + Send,
    {
        let mut task = self.find_by_id_or_error(id).await?;
        let previous = task.state();
        if let Err(err) = apply(&mut task, &*self.clock) {
            debug!(task_id = %id, operation, %err, "task transition rejected");
            return Err(err.into());
        }
        self.repository.update(&task).await?;
        info!(
            task_id = %id,
            operation,
            from = %previous,
            to = %task.state(),
            "task transition applied"
        );
        Ok(task)
    }

    /// Decides whether a requested assignee can be attached.
    async fn screen_assignee(
        &self,
        task_id: TaskId,
        requested: Option<UserId>,
    ) -> TaskLifecycleResult<AssignmentOutcome> {
        let Some(user_id) = requested else {
            return Ok(AssignmentOutcome::NotRequested);
        };
        let outcome = match self.identity.role_of(user_id).await? {
            None => AssignmentOutcome::SkippedUnknownUser(user_id),
            Some(role) if !role.is_assignable() => {
                AssignmentOutcome::SkippedIneligibleRole { user_id, role }
            }
            Some(_) => AssignmentOutcome::Assigned(user_id),
        };
        if outcome.is_skipped() {
            warn!(%task_id, %user_id, ?outcome, "requested assignee skipped");
        }
        Ok(outcome)
    }

    async fn find_by_id_or_error(&self, id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| TaskRepositoryError::NotFound(id).into())
    }
}

#[async_trait]
impl<R, P, I, C> ProjectTaskCleanup for TaskLifecycleService<R, P, I, C>
where
    R: TaskRepository,
    P: ProjectRepository,
    I: IdentityDirectory,
    C: Clock + Send + Sync,
{
    async fn delete_all_under_project(
        &self,
        project_id: ProjectId,
    ) -> Result<usize, TaskCleanupError> {
        Self::delete_all_under_project(self, project_id)
            .await
            .map_err(|err| TaskCleanupError {
                project_id,
                cause: Arc::new(err),
            })
    }
}
