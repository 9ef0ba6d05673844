//! Task aggregate root.

use super::{Priority, TaskDomainError, TaskId, TaskPatch, TaskState};
use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    name: String,
    description: Option<String>,
    priority: Priority,
    project_id: ProjectId,
    estimated_hours: Option<u32>,
    state: TaskState,
    assignee: Option<UserId>,
    created_at: DateTime<Utc>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    assigned_at: Option<DateTime<Utc>>,
    has_unread_notes: bool,
    updated_at: DateTime<Utc>,
    version: u64,
}

/// Fields supplied when creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Task priority.
    pub priority: Priority,
    /// Owning project.
    pub project_id: ProjectId,
    /// Optional estimate in hours.
    pub estimated_hours: Option<u32>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted name.
    pub name: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted estimate in hours.
    pub estimated_hours: Option<u32>,
    /// Persisted lifecycle state.
    pub state: TaskState,
    /// Persisted assignee.
    pub assignee: Option<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted start timestamp.
    pub started_at: Option<DateTime<Utc>>,
    /// Persisted completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted assignment timestamp.
    pub assigned_at: Option<DateTime<Utc>>,
    /// Persisted unread-notes flag.
    pub has_unread_notes: bool,
    /// Persisted modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted optimistic concurrency version.
    pub version: u64,
}

impl Task {
    /// Creates a new, unassigned task in [`TaskState::NotStarted`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskName`] when the name is blank.
    pub fn new(data: NewTask, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let NewTask {
            name,
            description,
            priority,
            project_id,
            estimated_hours,
        } = data;
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            name: validated_name(name)?,
            description,
            priority,
            project_id,
            estimated_hours,
            state: TaskState::NotStarted,
            assignee: None,
            created_at: timestamp,
            started_at: None,
            completed_at: None,
            assigned_at: None,
            has_unread_notes: false,
            updated_at: timestamp,
            version: 0,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            priority: data.priority,
            project_id: data.project_id,
            estimated_hours: data.estimated_hours,
            state: data.state,
            assignee: data.assignee,
            created_at: data.created_at,
            started_at: data.started_at,
            completed_at: data.completed_at,
            assigned_at: data.assigned_at,
            has_unread_notes: data.has_unread_notes,
            updated_at: data.updated_at,
            version: data.version,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the estimate in hours, if any.
    #[must_use]
    pub const fn estimated_hours(&self) -> Option<u32> {
        self.estimated_hours
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TaskState {
        self.state
    }

    /// Returns the assigned user, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when work first started, if it has.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Returns when the task was approved, if it has been.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns when the current assignee was assigned, if recorded.
    #[must_use]
    pub const fn assigned_at(&self) -> Option<DateTime<Utc>> {
        self.assigned_at
    }

    /// Returns `true` when notes were added since they were last marked read.
    #[must_use]
    pub const fn has_unread_notes(&self) -> bool {
        self.has_unread_notes
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the optimistic concurrency version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Assigns the task to a user and records the assignment time.
    ///
    /// A task that has not started yet moves straight to
    /// [`TaskState::InProgress`]; the start timestamp is left to
    /// [`Task::start`].
    pub fn assign(&mut self, user_id: UserId, clock: &impl Clock) {
        self.assignee = Some(user_id);
        self.assigned_at = Some(clock.utc());
        if self.state == TaskState::NotStarted {
            self.state = TaskState::InProgress;
        }
        self.touch(clock);
    }

    /// Sets the assignee at creation time without moving the state.
    ///
    /// `assigned_at` defaults to the current clock time.
    pub fn attach_assignee(
        &mut self,
        user_id: UserId,
        assigned_at: Option<DateTime<Utc>>,
        clock: &impl Clock,
    ) {
        self.assignee = Some(user_id);
        self.assigned_at = Some(assigned_at.unwrap_or_else(|| clock.utc()));
        self.touch(clock);
    }

    /// Starts work on the task.
    ///
    /// The start timestamp is written only the first time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::Unassigned`] when the task has no assignee
    /// or [`TaskDomainError::InvalidState`] when the task is terminal.
    pub fn start(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_workable("start")?;
        let now = clock.utc();
        self.state = TaskState::InProgress;
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        self.touch(clock);
        Ok(())
    }

    /// Submits the task for approval.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::Unassigned`] when the task has no assignee
    /// or [`TaskDomainError::InvalidState`] when the task is terminal.
    pub fn finish(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_workable("finish")?;
        self.state = TaskState::WaitingForApproval;
        self.touch(clock);
        Ok(())
    }

    /// Approves a task awaiting approval and records its completion time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidState`] unless the task is in
    /// [`TaskState::WaitingForApproval`].
    pub fn approve(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_awaiting_approval("approve")?;
        self.enter_state(TaskState::Approved, clock);
        self.touch(clock);
        Ok(())
    }

    /// Rejects a task awaiting approval.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidState`] unless the task is in
    /// [`TaskState::WaitingForApproval`].
    pub fn reject(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        self.ensure_awaiting_approval("reject")?;
        self.state = TaskState::Rejected;
        self.touch(clock);
        Ok(())
    }

    /// Sets the state directly, bypassing the named-transition guards.
    ///
    /// Only the assignee requirement of [`TaskState::requires_assignee`] is
    /// enforced. Entering [`TaskState::Approved`] records the completion time
    /// if none is set; the start time is left to [`Self::start`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::Unassigned`] when the target state needs an
    /// assignee and the task has none. The task is left unchanged.
    pub fn change_status(
        &mut self,
        target: TaskState,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if target.requires_assignee() && self.assignee.is_none() {
            return Err(TaskDomainError::Unassigned(self.id));
        }
        self.enter_state(target, clock);
        self.touch(clock);
        Ok(())
    }

    /// Raises the unread-notes flag.
    pub fn flag_unread_notes(&mut self, clock: &impl Clock) {
        self.has_unread_notes = true;
        self.touch(clock);
    }

    /// Clears the unread-notes flag.
    pub fn mark_notes_read(&mut self, clock: &impl Clock) {
        self.has_unread_notes = false;
        self.touch(clock);
    }

    /// Applies a partial update, overwriting only the fields present in the
    /// patch.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskName`] when the patch carries a
    /// blank name. The task is left unchanged in that case.
    pub fn apply_patch(
        &mut self,
        patch: TaskPatch,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let TaskPatch {
            name,
            description,
            priority,
            estimated_hours,
            state,
            assignee,
        } = patch;
        let validated = name.map(validated_name).transpose()?;

        if let Some(new_name) = validated {
            self.name = new_name;
        }
        if description.is_some() {
            self.description = description;
        }
        if let Some(new_priority) = priority {
            self.priority = new_priority;
        }
        if estimated_hours.is_some() {
            self.estimated_hours = estimated_hours;
        }
        if let Some(new_state) = state {
            self.enter_state(new_state, clock);
        }
        if assignee.is_some() {
            self.assignee = assignee;
        }
        self.touch(clock);
        Ok(())
    }

    fn ensure_workable(&self, operation: &'static str) -> Result<(), TaskDomainError> {
        if self.assignee.is_none() {
            return Err(TaskDomainError::Unassigned(self.id));
        }
        if self.state.is_terminal() {
            return Err(self.invalid_state(operation));
        }
        Ok(())
    }

    fn ensure_awaiting_approval(&self, operation: &'static str) -> Result<(), TaskDomainError> {
        if self.state == TaskState::WaitingForApproval {
            Ok(())
        } else {
            Err(self.invalid_state(operation))
        }
    }

    const fn invalid_state(&self, operation: &'static str) -> TaskDomainError {
        TaskDomainError::InvalidState {
            task_id: self.id,
            operation,
            state: self.state,
        }
    }

    /// Completion is stamped once, on the first entry into `Approved`.
    fn enter_state(&mut self, target: TaskState, clock: &impl Clock) {
        if target == TaskState::Approved && self.completed_at.is_none() {
            self.completed_at = Some(clock.utc());
        }
        self.state = target;
    }

    /// Records a mutation: refreshes the modification time and advances the
    /// version the repository will check against.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
        self.version += 1;
    }
}

fn validated_name(name: String) -> Result<String, TaskDomainError> {
    if name.trim().is_empty() {
        return Err(TaskDomainError::EmptyTaskName);
    }
    Ok(name)
}
