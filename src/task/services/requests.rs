//! Request payloads and write outcomes for task creation and updates.

use crate::identity::domain::{Role, UserId};
use crate::project::domain::ProjectId;
use crate::task::domain::{Priority, Task, TaskState};
use chrono::{DateTime, Utc};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub(super) name: String,
    pub(super) priority: Priority,
    pub(super) project_id: ProjectId,
    pub(super) description: Option<String>,
    pub(super) estimated_hours: Option<u32>,
    pub(super) assignee: Option<UserId>,
    pub(super) assigned_at: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(name: impl Into<String>, priority: Priority, project_id: ProjectId) -> Self {
        Self {
            name: name.into(),
            priority,
            project_id,
            description: None,
            estimated_hours: None,
            assignee: None,
            assigned_at: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the estimate in hours.
    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: u32) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Requests an initial assignee.
    #[must_use]
    pub const fn with_assignee(mut self, user_id: UserId) -> Self {
        self.assignee = Some(user_id);
        self
    }

    /// Overrides the recorded assignment time.
    #[must_use]
    pub const fn with_assigned_at(mut self, assigned_at: DateTime<Utc>) -> Self {
        self.assigned_at = Some(assigned_at);
        self
    }
}

/// Request payload for a partial task update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    pub(super) name: Option<String>,
    pub(super) description: Option<String>,
    pub(super) priority: Option<Priority>,
    pub(super) estimated_hours: Option<u32>,
    pub(super) state: Option<TaskState>,
    pub(super) assignee: Option<UserId>,
}

impl UpdateTaskRequest {
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

    /// Sets the replacement priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the replacement estimate.
    #[must_use]
    pub const fn with_estimated_hours(mut self, hours: u32) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    /// Sets the replacement state. Applied without lifecycle guards.
    #[must_use]
    pub const fn with_state(mut self, state: TaskState) -> Self {
        self.state = Some(state);
        self
    }

    /// Requests a new assignee.
    #[must_use]
    pub const fn with_assignee(mut self, user_id: UserId) -> Self {
        self.assignee = Some(user_id);
        self
    }
}

/// What happened to the assignee requested in a create or update.
///
/// Create and update never fail because of the requested assignee: an
/// unknown user or an ineligible role is skipped and the rest of the write
/// goes through. The variants let callers tell a skip from a success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentOutcome {
    /// No assignee was requested.
    NotRequested,
    /// The requested user was assigned.
    Assigned(UserId),
    /// The requested user does not exist.
    SkippedUnknownUser(UserId),
    /// The requested user's role is not assignable.
    SkippedIneligibleRole {
        /// Skipped user.
        user_id: UserId,
        /// Role the user holds.
        role: Role,
    },
}

impl AssignmentOutcome {
    /// Returns `true` when a requested assignee was skipped.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(
            self,
            Self::SkippedUnknownUser(_) | Self::SkippedIneligibleRole { .. }
        )
    }
}

/// Result of a task create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskWrite {
    /// Task as persisted.
    pub task: Task,
    /// Fate of the requested assignee.
    pub assignment: AssignmentOutcome,
}
