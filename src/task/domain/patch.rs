//! Partial update for task fields.

use super::{Priority, TaskState};
use crate::identity::domain::UserId;

/// Partial update applied to a [`super::Task`].
///
/// Only fields set to `Some` overwrite the task. A state carried by a patch
/// is applied as-is, without lifecycle guards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement priority.
    pub priority: Option<Priority>,
    /// Replacement estimate in hours.
    pub estimated_hours: Option<u32>,
    /// Replacement state.
    pub state: Option<TaskState>,
    /// Replacement assignee. Role eligibility is checked by the caller.
    pub assignee: Option<UserId>,
}

impl TaskPatch {
    /// Creates an empty patch.
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

    /// Sets the replacement state.
    #[must_use]
    pub const fn with_state(mut self, state: TaskState) -> Self {
        self.state = Some(state);
        self
    }

    /// Sets the replacement assignee.
    #[must_use]
    pub const fn with_assignee(mut self, user_id: UserId) -> Self {
        self.assignee = Some(user_id);
        self
    }
}
