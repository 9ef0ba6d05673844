//! Task lifecycle states and priorities.

use super::{ParsePriorityError, ParseTaskStateError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle state.
///
/// The regular path is `NotStarted → InProgress → WaitingForApproval →
/// {Approved | Rejected}`. `Finished` and `NeedsAdjustment` are only
/// reachable through a direct status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    /// Task has been created but work has not started.
    NotStarted,
    /// Task is being worked on.
    InProgress,
    /// Work is complete but not yet submitted for approval.
    Finished,
    /// Task was sent back for changes.
    NeedsAdjustment,
    /// Task is awaiting an approval decision.
    WaitingForApproval,
    /// Task has been approved.
    Approved,
    /// Task has been rejected.
    Rejected,
}

impl TaskState {
    /// Every state a task can be in.
    pub const ALL: [Self; 7] = [
        Self::NotStarted,
        Self::InProgress,
        Self::Finished,
        Self::NeedsAdjustment,
        Self::WaitingForApproval,
        Self::Approved,
        Self::Rejected,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Finished => "FINISHED",
            Self::NeedsAdjustment => "NEEDS_ADJUSTMENT",
            Self::WaitingForApproval => "WAITING_FOR_APPROVAL",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Returns `true` for states no named lifecycle operation leaves.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Returns `true` for states that cannot be set directly on a task
    /// without an assignee.
    #[must_use]
    pub const fn requires_assignee(self) -> bool {
        matches!(self, Self::InProgress | Self::Finished)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskState {
    type Error = ParseTaskStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == normalized)
            .ok_or_else(|| ParseTaskStateError(value.to_owned()))
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal priority.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}
