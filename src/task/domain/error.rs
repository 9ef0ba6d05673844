//! Error types for task domain validation and parsing.

use super::{TaskId, TaskState};
use thiserror::Error;

/// Errors returned while constructing tasks or applying lifecycle
/// operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The operation requires an assignee and the task has none.
    #[error("task {0} must be assigned to a user first")]
    Unassigned(TaskId),

    /// The operation is not permitted from the task's current state.
    #[error("cannot {operation} task {task_id} while it is {state}")]
    InvalidState {
        /// Task that rejected the operation.
        task_id: TaskId,
        /// Lifecycle operation that was attempted.
        operation: &'static str,
        /// State the task was in.
        state: TaskState,
    },
}

/// Error returned while parsing task states.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task state: {0}")]
pub struct ParseTaskStateError(pub String);

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
