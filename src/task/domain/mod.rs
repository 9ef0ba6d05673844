//! Domain model for the task lifecycle.
//!
//! The task aggregate owns its state machine: every named lifecycle
//! operation validates its guard against the current state and assignee
//! before mutating anything, and milestone timestamps are written only by
//! the operations that own them.

mod error;
mod ids;
mod patch;
mod state;
mod task;

pub use error::{ParsePriorityError, ParseTaskStateError, TaskDomainError};
pub use ids::TaskId;
pub use patch::TaskPatch;
pub use state::{Priority, TaskState};
pub use task::{NewTask, PersistedTaskData, Task};
