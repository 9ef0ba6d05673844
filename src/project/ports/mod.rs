//! Port contracts for project management.
//!
//! Ports define infrastructure-agnostic interfaces used by project services.

pub mod active;
pub mod assignment;
pub mod cleanup;
pub mod repository;

pub use active::{ActiveProjectRepository, ActiveProjectRepositoryError};
pub use assignment::{AssignmentRepository, AssignmentRepositoryError, AssignmentRepositoryResult};
pub use cleanup::{ProjectTaskCleanup, TaskCleanupError};
pub use repository::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult};
