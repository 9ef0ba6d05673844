//! Domain model for projects, assignments and active-project pointers.

mod active;
mod assignment;
mod error;
mod ids;
mod patch;
mod project;
mod status;

pub use active::{PersistedActiveProjectData, UserActiveProject};
pub use assignment::{AssignedUser, PersistedAssignmentData, ProjectAssignment};
pub use error::{ParseProjectStatusError, ProjectDomainError};
pub use ids::{ActiveProjectId, AssignmentId, ProjectId};
pub use patch::ProjectPatch;
pub use project::{PersistedProjectData, Project};
pub use status::ProjectStatus;
