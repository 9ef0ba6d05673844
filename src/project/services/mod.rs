//! Application services for project management.

mod active;
mod catalogue;
mod membership;

pub use active::{ActiveProjectError, ActiveProjectResult, ActiveProjectService};
pub use catalogue::{
    CreateProjectRequest, ProjectCatalogueService, ProjectServiceError, ProjectServiceResult,
    ProjectUpdate, UpdateProjectRequest,
};
pub use membership::{MembershipError, MembershipResult, MembershipService};
