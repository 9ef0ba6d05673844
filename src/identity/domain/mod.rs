//! Domain values describing users as seen by the workboard core.

mod ids;
mod role;
mod user;

pub use ids::{OrganizationId, UserId};
pub use role::Role;
pub use user::UserProfile;
