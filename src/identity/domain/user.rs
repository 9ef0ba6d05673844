//! User profile snapshot returned by identity lookups.

use super::{OrganizationId, Role, UserId};
use serde::{Deserialize, Serialize};

/// Read-only view of a user as needed by the workboard core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    id: UserId,
    name: String,
    email: String,
    role: Role,
    organization_id: Option<OrganizationId>,
}

impl UserProfile {
    /// Creates a profile without organization membership.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
            organization_id: None,
        }
    }

    /// Sets the organization the user belongs to.
    #[must_use]
    pub const fn with_organization(mut self, organization_id: OrganizationId) -> Self {
        self.organization_id = Some(organization_id);
        self
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the user's role.
    #[must_use]
    pub const fn role(&self) -> &Role {
        &self.role
    }

    /// Returns the organization the user belongs to, if any.
    #[must_use]
    pub const fn organization_id(&self) -> Option<OrganizationId> {
        self.organization_id
    }

    /// Returns `true` when the user belongs to an organization.
    #[must_use]
    pub const fn is_organization_member(&self) -> bool {
        self.organization_id.is_some()
    }
}
