//! Closed set of roles a user can hold.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role held by a user.
///
/// Role names coming from the identity system are matched exactly against
/// their upper-case canonical form. Anything else is kept verbatim as
/// [`Role::Other`] so it can be reported, but it never grants assignment
/// eligibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Role {
    /// Software developer; may be assigned to projects and tasks.
    Developer,
    /// Operations engineer; may be assigned to projects and tasks.
    DevOps,
    /// Project or team manager.
    Manager,
    /// Organization administrator.
    Admin,
    /// Plain organization member without delivery duties.
    Member,
    /// Role name not known to the core.
    Other(String),
}

impl Role {
    /// Parses a role name using exact, case-sensitive matching.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "DEVELOPER" => Self::Developer,
            "DEVOPS" => Self::DevOps,
            "MANAGER" => Self::Manager,
            "ADMIN" => Self::Admin,
            "MEMBER" => Self::Member,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Returns the canonical role name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Developer => "DEVELOPER",
            Self::DevOps => "DEVOPS",
            Self::Manager => "MANAGER",
            Self::Admin => "ADMIN",
            Self::Member => "MEMBER",
            Self::Other(name) => name,
        }
    }

    /// Returns `true` when users holding this role may be assigned to
    /// projects and tasks.
    #[must_use]
    pub const fn is_assignable(&self) -> bool {
        matches!(self, Self::Developer | Self::DevOps)
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
