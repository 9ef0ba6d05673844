//! Project assignment records.

use super::{AssignmentId, ProjectId};
use crate::identity::domain::{Role, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Membership of one user in one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAssignment {
    id: AssignmentId,
    project_id: ProjectId,
    user_id: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAssignmentData {
    /// Persisted assignment identifier.
    pub id: AssignmentId,
    /// Persisted project reference.
    pub project_id: ProjectId,
    /// Persisted user reference.
    pub user_id: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ProjectAssignment {
    /// Creates an assignment timestamped with the current clock time.
    #[must_use]
    pub fn new(project_id: ProjectId, user_id: UserId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: AssignmentId::new(),
            project_id,
            user_id,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs an assignment from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedAssignmentData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            user_id: data.user_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the assignment identifier.
    #[must_use]
    pub const fn id(&self) -> AssignmentId {
        self.id
    }

    /// Returns the project reference.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the assigned user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the time the user was assigned.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Assignment joined with the user's display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedUser {
    /// Assigned user identifier.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role held by the user.
    pub role: Role,
    /// Time the user was assigned to the project.
    pub assigned_at: DateTime<Utc>,
}
