//! Per-user pointer to the project currently in focus.

use super::{ActiveProjectId, ProjectId};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A user's current-focus project. At most one exists per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActiveProject {
    id: ActiveProjectId,
    user_id: UserId,
    project_id: ProjectId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted active-project pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedActiveProjectData {
    /// Persisted pointer identifier.
    pub id: ActiveProjectId,
    /// Persisted user reference.
    pub user_id: UserId,
    /// Persisted project reference.
    pub project_id: ProjectId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl UserActiveProject {
    /// Creates a pointer for a user without one.
    #[must_use]
    pub fn new(user_id: UserId, project_id: ProjectId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ActiveProjectId::new(),
            user_id,
            project_id,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a pointer from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedActiveProjectData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            project_id: data.project_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the pointer identifier.
    #[must_use]
    pub const fn id(&self) -> ActiveProjectId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the project in focus.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Points the user at a different project.
    pub fn focus(&mut self, project_id: ProjectId, clock: &impl Clock) {
        self.project_id = project_id;
        self.updated_at = clock.utc();
    }
}
