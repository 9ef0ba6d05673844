//! Project aggregate root.

use super::{ProjectDomainError, ProjectId, ProjectPatch, ProjectStatus};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: Option<String>,
    owner_id: Option<UserId>,
    status: ProjectStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: u64,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted name.
    pub name: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted owner, if any.
    pub owner_id: Option<UserId>,
    /// Persisted status.
    pub status: ProjectStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted optimistic concurrency version.
    pub version: u64,
}

impl Project {
    /// Creates a new `Active` project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyProjectName`] when the name is blank.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        owner_id: Option<UserId>,
        clock: &impl Clock,
    ) -> Result<Self, ProjectDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: ProjectId::new(),
            name: validated_name(name.into())?,
            description,
            owner_id,
            status: ProjectStatus::Active,
            created_at: timestamp,
            updated_at: timestamp,
            version: 0,
        })
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            owner_id: data.owner_id,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
            version: data.version,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the project description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the owning user, if any.
    #[must_use]
    pub const fn owner_id(&self) -> Option<UserId> {
        self.owner_id
    }

    /// Returns the project status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the optimistic concurrency version.
    ///
    /// Starts at zero and increases by one with every persisted mutation.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Sets the project status.
    pub fn set_status(&mut self, status: ProjectStatus, clock: &impl Clock) {
        self.status = status;
        self.touch(clock);
    }

    /// Applies a partial update, overwriting only the fields present in the
    /// patch.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyProjectName`] when the patch carries
    /// a blank name. The project is left unchanged in that case.
    pub fn apply_patch(
        &mut self,
        patch: ProjectPatch,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        let ProjectPatch {
            name,
            description,
            status,
        } = patch;
        let validated = name.map(validated_name).transpose()?;

        if let Some(new_name) = validated {
            self.name = new_name;
        }
        if let Some(new_description) = description {
            self.description = Some(new_description);
        }
        if let Some(new_status) = status {
            self.status = new_status;
        }
        self.touch(clock);
        Ok(())
    }

    /// Records a mutation: refreshes the modification time and advances the
    /// version the repository will check against.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
        self.version += 1;
    }
}

fn validated_name(name: String) -> Result<String, ProjectDomainError> {
    if name.trim().is_empty() {
        return Err(ProjectDomainError::EmptyProjectName);
    }
    Ok(name)
}
