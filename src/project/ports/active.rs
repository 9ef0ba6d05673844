//! Repository port for active-project pointers.

use crate::identity::domain::UserId;
use crate::project::domain::UserActiveProject;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Active-project pointer persistence contract.
#[async_trait]
pub trait ActiveProjectRepository: Send + Sync {
    /// Finds the pointer owned by a user.
    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<UserActiveProject>, ActiveProjectRepositoryError>;

    /// Inserts or replaces the pointer owned by `pointer.user_id()`.
    async fn upsert(&self, pointer: &UserActiveProject) -> Result<(), ActiveProjectRepositoryError>;
}

/// Errors returned by active-project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ActiveProjectRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActiveProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
