//! Directory port resolving users and their roles.

use crate::identity::domain::{Role, UserId, UserProfile};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity lookups.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Read-only user directory provided by the identity system.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Finds a user profile by identifier.
    ///
    /// Returns `None` when the user does not exist.
    async fn find_user(&self, id: UserId) -> IdentityResult<Option<UserProfile>>;

    /// Returns the role held by a user, or `None` when the user does not
    /// exist.
    async fn role_of(&self, id: UserId) -> IdentityResult<Option<Role>> {
        Ok(self.find_user(id).await?.map(|user| user.role().clone()))
    }

    /// Returns `true` when the user exists.
    async fn exists(&self, id: UserId) -> IdentityResult<bool> {
        Ok(self.find_user(id).await?.is_some())
    }
}

/// Errors returned by identity directory implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// The identity system could not be reached.
    #[error("identity lookup failed: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityError {
    /// Wraps a lookup failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
