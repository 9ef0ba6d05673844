//! In-memory user directory for tests and embedded callers.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{UserId, UserProfile},
    ports::{IdentityDirectory, IdentityError, IdentityResult},
};

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    users: Arc<RwLock<HashMap<UserId, UserProfile>>>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a user profile.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Unavailable`] when the directory lock is
    /// poisoned.
    pub fn insert(&self, user: UserProfile) -> IdentityResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|err| IdentityError::unavailable(std::io::Error::other(err.to_string())))?;
        users.insert(user.id(), user);
        Ok(())
    }
}

#[async_trait]
impl IdentityDirectory for InMemoryDirectory {
    async fn find_user(&self, id: UserId) -> IdentityResult<Option<UserProfile>> {
        let users = self
            .users
            .read()
            .map_err(|err| IdentityError::unavailable(std::io::Error::other(err.to_string())))?;
        Ok(users.get(&id).cloned())
    }
}
