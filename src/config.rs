//! Store configuration read from the environment.
//!
//! Variables use the `WORKBOARD_` prefix:
//!
//! - `WORKBOARD_DATABASE_URL` (required)
//! - `WORKBOARD_POOL_SIZE` (default 10)
//! - `WORKBOARD_CONNECTION_TIMEOUT_SECS` (default 30)

use crate::storage::{PgPool, PostgresStore};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

const ENV_PREFIX: &str = "WORKBOARD_";

/// Errors raised while loading configuration or building the pool.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was missing or malformed.
    #[error("invalid workboard configuration: {0}")]
    Environment(#[from] envy::Error),
    /// The pool size must allow at least one connection.
    #[error("pool size must be at least 1")]
    EmptyPool,
    /// The connection pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Connection settings for the `PostgreSQL` store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Maximum number of pooled connections.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    /// Seconds to wait for a free connection.
    #[serde(default = "default_connection_timeout_secs")]
    pub connection_timeout_secs: u64,
}

const fn default_pool_size() -> u32 {
    10
}

const fn default_connection_timeout_secs() -> u64 {
    30
}

impl StoreConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Environment`] when a variable is missing or
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::validated(envy::prefixed(ENV_PREFIX).from_env::<Self>()?)
    }

    /// Reads the configuration from explicit key/value pairs, using the same
    /// prefixed names as [`Self::from_env`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Environment`] when a variable is missing or
    /// cannot be parsed.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self::validated(envy::prefixed(ENV_PREFIX).from_iter::<_, Self>(vars)?)
    }

    /// Returns the connection timeout as a [`Duration`].
    #[must_use]
    pub const fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }

    /// Builds an r2d2 connection pool from these settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pool`] when the pool cannot establish its
    /// initial connections.
    pub fn build_pool(&self) -> Result<PgPool, ConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(&self.database_url);
        let pool = Pool::builder()
            .max_size(self.pool_size)
            .connection_timeout(self.connection_timeout())
            .build(manager)?;
        info!(pool_size = self.pool_size, "postgres pool ready");
        Ok(pool)
    }

    /// Builds a [`PostgresStore`] over a fresh pool.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pool`] when the pool cannot be built.
    pub fn connect(&self) -> Result<PostgresStore, ConfigError> {
        Ok(PostgresStore::new(self.build_pool()?))
    }

    fn validated(config: Self) -> Result<Self, ConfigError> {
        if config.pool_size == 0 {
            return Err(ConfigError::EmptyPool);
        }
        Ok(config)
    }
}
