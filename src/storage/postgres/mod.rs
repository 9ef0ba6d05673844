//! `PostgreSQL` store backed by Diesel.
//!
//! Diesel is synchronous, so every query runs on the blocking thread pool
//! through [`PostgresStore::run_blocking`]. Versioned updates filter on the
//! expected version inside a transaction and distinguish "gone" from
//! "changed underneath us" when no row matches.

mod models;
mod note;
mod project;
mod schema;
mod task;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use thiserror::Error;

/// `PostgreSQL` connection pool type.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Failure to obtain a connection or to join the blocking task.
#[derive(Debug, Error)]
pub enum BlockingError {
    /// The pool could not hand out a connection.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    /// The blocking task panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// `PostgreSQL`-backed store implementing every repository port.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store from a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T, E, M>(&self, wrap: M, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
        M: Fn(BlockingError) -> E,
    {
        let pool = self.pool.clone();
        let joined = tokio::task::spawn_blocking(move || {
            pool.get()
                .map_err(BlockingError::from)
                .map(|mut connection| f(&mut connection))
        })
        .await
        .map_err(BlockingError::from);
        match joined {
            Ok(Ok(result)) => result,
            Ok(Err(err)) | Err(err) => Err(wrap(err)),
        }
    }
}

/// Converts a stored version into the domain's unsigned counter.
fn version_from_row(version: i64) -> Result<u64, std::num::TryFromIntError> {
    u64::try_from(version)
}

/// Converts a domain version into the stored signed column.
fn version_to_row(version: u64) -> Result<i64, std::num::TryFromIntError> {
    i64::try_from(version)
}
