//! Storage adapters implementing every repository port.
//!
//! Each adapter is a single store that implements all repository traits, so
//! writes spanning several aggregates (a note plus its task's unread flag, a
//! project plus its assignments) stay atomic.
//!
//! - [`memory::InMemoryStore`] for tests and embedded harnesses
//! - [`postgres::PostgresStore`] for `PostgreSQL` via Diesel

pub mod memory;
pub mod postgres;

pub use memory::InMemoryStore;
pub use postgres::{PgPool, PostgresStore};
