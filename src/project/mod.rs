//! Project catalogue and membership management.
//!
//! Projects are staffed through assignments, and only users holding an
//! assignable role may be assigned. Each user may additionally point at one
//! "active" project as their current focus. Deleting a project first clears
//! every task under it through [`ports::ProjectTaskCleanup`]. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]
//!
//! Storage adapters live in [`crate::storage`].

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
