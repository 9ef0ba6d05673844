//! Task lifecycle management.
//!
//! Tasks belong to a project and move through a bounded lifecycle: they are
//! assigned to an eligible user, started, submitted for approval, and finally
//! approved or rejected. Direct status changes bypass the named transitions
//! but still refuse states that need an assignee when none is set. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
