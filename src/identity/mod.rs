//! Identity and role lookup consumed by the workboard core.
//!
//! Users, credentials and roles are owned by an external identity system.
//! The core only needs to resolve a user identifier into a profile carrying
//! the user's role, so this module defines the port contract and the value
//! types flowing through it:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
