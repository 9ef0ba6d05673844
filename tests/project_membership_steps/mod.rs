//! Step definitions for project membership scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
