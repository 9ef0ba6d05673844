//! Workboard: project and task management core.
//!
//! This crate provides the domain core of a project/task management
//! backend: projects staffed through role-gated assignments, tasks moving
//! through an approval lifecycle, and per-task note ledgers.
//!
//! # Architecture
//!
//! Workboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and identity lookups
//! - **Services**: Orchestration of load, validate, mutate, persist
//! - **Storage**: Concrete implementations of every repository port
//!
//! # Modules
//!
//! - [`identity`]: User and role lookups consumed from an identity system
//! - [`project`]: Project catalogue, membership and active-project pointers
//! - [`task`]: Task lifecycle state machine
//! - [`note`]: Task note ledger
//! - [`storage`]: In-memory and `PostgreSQL` stores
//! - [`config`]: Environment-driven store configuration

pub mod config;
pub mod identity;
pub mod note;
pub mod project;
pub mod storage;
pub mod task;
