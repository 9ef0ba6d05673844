//! Adapter implementations for the identity directory port.

pub mod memory;
