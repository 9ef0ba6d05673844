//! Notes attached to tasks.
//!
//! Notes form a per-task ledger ordered by creation time. Appending a note
//! marks the parent task as having unread notes; the flag is cleared only by
//! the task lifecycle service.

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
