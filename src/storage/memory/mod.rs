//! In-memory store for tests and embedded harnesses.
//!
//! All aggregates live in one arena guarded by a single `RwLock`, which
//! serializes writers and makes every cascade atomic.

mod note;
mod project;
mod task;

use crate::identity::domain::UserId;
use crate::note::domain::TaskNote;
use crate::project::domain::{Project, ProjectAssignment, ProjectId, UserActiveProject};
use crate::task::domain::{Task, TaskId};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;

/// Thread-safe in-memory store implementing every repository port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

/// Raised when a writer panicked while holding the store lock.
#[derive(Debug, Error)]
#[error("in-memory store lock poisoned: {0}")]
pub struct StorePoisoned(String);

/// An arena slot remembering insertion order for stable tie-breaking.
#[derive(Debug, Clone)]
struct Slot<T> {
    sequence: u64,
    value: T,
}

#[derive(Debug, Default)]
struct StoreState {
    next_sequence: u64,
    projects: HashMap<ProjectId, Slot<Project>>,
    assignments: Vec<ProjectAssignment>,
    active_projects: HashMap<UserId, UserActiveProject>,
    tasks: HashMap<TaskId, Slot<Task>>,
    notes: Vec<TaskNote>,
}

impl StoreState {
    const fn slot<T>(&mut self, value: T) -> Slot<T> {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        Slot { sequence, value }
    }

    /// Removes a task's notes along with the task itself.
    fn remove_task(&mut self, id: TaskId) -> bool {
        let removed = self.tasks.remove(&id).is_some();
        if removed {
            self.notes.retain(|note| note.task_id() != id);
        }
        removed
    }
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, StorePoisoned> {
        self.state
            .read()
            .map_err(|err| StorePoisoned(err.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, StorePoisoned> {
        self.state
            .write()
            .map_err(|err| StorePoisoned(err.to_string()))
    }
}

/// Collects matching slot values ordered by creation time, then insertion.
fn ordered<'a, T, F>(
    slots: impl Iterator<Item = &'a Slot<T>>,
    created_at: F,
) -> Vec<T>
where
    T: Clone + 'a,
    F: Fn(&T) -> DateTime<Utc>,
{
    let mut matching: Vec<&Slot<T>> = slots.collect();
    matching.sort_by_key(|slot| (created_at(&slot.value), slot.sequence));
    matching.into_iter().map(|slot| slot.value.clone()).collect()
}
