//! Shared world state for task lifecycle BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use workboard::identity::{adapters::memory::InMemoryDirectory, domain::UserId};
use workboard::project::domain::ProjectId;
use workboard::storage::InMemoryStore;
use workboard::task::{
    domain::Task,
    services::{TaskLifecycleError, TaskLifecycleService},
};

/// Service type used by the BDD world.
pub type TestTaskService =
    TaskLifecycleService<InMemoryStore, InMemoryStore, InMemoryDirectory, DefaultClock>;

/// Scenario world for task lifecycle behaviour tests.
pub struct TaskLifecycleWorld {
    pub store: Arc<InMemoryStore>,
    pub directory: Arc<InMemoryDirectory>,
    pub service: TestTaskService,
    pub users: HashMap<String, UserId>,
    pub project_id: Option<ProjectId>,
    pub task: Option<Task>,
    pub last_result: Option<Result<Task, TaskLifecycleError>>,
}

impl TaskLifecycleWorld {
    /// Creates a world backed by empty in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let directory = Arc::new(InMemoryDirectory::new());
        let service = TaskLifecycleService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&directory),
            Arc::new(DefaultClock),
        );
        Self {
            store,
            directory,
            service,
            users: HashMap::new(),
            project_id: None,
            task: None,
            last_result: None,
        }
    }

    /// Returns the scenario's task.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Looks up a named scenario user.
    ///
    /// # Errors
    ///
    /// Returns an error when the user was never declared.
    pub fn user(&self, name: &str) -> Result<UserId, eyre::Report> {
        self.users
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown scenario user {name}"))
    }

    /// Records an operation result, keeping the task snapshot current.
    pub fn record(&mut self, result: Result<Task, TaskLifecycleError>) {
        if let Ok(ref updated) = result {
            self.task = Some(updated.clone());
        }
        self.last_result = Some(result);
    }
}

impl Default for TaskLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskLifecycleWorld {
    TaskLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
