//! Shared wiring for in-memory integration tests.
//!
//! Every service shares one [`InMemoryStore`] so cross-context behaviour
//! (cascades, note flags, membership filters) is observable end to end.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use workboard::identity::{
    adapters::memory::InMemoryDirectory,
    domain::{Role, UserId, UserProfile},
};
use workboard::note::services::TaskNoteLedger;
use workboard::project::{
    domain::Project,
    services::{
        ActiveProjectService, CreateProjectRequest, MembershipService, ProjectCatalogueService,
    },
};
use workboard::storage::InMemoryStore;
use workboard::task::{
    domain::{Priority, Task},
    services::{CreateTaskRequest, TaskLifecycleService},
};

/// Task lifecycle service over the in-memory store.
pub type Tasks =
    TaskLifecycleService<InMemoryStore, InMemoryStore, InMemoryDirectory, DefaultClock>;

/// All services of the crate wired over one store and directory.
pub struct Workboard {
    pub store: Arc<InMemoryStore>,
    pub directory: Arc<InMemoryDirectory>,
    pub projects: ProjectCatalogueService<InMemoryStore, Tasks, DefaultClock>,
    pub membership:
        MembershipService<InMemoryStore, InMemoryStore, InMemoryDirectory, DefaultClock>,
    pub active: ActiveProjectService<InMemoryStore, InMemoryStore, InMemoryDirectory, DefaultClock>,
    pub tasks: Arc<Tasks>,
    pub notes: TaskNoteLedger<InMemoryStore, InMemoryStore, DefaultClock>,
}

impl Workboard {
    /// Registers a user with the given role and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory rejects the insert.
    pub fn user(&self, name: &str, role: Role) -> eyre::Result<UserId> {
        let id = UserId::new();
        self.directory.insert(UserProfile::new(
            id,
            name,
            format!("{name}@example.com"),
            role,
        ))?;
        Ok(id)
    }

    /// Creates a project with the given name.
    ///
    /// # Errors
    ///
    /// Returns an error when project creation fails.
    pub async fn project(&self, name: &str) -> eyre::Result<Project> {
        Ok(self.projects.create(CreateProjectRequest::new(name)).await?)
    }

    /// Creates an unassigned medium-priority task in a project.
    ///
    /// # Errors
    ///
    /// Returns an error when task creation fails.
    pub async fn task(&self, project: &Project, name: &str) -> eyre::Result<Task> {
        let written = self
            .tasks
            .create(CreateTaskRequest::new(name, Priority::Medium, project.id()))
            .await?;
        Ok(written.task)
    }
}

/// Provides a fully wired workboard over empty stores.
#[fixture]
pub fn board() -> Workboard {
    let store = Arc::new(InMemoryStore::new());
    let directory = Arc::new(InMemoryDirectory::new());
    let clock = Arc::new(DefaultClock);
    let tasks = Arc::new(TaskLifecycleService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::clone(&directory),
        Arc::clone(&clock),
    ));
    Workboard {
        projects: ProjectCatalogueService::new(
            Arc::clone(&store),
            Arc::clone(&tasks),
            Arc::clone(&clock),
        ),
        membership: MembershipService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&directory),
            Arc::clone(&clock),
        ),
        active: ActiveProjectService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&directory),
            Arc::clone(&clock),
        ),
        notes: TaskNoteLedger::new(Arc::clone(&store), Arc::clone(&store), Arc::clone(&clock)),
        tasks,
        store,
        directory,
    }
}
