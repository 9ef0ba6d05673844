//! Shared world state for project membership BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use workboard::identity::{adapters::memory::InMemoryDirectory, domain::UserId};
use workboard::project::{
    domain::{Project, ProjectAssignment, ProjectId},
    services::{
        MembershipError, MembershipService, ProjectCatalogueService, ProjectServiceError,
    },
};
use workboard::storage::InMemoryStore;
use workboard::task::services::TaskLifecycleService;

/// Task service used for project cascades.
pub type TestTaskService =
    TaskLifecycleService<InMemoryStore, InMemoryStore, InMemoryDirectory, DefaultClock>;

/// Membership service used by the BDD world.
pub type TestMembershipService =
    MembershipService<InMemoryStore, InMemoryStore, InMemoryDirectory, DefaultClock>;

/// Catalogue service used by the BDD world.
pub type TestCatalogueService =
    ProjectCatalogueService<InMemoryStore, TestTaskService, DefaultClock>;

/// Scenario world for project membership behaviour tests.
pub struct MembershipWorld {
    pub directory: Arc<InMemoryDirectory>,
    pub membership: TestMembershipService,
    pub catalogue: TestCatalogueService,
    pub users: HashMap<String, UserId>,
    pub project_id: Option<ProjectId>,
    pub last_assignment: Option<Result<ProjectAssignment, MembershipError>>,
    pub last_removal: Option<bool>,
    pub last_status_change: Option<Result<Project, ProjectServiceError>>,
}

impl MembershipWorld {
    /// Creates a world backed by empty in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let directory = Arc::new(InMemoryDirectory::new());
        let clock = Arc::new(DefaultClock);
        let tasks = Arc::new(TaskLifecycleService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&directory),
            Arc::clone(&clock),
        ));
        let membership = MembershipService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&directory),
            Arc::clone(&clock),
        );
        let catalogue = ProjectCatalogueService::new(store, tasks, clock);
        Self {
            directory,
            membership,
            catalogue,
            users: HashMap::new(),
            project_id: None,
            last_assignment: None,
            last_removal: None,
            last_status_change: None,
        }
    }

    /// Returns the scenario's project.
    ///
    /// # Errors
    ///
    /// Returns an error when no project has been created yet.
    pub fn project_id(&self) -> Result<ProjectId, eyre::Report> {
        self.project_id
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
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
}

impl Default for MembershipWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> MembershipWorld {
    MembershipWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
