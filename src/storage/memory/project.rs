//! Project, assignment and active-project repositories over the arena.

use super::{InMemoryStore, ordered};
use crate::identity::domain::UserId;
use crate::project::{
    domain::{Project, ProjectAssignment, ProjectId, ProjectStatus, UserActiveProject},
    ports::{
        ActiveProjectRepository, ActiveProjectRepositoryError, AssignmentRepository,
        AssignmentRepositoryError, AssignmentRepositoryResult, ProjectRepository,
        ProjectRepositoryError, ProjectRepositoryResult,
    },
};
use async_trait::async_trait;

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.write().map_err(ProjectRepositoryError::persistence)?;
        if state.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }
        let slot = state.slot(project.clone());
        state.projects.insert(project.id(), slot);
        Ok(())
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.write().map_err(ProjectRepositoryError::persistence)?;
        let slot = state
            .projects
            .get_mut(&project.id())
            .ok_or(ProjectRepositoryError::NotFound(project.id()))?;
        if slot.value.version() + 1 != project.version() {
            return Err(ProjectRepositoryError::ConcurrentModification(project.id()));
        }
        slot.value = project.clone();
        Ok(())
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<bool> {
        let mut state = self.write().map_err(ProjectRepositoryError::persistence)?;
        if state.projects.remove(&id).is_none() {
            return Ok(false);
        }
        state
            .assignments
            .retain(|assignment| assignment.project_id() != id);
        state
            .active_projects
            .retain(|_, pointer| pointer.project_id() != id);
        Ok(true)
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        Ok(state.projects.get(&id).map(|slot| slot.value.clone()))
    }

    async fn find_by_status(&self, status: ProjectStatus) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        Ok(ordered(
            state
                .projects
                .values()
                .filter(|slot| slot.value.status() == status),
            Project::created_at,
        ))
    }

    async fn find_by_owner(&self, owner_id: UserId) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.read().map_err(ProjectRepositoryError::persistence)?;
        Ok(ordered(
            state
                .projects
                .values()
                .filter(|slot| slot.value.owner_id() == Some(owner_id)),
            Project::created_at,
        ))
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryStore {
    async fn store(&self, assignment: &ProjectAssignment) -> AssignmentRepositoryResult<()> {
        let mut state = self.write().map_err(AssignmentRepositoryError::persistence)?;
        let duplicate = state.assignments.iter().any(|existing| {
            existing.project_id() == assignment.project_id()
                && existing.user_id() == assignment.user_id()
        });
        if duplicate {
            return Err(AssignmentRepositoryError::DuplicateAssignment {
                project_id: assignment.project_id(),
                user_id: assignment.user_id(),
            });
        }
        state.assignments.push(assignment.clone());
        Ok(())
    }

    async fn exists_for_project_and_user(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> AssignmentRepositoryResult<bool> {
        let state = self.read().map_err(AssignmentRepositoryError::persistence)?;
        Ok(state
            .assignments
            .iter()
            .any(|a| a.project_id() == project_id && a.user_id() == user_id))
    }

    async fn delete_for_project_and_user(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> AssignmentRepositoryResult<bool> {
        let mut state = self.write().map_err(AssignmentRepositoryError::persistence)?;
        let before = state.assignments.len();
        state
            .assignments
            .retain(|a| !(a.project_id() == project_id && a.user_id() == user_id));
        Ok(state.assignments.len() != before)
    }

    async fn find_by_project(
        &self,
        project_id: ProjectId,
    ) -> AssignmentRepositoryResult<Vec<ProjectAssignment>> {
        let state = self.read().map_err(AssignmentRepositoryError::persistence)?;
        let mut found: Vec<ProjectAssignment> = state
            .assignments
            .iter()
            .filter(|a| a.project_id() == project_id)
            .cloned()
            .collect();
        found.sort_by_key(ProjectAssignment::created_at);
        Ok(found)
    }

    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> AssignmentRepositoryResult<Vec<ProjectAssignment>> {
        let state = self.read().map_err(AssignmentRepositoryError::persistence)?;
        let mut found: Vec<ProjectAssignment> = state
            .assignments
            .iter()
            .filter(|a| a.user_id() == user_id)
            .cloned()
            .collect();
        found.sort_by_key(ProjectAssignment::created_at);
        Ok(found)
    }
}

#[async_trait]
impl ActiveProjectRepository for InMemoryStore {
    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<UserActiveProject>, ActiveProjectRepositoryError> {
        let state = self.read().map_err(ActiveProjectRepositoryError::persistence)?;
        Ok(state.active_projects.get(&user_id).cloned())
    }

    async fn upsert(
        &self,
        pointer: &UserActiveProject,
    ) -> Result<(), ActiveProjectRepositoryError> {
        let mut state = self.write().map_err(ActiveProjectRepositoryError::persistence)?;
        state
            .active_projects
            .insert(pointer.user_id(), pointer.clone());
        Ok(())
    }
}
