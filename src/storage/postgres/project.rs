//! Project, assignment and active-project repositories for `PostgreSQL`.

use super::{
    PostgresStore,
    models::{ActiveProjectRow, AssignmentRow, ProjectRow},
    schema::{project_assignments, projects, user_active_projects},
    version_from_row, version_to_row,
};
use crate::identity::domain::UserId;
use crate::project::{
    domain::{
        ActiveProjectId, AssignmentId, PersistedActiveProjectData, PersistedAssignmentData,
        PersistedProjectData, Project, ProjectAssignment, ProjectId, ProjectStatus,
        UserActiveProject,
    },
    ports::{
        ActiveProjectRepository, ActiveProjectRepositoryError, AssignmentRepository,
        AssignmentRepositoryError, AssignmentRepositoryResult, ProjectRepository,
        ProjectRepositoryError, ProjectRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

#[async_trait]
impl ProjectRepository for PostgresStore {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let row = to_project_row(project)?;
        self.run_blocking(ProjectRepositoryError::persistence, move |connection| {
            diesel::insert_into(projects::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProject(project_id)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let row = to_project_row(project)?;
        let expected = row.version - 1;
        self.run_blocking(ProjectRepositoryError::persistence, move |connection| {
            connection.transaction(|tx| {
                let updated = diesel::update(
                    projects::table
                        .filter(projects::id.eq(project_id.into_inner()))
                        .filter(projects::version.eq(expected)),
                )
                .set(&row)
                .execute(tx)
                .map_err(ProjectRepositoryError::persistence)?;
                if updated == 1 {
                    return Ok(());
                }
                if project_exists(tx, project_id)? {
                    Err(ProjectRepositoryError::ConcurrentModification(project_id))
                } else {
                    Err(ProjectRepositoryError::NotFound(project_id))
                }
            })
        })
        .await
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<bool> {
        // Assignments and active pointers go with the row via ON DELETE CASCADE.
        self.run_blocking(ProjectRepositoryError::persistence, move |connection| {
            let deleted = diesel::delete(projects::table.filter(projects::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(ProjectRepositoryError::persistence, move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn find_by_status(&self, status: ProjectStatus) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(ProjectRepositoryError::persistence, move |connection| {
            let rows = projects::table
                .filter(projects::status.eq(status.as_str()))
                .order(projects::created_at.asc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }

    async fn find_by_owner(&self, owner_id: UserId) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(ProjectRepositoryError::persistence, move |connection| {
            let rows = projects::table
                .filter(projects::owner_id.eq(owner_id.into_inner()))
                .order(projects::created_at.asc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }
}

#[async_trait]
impl AssignmentRepository for PostgresStore {
    async fn store(&self, assignment: &ProjectAssignment) -> AssignmentRepositoryResult<()> {
        let project_id = assignment.project_id();
        let user_id = assignment.user_id();
        let row = AssignmentRow {
            id: assignment.id().into_inner(),
            project_id: project_id.into_inner(),
            user_id: user_id.into_inner(),
            created_at: assignment.created_at(),
            updated_at: assignment.updated_at(),
        };
        self.run_blocking(AssignmentRepositoryError::persistence, move |connection| {
            diesel::insert_into(project_assignments::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if info.constraint_name()
                            == Some("project_assignments_project_user_key") =>
                    {
                        AssignmentRepositoryError::DuplicateAssignment {
                            project_id,
                            user_id,
                        }
                    }
                    _ => AssignmentRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn exists_for_project_and_user(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> AssignmentRepositoryResult<bool> {
        self.run_blocking(AssignmentRepositoryError::persistence, move |connection| {
            diesel::select(diesel::dsl::exists(
                project_assignments::table
                    .filter(project_assignments::project_id.eq(project_id.into_inner()))
                    .filter(project_assignments::user_id.eq(user_id.into_inner())),
            ))
            .get_result::<bool>(connection)
            .map_err(AssignmentRepositoryError::persistence)
        })
        .await
    }

    async fn delete_for_project_and_user(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> AssignmentRepositoryResult<bool> {
        self.run_blocking(AssignmentRepositoryError::persistence, move |connection| {
            let deleted = diesel::delete(
                project_assignments::table
                    .filter(project_assignments::project_id.eq(project_id.into_inner()))
                    .filter(project_assignments::user_id.eq(user_id.into_inner())),
            )
            .execute(connection)
            .map_err(AssignmentRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn find_by_project(
        &self,
        project_id: ProjectId,
    ) -> AssignmentRepositoryResult<Vec<ProjectAssignment>> {
        self.run_blocking(AssignmentRepositoryError::persistence, move |connection| {
            let rows = project_assignments::table
                .filter(project_assignments::project_id.eq(project_id.into_inner()))
                .order(project_assignments::created_at.asc())
                .select(AssignmentRow::as_select())
                .load::<AssignmentRow>(connection)
                .map_err(AssignmentRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_assignment).collect())
        })
        .await
    }

    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> AssignmentRepositoryResult<Vec<ProjectAssignment>> {
        self.run_blocking(AssignmentRepositoryError::persistence, move |connection| {
            let rows = project_assignments::table
                .filter(project_assignments::user_id.eq(user_id.into_inner()))
                .order(project_assignments::created_at.asc())
                .select(AssignmentRow::as_select())
                .load::<AssignmentRow>(connection)
                .map_err(AssignmentRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_assignment).collect())
        })
        .await
    }
}

#[async_trait]
impl ActiveProjectRepository for PostgresStore {
    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<UserActiveProject>, ActiveProjectRepositoryError> {
        self.run_blocking(ActiveProjectRepositoryError::persistence, move |connection| {
            let row = user_active_projects::table
                .filter(user_active_projects::user_id.eq(user_id.into_inner()))
                .select(ActiveProjectRow::as_select())
                .first::<ActiveProjectRow>(connection)
                .optional()
                .map_err(ActiveProjectRepositoryError::persistence)?;
            Ok(row.map(|found| {
                UserActiveProject::from_persisted(PersistedActiveProjectData {
                    id: ActiveProjectId::from_uuid(found.id),
                    user_id: UserId::from_uuid(found.user_id),
                    project_id: ProjectId::from_uuid(found.project_id),
                    created_at: found.created_at,
                    updated_at: found.updated_at,
                })
            }))
        })
        .await
    }

    async fn upsert(
        &self,
        pointer: &UserActiveProject,
    ) -> Result<(), ActiveProjectRepositoryError> {
        let row = ActiveProjectRow {
            id: pointer.id().into_inner(),
            user_id: pointer.user_id().into_inner(),
            project_id: pointer.project_id().into_inner(),
            created_at: pointer.created_at(),
            updated_at: pointer.updated_at(),
        };
        self.run_blocking(ActiveProjectRepositoryError::persistence, move |connection| {
            diesel::insert_into(user_active_projects::table)
                .values(&row)
                .on_conflict(user_active_projects::user_id)
                .do_update()
                .set((
                    user_active_projects::project_id.eq(row.project_id),
                    user_active_projects::updated_at.eq(row.updated_at),
                ))
                .execute(connection)
                .map_err(ActiveProjectRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }
}

fn project_exists(connection: &mut PgConnection, id: ProjectId) -> ProjectRepositoryResult<bool> {
    diesel::select(diesel::dsl::exists(
        projects::table.filter(projects::id.eq(id.into_inner())),
    ))
    .get_result::<bool>(connection)
    .map_err(ProjectRepositoryError::persistence)
}

fn to_project_row(project: &Project) -> ProjectRepositoryResult<ProjectRow> {
    Ok(ProjectRow {
        id: project.id().into_inner(),
        name: project.name().to_owned(),
        description: project.description().map(str::to_owned),
        owner_id: project.owner_id().map(UserId::into_inner),
        status: project.status().as_str().to_owned(),
        created_at: project.created_at(),
        updated_at: project.updated_at(),
        version: version_to_row(project.version()).map_err(ProjectRepositoryError::persistence)?,
    })
}

fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let status =
        ProjectStatus::try_from(row.status.as_str()).map_err(ProjectRepositoryError::persistence)?;
    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        name: row.name,
        description: row.description,
        owner_id: row.owner_id.map(UserId::from_uuid),
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
        version: version_from_row(row.version).map_err(ProjectRepositoryError::persistence)?,
    }))
}

fn row_to_assignment(row: AssignmentRow) -> ProjectAssignment {
    ProjectAssignment::from_persisted(PersistedAssignmentData {
        id: AssignmentId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        user_id: UserId::from_uuid(row.user_id),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

impl From<DieselError> for ProjectRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}
