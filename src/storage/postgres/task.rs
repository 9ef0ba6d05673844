//! Task repository for `PostgreSQL`.

use super::{
    PostgresStore,
    models::TaskRow,
    schema::tasks,
    version_from_row, version_to_row,
};
use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{PersistedTaskData, Priority, Task, TaskId, TaskState},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

#[async_trait]
impl TaskRepository for PostgresStore {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_task_row(task)?;
        self.run_blocking(TaskRepositoryError::persistence, move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let row = to_task_row(task)?;
        self.run_blocking(TaskRepositoryError::persistence, move |connection| {
            connection.transaction(|tx| update_versioned(tx, &row))
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        // Notes go with the row via ON DELETE CASCADE.
        self.run_blocking(TaskRepositoryError::persistence, move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn delete_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize> {
        self.run_blocking(TaskRepositoryError::persistence, move |connection| {
            diesel::delete(tasks::table.filter(tasks::project_id.eq(project_id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(TaskRepositoryError::persistence, move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(TaskRepositoryError::persistence, move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .order(tasks::created_at.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_assignee(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(TaskRepositoryError::persistence, move |connection| {
            let rows = tasks::table
                .filter(tasks::assignee_id.eq(user_id.into_inner()))
                .order(tasks::created_at.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_project_and_assignee(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(TaskRepositoryError::persistence, move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .filter(tasks::assignee_id.eq(user_id.into_inner()))
                .order(tasks::created_at.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

/// Writes a task row only when the stored version is one behind the row's.
///
/// Must run inside a transaction so the follow-up existence check sees the
/// same snapshot as the failed update.
pub(super) fn update_versioned(
    connection: &mut PgConnection,
    row: &TaskRow,
) -> TaskRepositoryResult<()> {
    let task_id = TaskId::from_uuid(row.id);
    let updated = diesel::update(
        tasks::table
            .filter(tasks::id.eq(row.id))
            .filter(tasks::version.eq(row.version - 1)),
    )
    .set(row)
    .execute(connection)
    .map_err(TaskRepositoryError::persistence)?;
    if updated == 1 {
        return Ok(());
    }

    let exists = diesel::select(diesel::dsl::exists(tasks::table.filter(tasks::id.eq(row.id))))
        .get_result::<bool>(connection)
        .map_err(TaskRepositoryError::persistence)?;
    if exists {
        Err(TaskRepositoryError::ConcurrentModification(task_id))
    } else {
        Err(TaskRepositoryError::NotFound(task_id))
    }
}

pub(super) fn to_task_row(task: &Task) -> TaskRepositoryResult<TaskRow> {
    let estimated_hours = task
        .estimated_hours()
        .map(i32::try_from)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    Ok(TaskRow {
        id: task.id().into_inner(),
        name: task.name().to_owned(),
        description: task.description().map(str::to_owned),
        priority: task.priority().as_str().to_owned(),
        project_id: task.project_id().into_inner(),
        estimated_hours,
        state: task.state().as_str().to_owned(),
        assignee_id: task.assignee().map(UserId::into_inner),
        created_at: task.created_at(),
        started_at: task.started_at(),
        completed_at: task.completed_at(),
        assigned_at: task.assigned_at(),
        has_unread_notes: task.has_unread_notes(),
        updated_at: task.updated_at(),
        version: version_to_row(task.version()).map_err(TaskRepositoryError::persistence)?,
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        name,
        description,
        priority: persisted_priority,
        project_id,
        estimated_hours: persisted_hours,
        state: persisted_state,
        assignee_id,
        created_at,
        started_at,
        completed_at,
        assigned_at,
        has_unread_notes,
        updated_at,
        version: persisted_version,
    } = row;

    let priority =
        Priority::try_from(persisted_priority.as_str()).map_err(TaskRepositoryError::persistence)?;
    let state =
        TaskState::try_from(persisted_state.as_str()).map_err(TaskRepositoryError::persistence)?;
    let estimated_hours = persisted_hours
        .map(u32::try_from)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    let version = version_from_row(persisted_version).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        name,
        description,
        priority,
        project_id: ProjectId::from_uuid(project_id),
        estimated_hours,
        state,
        assignee: assignee_id.map(UserId::from_uuid),
        created_at,
        started_at,
        completed_at,
        assigned_at,
        has_unread_notes,
        updated_at,
        version,
    }))
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}
