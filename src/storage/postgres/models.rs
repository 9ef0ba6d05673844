//! Diesel row models for workboard persistence.
//!
//! Rows that are both inserted and updated derive [`AsChangeset`]; the
//! primary key is skipped by the derive and `None` writes `NULL`.

use super::schema::{project_assignments, projects, task_notes, tasks, user_active_projects};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Project row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct ProjectRow {
    /// Project identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional owning user.
    pub owner_id: Option<Uuid>,
    /// Status name.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency version.
    pub version: i64,
}

/// Assignment row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = project_assignments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AssignmentRow {
    /// Assignment identifier.
    pub id: Uuid,
    /// Staffed project.
    pub project_id: Uuid,
    /// Assigned user.
    pub user_id: Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Active-project pointer row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = user_active_projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActiveProjectRow {
    /// Pointer identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Focused project.
    pub project_id: Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Task row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct TaskRow {
    /// Task identifier.
    pub id: Uuid,
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Priority name.
    pub priority: String,
    /// Owning project.
    pub project_id: Uuid,
    /// Optional estimate in hours.
    pub estimated_hours: Option<i32>,
    /// State name.
    pub state: String,
    /// Optional assignee.
    pub assignee_id: Option<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// First start timestamp.
    pub started_at: Option<DateTime<Utc>>,
    /// Approval timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Assignment timestamp.
    pub assigned_at: Option<DateTime<Utc>>,
    /// Unread-notes flag.
    pub has_unread_notes: bool,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic concurrency version.
    pub version: i64,
}

/// Note query row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_notes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NoteRow {
    /// Note identifier.
    pub id: Uuid,
    /// Parent task.
    pub task_id: Uuid,
    /// Author.
    pub author_id: Uuid,
    /// Note text.
    pub text: String,
    /// Admin marker.
    pub is_admin_note: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Note insert model; the sequence column is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_notes)]
pub struct NewNoteRow {
    /// Note identifier.
    pub id: Uuid,
    /// Parent task.
    pub task_id: Uuid,
    /// Author.
    pub author_id: Uuid,
    /// Note text.
    pub text: String,
    /// Admin marker.
    pub is_admin_note: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
