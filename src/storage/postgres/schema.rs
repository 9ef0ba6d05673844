//! Diesel schema for workboard persistence.

diesel::table! {
    /// Project records.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Optional owning user.
        owner_id -> Nullable<Uuid>,
        /// Project status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Optimistic concurrency version.
        version -> Int8,
    }
}

diesel::table! {
    /// User-to-project staffing records.
    project_assignments (id) {
        /// Assignment identifier.
        id -> Uuid,
        /// Staffed project.
        project_id -> Uuid,
        /// Assigned user.
        user_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One current-focus project per user.
    user_active_projects (id) {
        /// Pointer identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Focused project.
        project_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Task priority.
        #[max_length = 10]
        priority -> Varchar,
        /// Owning project.
        project_id -> Uuid,
        /// Optional estimate in hours.
        estimated_hours -> Nullable<Int4>,
        /// Task lifecycle state.
        #[max_length = 50]
        state -> Varchar,
        /// Optional assignee.
        assignee_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// First start timestamp.
        started_at -> Nullable<Timestamptz>,
        /// Approval timestamp.
        completed_at -> Nullable<Timestamptz>,
        /// Assignment timestamp.
        assigned_at -> Nullable<Timestamptz>,
        /// Unread-notes flag.
        has_unread_notes -> Bool,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Optimistic concurrency version.
        version -> Int8,
    }
}

diesel::table! {
    /// Notes attached to tasks.
    task_notes (id) {
        /// Note identifier.
        id -> Uuid,
        /// Insertion sequence used to order notes created at the same instant.
        sequence -> Int8,
        /// Parent task.
        task_id -> Uuid,
        /// Author.
        author_id -> Uuid,
        /// Note text.
        text -> Text,
        /// Admin marker.
        is_admin_note -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(project_assignments -> projects (project_id));
diesel::joinable!(user_active_projects -> projects (project_id));
diesel::joinable!(tasks -> projects (project_id));
diesel::joinable!(task_notes -> tasks (task_id));

diesel::allow_tables_to_appear_in_same_query!(
    projects,
    project_assignments,
    user_active_projects,
    tasks,
    task_notes,
);
