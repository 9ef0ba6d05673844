//! Given steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use workboard::identity::domain::{Role, UserId, UserProfile};
use workboard::project::{domain::Project, ports::ProjectRepository};
use workboard::task::{domain::Priority, services::CreateTaskRequest};

#[given(r#"a project named "{name}""#)]
fn project_named(world: &mut TaskLifecycleWorld, name: String) -> Result<(), eyre::Report> {
    let project = Project::new(name, None, None, &DefaultClock)?;
    run_async(ProjectRepository::store(&*world.store, &project))
        .wrap_err("store scenario project")?;
    world.project_id = Some(project.id());
    Ok(())
}

#[given(r#"a user "{name}" with role "{role}""#)]
fn user_with_role(
    world: &mut TaskLifecycleWorld,
    name: String,
    role: String,
) -> Result<(), eyre::Report> {
    let id = UserId::new();
    world.directory.insert(UserProfile::new(
        id,
        name.clone(),
        format!("{name}@example.com"),
        Role::from_name(&role),
    ))?;
    world.users.insert(name, id);
    Ok(())
}

#[given(r#"a task named "{name}" in the project"#)]
fn task_in_project(world: &mut TaskLifecycleWorld, name: String) -> Result<(), eyre::Report> {
    let project_id = world
        .project_id
        .ok_or_else(|| eyre::eyre!("missing project in scenario world"))?;
    let written = run_async(
        world
            .service
            .create(CreateTaskRequest::new(name, Priority::Medium, project_id)),
    )
    .wrap_err("create scenario task")?;
    world.task = Some(written.task);
    Ok(())
}
