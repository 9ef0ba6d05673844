//! Given steps for project membership BDD scenarios.

use super::world::{MembershipWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use workboard::identity::domain::{Role, UserId, UserProfile};
use workboard::project::services::CreateProjectRequest;

#[given(r#"a project named "{name}""#)]
fn project_named(world: &mut MembershipWorld, name: String) -> Result<(), eyre::Report> {
    let project = run_async(world.catalogue.create(CreateProjectRequest::new(name)))
        .wrap_err("create scenario project")?;
    world.project_id = Some(project.id());
    Ok(())
}

#[given(r#"a user "{name}" with role "{role}""#)]
fn user_with_role(
    world: &mut MembershipWorld,
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

#[given(r#""{name}" is assigned to the project"#)]
fn user_already_assigned(world: &mut MembershipWorld, name: String) -> Result<(), eyre::Report> {
    let project_id = world.project_id()?;
    let user_id = world.user(&name)?;
    run_async(world.membership.assign(project_id, user_id))
        .wrap_err("assign scenario user")?;
    Ok(())
}
