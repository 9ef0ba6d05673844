//! When steps for project membership BDD scenarios.

use super::world::{MembershipWorld, run_async};
use rstest_bdd_macros::when;
use workboard::identity::domain::UserId;

#[when(r#""{name}" is assigned to the project"#)]
fn user_assigned(world: &mut MembershipWorld, name: String) -> Result<(), eyre::Report> {
    let project_id = world.project_id()?;
    let user_id = world.user(&name)?;
    world.last_assignment = Some(run_async(world.membership.assign(project_id, user_id)));
    Ok(())
}

#[when("an unknown user is assigned to the project")]
fn unknown_user_assigned(world: &mut MembershipWorld) -> Result<(), eyre::Report> {
    let project_id = world.project_id()?;
    world.last_assignment = Some(run_async(
        world.membership.assign(project_id, UserId::new()),
    ));
    Ok(())
}

#[when(r#""{name}" is removed from the project"#)]
fn user_removed(world: &mut MembershipWorld, name: String) -> Result<(), eyre::Report> {
    let project_id = world.project_id()?;
    let user_id = world.user(&name)?;
    world.last_removal = Some(run_async(world.membership.remove(project_id, user_id))?);
    Ok(())
}

#[when(r#"the project status is set to "{status}""#)]
fn project_status_set(world: &mut MembershipWorld, status: String) -> Result<(), eyre::Report> {
    let project_id = world.project_id()?;
    world.last_status_change = Some(run_async(
        world.catalogue.set_status(project_id, &status),
    ));
    Ok(())
}
