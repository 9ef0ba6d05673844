//! Then steps for project membership BDD scenarios.

use super::world::{MembershipWorld, run_async};
use rstest_bdd_macros::then;
use workboard::project::{
    domain::ProjectStatus,
    services::{MembershipError, ProjectServiceError},
};

fn assignment_error(world: &MembershipWorld) -> Result<&MembershipError, eyre::Report> {
    match world.last_assignment.as_ref() {
        Some(Err(err)) => Ok(err),
        Some(Ok(assignment)) => Err(eyre::eyre!(
            "expected a failure, got assignment {}",
            assignment.id()
        )),
        None => Err(eyre::eyre!("no assignment has been attempted")),
    }
}

fn member_names(world: &MembershipWorld) -> Result<Vec<String>, eyre::Report> {
    let members = run_async(world.membership.list_assigned_users(world.project_id()?))?;
    Ok(members.into_iter().map(|member| member.name).collect())
}

#[then(r#"the project members are "{names}""#)]
fn project_members_are(world: &MembershipWorld, names: String) -> Result<(), eyre::Report> {
    let expected: Vec<String> = names.split(", ").map(str::to_owned).collect();
    let actual = member_names(world)?;
    eyre::ensure!(actual == expected, "expected members {expected:?}, found {actual:?}");
    Ok(())
}

#[then("the project has no members")]
fn project_has_no_members(world: &MembershipWorld) -> Result<(), eyre::Report> {
    let actual = member_names(world)?;
    eyre::ensure!(actual.is_empty(), "expected no members, found {actual:?}");
    Ok(())
}

#[then(r#"the project is listed for "{name}""#)]
fn project_listed_for(world: &MembershipWorld, name: String) -> Result<(), eyre::Report> {
    let project_id = world.project_id()?;
    let projects = run_async(world.membership.projects_for_user(world.user(&name)?))?;
    eyre::ensure!(projects.iter().any(|project| project.id() == project_id));
    Ok(())
}

#[then(r#"the project is not listed for "{name}""#)]
fn project_not_listed_for(world: &MembershipWorld, name: String) -> Result<(), eyre::Report> {
    let project_id = world.project_id()?;
    let projects = run_async(world.membership.projects_for_user(world.user(&name)?))?;
    eyre::ensure!(projects.iter().all(|project| project.id() != project_id));
    Ok(())
}

#[then("the assignment fails with a conflict")]
fn assignment_conflicts(world: &MembershipWorld) -> Result<(), eyre::Report> {
    let err = assignment_error(world)?;
    eyre::ensure!(
        matches!(err, MembershipError::Conflict { .. }),
        "expected Conflict, got {err:?}"
    );
    Ok(())
}

#[then("the assignment fails because the role is not eligible")]
fn assignment_role_not_eligible(world: &MembershipWorld) -> Result<(), eyre::Report> {
    let err = assignment_error(world)?;
    eyre::ensure!(
        matches!(err, MembershipError::RoleNotEligible { .. }),
        "expected RoleNotEligible, got {err:?}"
    );
    Ok(())
}

#[then("the assignment fails because the user does not exist")]
fn assignment_user_not_found(world: &MembershipWorld) -> Result<(), eyre::Report> {
    let err = assignment_error(world)?;
    eyre::ensure!(
        matches!(err, MembershipError::UserNotFound(_)),
        "expected UserNotFound, got {err:?}"
    );
    Ok(())
}

#[then("a membership was removed")]
fn membership_removed(world: &MembershipWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(world.last_removal == Some(true));
    Ok(())
}

#[then("no membership was removed")]
fn membership_not_removed(world: &MembershipWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(world.last_removal == Some(false));
    Ok(())
}

#[then(r#"the project status is "{status}""#)]
fn project_status_is(world: &MembershipWorld, status: String) -> Result<(), eyre::Report> {
    let expected = ProjectStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let project = run_async(world.catalogue.find_by_id(world.project_id()?))?
        .ok_or_else(|| eyre::eyre!("project disappeared"))?;
    eyre::ensure!(
        project.status() == expected,
        "expected status {expected}, found {}",
        project.status()
    );
    Ok(())
}

#[then("the status change fails as invalid")]
fn status_change_invalid(world: &MembershipWorld) -> Result<(), eyre::Report> {
    match world.last_status_change.as_ref() {
        Some(Err(ProjectServiceError::InvalidStatus(_))) => Ok(()),
        other => Err(eyre::eyre!("expected InvalidStatus, got {other:?}")),
    }
}
