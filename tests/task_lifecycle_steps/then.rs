//! Then steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use rstest_bdd_macros::then;
use workboard::task::{
    domain::{Task, TaskDomainError, TaskState},
    services::TaskLifecycleError,
};

/// Reloads the task so assertions see what was persisted.
fn stored_task(world: &TaskLifecycleWorld) -> Result<Task, eyre::Report> {
    let task_id = world.task()?.id();
    run_async(world.service.find_by_id(task_id))?
        .ok_or_else(|| eyre::eyre!("task {task_id} disappeared"))
}

fn last_error(world: &TaskLifecycleWorld) -> Result<&TaskLifecycleError, eyre::Report> {
    match world.last_result.as_ref() {
        Some(Err(err)) => Ok(err),
        Some(Ok(task)) => Err(eyre::eyre!("expected a failure, task is {}", task.state())),
        None => Err(eyre::eyre!("no operation has been attempted")),
    }
}

#[then(r#"the task state is "{state}""#)]
fn task_state_is(world: &TaskLifecycleWorld, state: String) -> Result<(), eyre::Report> {
    let expected = TaskState::try_from(state.as_str())
        .map_err(|err| eyre::eyre!("invalid expected state in scenario: {err}"))?;
    let task = stored_task(world)?;
    eyre::ensure!(
        task.state() == expected,
        "expected state {expected}, found {}",
        task.state()
    );
    Ok(())
}

#[then("the task has an assignment timestamp")]
fn has_assignment_timestamp(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(stored_task(world)?.assigned_at().is_some());
    Ok(())
}

#[then("the task has no start timestamp")]
fn has_no_start_timestamp(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(stored_task(world)?.started_at().is_none());
    Ok(())
}

#[then("the task has a completion timestamp")]
fn has_completion_timestamp(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(stored_task(world)?.completed_at().is_some());
    Ok(())
}

#[then("the task has no assignee")]
fn has_no_assignee(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(stored_task(world)?.assignee().is_none());
    Ok(())
}

#[then("the operation fails because the task is unassigned")]
fn fails_unassigned(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    eyre::ensure!(
        matches!(err, TaskLifecycleError::Domain(TaskDomainError::Unassigned(_))),
        "expected Unassigned, got {err:?}"
    );
    Ok(())
}

#[then("the operation fails because the role is not eligible")]
fn fails_role_not_eligible(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    eyre::ensure!(
        matches!(err, TaskLifecycleError::RoleNotEligible { .. }),
        "expected RoleNotEligible, got {err:?}"
    );
    Ok(())
}

#[then("the operation fails because of the task state")]
fn fails_invalid_state(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    eyre::ensure!(
        matches!(
            err,
            TaskLifecycleError::Domain(TaskDomainError::InvalidState { .. })
        ),
        "expected InvalidState, got {err:?}"
    );
    Ok(())
}

#[then("the operation fails because the status is unknown")]
fn fails_unknown_status(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    eyre::ensure!(
        matches!(err, TaskLifecycleError::InvalidStatus(_)),
        "expected InvalidStatus, got {err:?}"
    );
    Ok(())
}
