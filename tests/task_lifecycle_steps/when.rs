//! When steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#"the task is assigned to "{name}""#)]
fn task_assigned(world: &mut TaskLifecycleWorld, name: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let user_id = world.user(&name)?;
    let result = run_async(world.service.assign(task_id, user_id));
    world.record(result);
    Ok(())
}

#[when("the task is finished")]
fn task_finished(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let result = run_async(world.service.finish(task_id));
    world.record(result);
    Ok(())
}

#[when("the task is approved")]
fn task_approved(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let result = run_async(world.service.approve(task_id));
    world.record(result);
    Ok(())
}

#[when(r#"the task status is changed to "{status}""#)]
fn task_status_changed(world: &mut TaskLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let result = run_async(world.service.change_status(task_id, &status));
    world.record(result);
    Ok(())
}
