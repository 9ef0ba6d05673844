//! Versioned task writes against `PostgreSQL`.

use workboard::identity::domain::Role;
use workboard::task::{
    domain::TaskState,
    ports::{TaskRepository, TaskRepositoryError},
    services::TaskLifecycleError,
};

use super::helpers::TestDatabase;

#[tokio::test(flavor = "multi_thread")]
async fn lifecycle_round_trips_through_postgres() -> eyre::Result<()> {
    let Some(db) = TestDatabase::connect()? else {
        return Ok(());
    };
    let tasks = db.tasks();
    let project = db.project("Apollo").await?;
    let dev = db.user("dana", Role::Developer)?;
    let task = db.task(&project, "Implement login").await?;

    tasks.assign(task.id(), dev).await?;
    tasks.finish(task.id()).await?;
    tasks.approve(task.id()).await?;

    let stored = tasks
        .find_by_id(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task vanished"))?;
    eyre::ensure!(stored.state() == TaskState::Approved);
    eyre::ensure!(stored.assignee() == Some(dev));
    eyre::ensure!(stored.assigned_at().is_some());
    eyre::ensure!(stored.completed_at().is_some());
    eyre::ensure!(stored.version() == 3);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn stale_snapshot_cannot_overwrite_newer_state() -> eyre::Result<()> {
    let Some(db) = TestDatabase::connect()? else {
        return Ok(());
    };
    let project = db.project("Apollo").await?;
    let dev = db.user("dana", Role::Developer)?;
    let task = db.task(&project, "Race").await?;

    let mut winner = task.clone();
    winner.assign(dev, &mockable::DefaultClock);
    let mut loser = task.clone();
    loser.mark_notes_read(&mockable::DefaultClock);

    TaskRepository::update(&*db.store, &winner).await?;
    let stale = TaskRepository::update(&*db.store, &loser).await;
    eyre::ensure!(
        matches!(stale, Err(TaskRepositoryError::ConcurrentModification(_))),
        "expected ConcurrentModification, got {stale:?}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn change_status_without_assignee_leaves_row_untouched() -> eyre::Result<()> {
    let Some(db) = TestDatabase::connect()? else {
        return Ok(());
    };
    let tasks = db.tasks();
    let project = db.project("Apollo").await?;
    let task = db.task(&project, "Unowned").await?;

    let result = tasks.change_status(task.id(), "IN_PROGRESS").await;
    eyre::ensure!(matches!(result, Err(TaskLifecycleError::Domain(_))));

    let stored = tasks
        .find_by_id(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task vanished"))?;
    eyre::ensure!(stored.state() == TaskState::NotStarted);
    eyre::ensure!(stored.version() == task.version());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn bulk_delete_is_scoped_to_one_project() -> eyre::Result<()> {
    let Some(db) = TestDatabase::connect()? else {
        return Ok(());
    };
    let tasks = db.tasks();
    let apollo = db.project("Apollo").await?;
    let gemini = db.project("Gemini").await?;
    db.task(&apollo, "One").await?;
    db.task(&apollo, "Two").await?;
    db.task(&gemini, "Three").await?;

    eyre::ensure!(tasks.delete_all_under_project(apollo.id()).await? == 2);
    eyre::ensure!(tasks.delete_all_under_project(apollo.id()).await? == 0);
    eyre::ensure!(tasks.list_by_project(gemini.id()).await?.len() == 1);
    Ok(())
}
