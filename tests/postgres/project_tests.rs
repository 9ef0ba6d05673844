//! Project, assignment and active-pointer persistence.

use std::sync::Arc;

use mockable::DefaultClock;
use workboard::identity::domain::Role;
use workboard::project::{
    domain::{ProjectPatch, ProjectStatus},
    ports::{ProjectRepository, ProjectRepositoryError},
    services::{ActiveProjectService, MembershipError, MembershipService},
};

use super::helpers::TestDatabase;

#[tokio::test(flavor = "multi_thread")]
async fn project_updates_are_version_checked() -> eyre::Result<()> {
    let Some(db) = TestDatabase::connect()? else {
        return Ok(());
    };
    let project = db.project("Apollo").await?;

    let mut first = project.clone();
    first.apply_patch(ProjectPatch::new().with_name("Apollo 11"), &DefaultClock)?;
    let mut second = project.clone();
    second.set_status(ProjectStatus::Finished, &DefaultClock);

    ProjectRepository::update(&*db.store, &first).await?;
    let stale = ProjectRepository::update(&*db.store, &second).await;
    eyre::ensure!(
        matches!(stale, Err(ProjectRepositoryError::ConcurrentModification(_))),
        "expected ConcurrentModification, got {stale:?}"
    );

    let stored = ProjectRepository::find_by_id(&*db.store, project.id())
        .await?
        .ok_or_else(|| eyre::eyre!("project vanished"))?;
    eyre::ensure!(stored.name() == "Apollo 11");
    eyre::ensure!(stored.status() == ProjectStatus::Active);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_assignment_is_a_conflict() -> eyre::Result<()> {
    let Some(db) = TestDatabase::connect()? else {
        return Ok(());
    };
    let membership = MembershipService::new(
        Arc::clone(&db.store),
        Arc::clone(&db.store),
        Arc::clone(&db.directory),
        Arc::new(DefaultClock),
    );
    let project = db.project("Apollo").await?;
    let dev = db.user("dana", Role::Developer)?;

    membership.assign(project.id(), dev).await?;
    let again = membership.assign(project.id(), dev).await;
    eyre::ensure!(
        matches!(again, Err(MembershipError::Conflict { .. })),
        "expected Conflict, got {again:?}"
    );

    eyre::ensure!(membership.remove(project.id(), dev).await?);
    eyre::ensure!(!membership.remove(project.id(), dev).await?);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn active_project_pointer_upserts_per_user() -> eyre::Result<()> {
    let Some(db) = TestDatabase::connect()? else {
        return Ok(());
    };
    let active = ActiveProjectService::new(
        Arc::clone(&db.store),
        Arc::clone(&db.store),
        Arc::clone(&db.directory),
        Arc::new(DefaultClock),
    );
    let apollo = db.project("Apollo").await?;
    let gemini = db.project("Gemini").await?;
    let dev = db.user("dana", Role::Developer)?;

    active.set(dev, apollo.id()).await?;
    active.set(dev, gemini.id()).await?;
    eyre::ensure!(active.get(dev).await? == Some(gemini.id()));

    eyre::ensure!(ProjectRepository::delete(&*db.store, gemini.id()).await?);
    eyre::ensure!(active.get(dev).await?.is_none());
    Ok(())
}
