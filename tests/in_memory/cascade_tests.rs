//! Project deletion cascades through every dependent record.

use rstest::rstest;
use workboard::identity::domain::Role;
use workboard::note::{ports::TaskNoteRepository, services::AppendNoteRequest};
use workboard::project::ports::AssignmentRepository;
use workboard::task::ports::TaskRepository;

use super::helpers::{Workboard, board};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_project_removes_everything_under_it(board: Workboard) -> eyre::Result<()> {
    let doomed = board.project("Doomed").await?;
    let kept = board.project("Kept").await?;
    let dev = board.user("dana", Role::Developer)?;
    board.membership.assign(doomed.id(), dev).await?;
    board.membership.assign(kept.id(), dev).await?;
    board.active.set(dev, doomed.id()).await?;

    let first = board.task(&doomed, "First").await?;
    board.task(&doomed, "Second").await?;
    let survivor = board.task(&kept, "Survivor").await?;
    board
        .notes
        .append(AppendNoteRequest::new(first.id(), dev, "about to vanish"))
        .await?;

    eyre::ensure!(board.projects.delete(doomed.id()).await?);

    eyre::ensure!(board.projects.find_by_id(doomed.id()).await?.is_none());
    eyre::ensure!(
        TaskRepository::find_by_project(&*board.store, doomed.id())
            .await?
            .is_empty()
    );
    eyre::ensure!(TaskNoteRepository::count_for_task(&*board.store, first.id()).await? == 0);
    eyre::ensure!(
        AssignmentRepository::find_by_project(&*board.store, doomed.id())
            .await?
            .is_empty()
    );
    eyre::ensure!(board.active.get(dev).await?.is_none());

    eyre::ensure!(board.tasks.find_by_id(survivor.id()).await?.is_some());
    eyre::ensure!(board.membership.is_assigned(kept.id(), dev).await?);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_missing_project_reports_false(board: Workboard) -> eyre::Result<()> {
    let project = board.project("Once").await?;
    eyre::ensure!(board.projects.delete(project.id()).await?);
    eyre::ensure!(!board.projects.delete(project.id()).await?);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_removes_its_notes_only(board: Workboard) -> eyre::Result<()> {
    let project = board.project("Apollo").await?;
    let dev = board.user("dana", Role::Developer)?;
    let gone = board.task(&project, "Gone").await?;
    let stays = board.task(&project, "Stays").await?;
    board
        .notes
        .append(AppendNoteRequest::new(gone.id(), dev, "first"))
        .await?;
    board
        .notes
        .append(AppendNoteRequest::new(stays.id(), dev, "second"))
        .await?;

    eyre::ensure!(board.tasks.delete(gone.id()).await?);
    eyre::ensure!(!board.tasks.delete(gone.id()).await?);

    eyre::ensure!(board.notes.count(gone.id()).await? == 0);
    eyre::ensure!(board.notes.count(stays.id()).await? == 1);
    Ok(())
}
