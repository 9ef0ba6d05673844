//! Ordering guarantees for note and membership listings.

use rstest::rstest;
use workboard::identity::domain::Role;
use workboard::note::services::AppendNoteRequest;

use super::helpers::{Workboard, board};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn notes_list_in_append_order(board: Workboard) -> eyre::Result<()> {
    let project = board.project("Apollo").await?;
    let dev = board.user("dana", Role::Developer)?;
    let lead = board.user("mona", Role::Manager)?;
    let task = board.task(&project, "Ship it").await?;

    for (author, text) in [(dev, "one"), (lead, "two"), (dev, "three"), (lead, "four")] {
        board
            .notes
            .append(AppendNoteRequest::new(task.id(), author, text))
            .await?;
    }

    let texts: Vec<String> = board
        .notes
        .list(task.id())
        .await?
        .iter()
        .map(|note| note.text().to_owned())
        .collect();
    eyre::ensure!(texts == ["one", "two", "three", "four"], "got {texts:?}");

    let mine: Vec<String> = board
        .notes
        .list_by_author(task.id(), dev)
        .await?
        .iter()
        .map(|note| note.text().to_owned())
        .collect();
    eyre::ensure!(mine == ["one", "three"], "got {mine:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn members_list_in_assignment_order(board: Workboard) -> eyre::Result<()> {
    let project = board.project("Apollo").await?;
    let names = ["zoe", "adam", "mila"];
    for name in names {
        let id = board.user(name, Role::Developer)?;
        board.membership.assign(project.id(), id).await?;
    }

    let listed: Vec<String> = board
        .membership
        .list_assigned_users(project.id())
        .await?
        .into_iter()
        .map(|member| member.name)
        .collect();
    eyre::ensure!(listed == names, "got {listed:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn active_project_is_last_write_wins(board: Workboard) -> eyre::Result<()> {
    let apollo = board.project("Apollo").await?;
    let gemini = board.project("Gemini").await?;
    let dev = board.user("dana", Role::Developer)?;

    let first = board.active.set(dev, apollo.id()).await?;
    let second = board.active.set(dev, gemini.id()).await?;

    eyre::ensure!(first.id() == second.id());
    eyre::ensure!(board.active.get(dev).await? == Some(gemini.id()));
    Ok(())
}
