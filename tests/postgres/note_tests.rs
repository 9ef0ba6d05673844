//! Atomic note append and ordering against `PostgreSQL`.

use std::sync::Arc;

use mockable::DefaultClock;
use workboard::identity::domain::Role;
use workboard::note::{
    ports::{NoteRepositoryError, TaskNoteRepository},
    services::{AppendNoteRequest, NoteLedgerError, TaskNoteLedger},
};
use workboard::task::ports::TaskRepository;

use super::helpers::TestDatabase;

#[tokio::test(flavor = "multi_thread")]
async fn append_flags_task_and_preserves_order() -> eyre::Result<()> {
    let Some(db) = TestDatabase::connect()? else {
        return Ok(());
    };
    let ledger = TaskNoteLedger::new(
        Arc::clone(&db.store),
        Arc::clone(&db.store),
        Arc::new(DefaultClock),
    );
    let project = db.project("Apollo").await?;
    let dev = db.user("dana", Role::Developer)?;
    let task = db.task(&project, "Notes").await?;

    for text in ["first", "second", "third"] {
        ledger
            .append(AppendNoteRequest::new(task.id(), dev, text))
            .await?;
    }

    let texts: Vec<String> = ledger
        .list(task.id())
        .await?
        .iter()
        .map(|note| note.text().to_owned())
        .collect();
    eyre::ensure!(texts == ["first", "second", "third"], "got {texts:?}");

    let stored = TaskRepository::find_by_id(&*db.store, task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task vanished"))?;
    eyre::ensure!(stored.has_unread_notes());
    eyre::ensure!(stored.version() == task.version() + 3);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn append_against_stale_task_writes_nothing() -> eyre::Result<()> {
    let Some(db) = TestDatabase::connect()? else {
        return Ok(());
    };
    let project = db.project("Apollo").await?;
    let dev = db.user("dana", Role::Developer)?;
    let task = db.task(&project, "Contended").await?;

    let mut moved_on = task.clone();
    moved_on.mark_notes_read(&DefaultClock);
    TaskRepository::update(&*db.store, &moved_on).await?;

    let mut stale = task.clone();
    stale.flag_unread_notes(&DefaultClock);
    let note =
        workboard::note::domain::TaskNote::new(task.id(), dev, "lost", false, &DefaultClock)?;
    let result = TaskNoteRepository::append(&*db.store, &note, &stale).await;
    eyre::ensure!(
        matches!(result, Err(NoteRepositoryError::ConcurrentModification(_))),
        "expected ConcurrentModification, got {result:?}"
    );
    eyre::ensure!(TaskNoteRepository::count_for_task(&*db.store, task.id()).await? == 0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn appending_to_a_missing_task_is_not_found() -> eyre::Result<()> {
    let Some(db) = TestDatabase::connect()? else {
        return Ok(());
    };
    let ledger = TaskNoteLedger::new(
        Arc::clone(&db.store),
        Arc::clone(&db.store),
        Arc::new(DefaultClock),
    );
    let project = db.project("Apollo").await?;
    let dev = db.user("dana", Role::Developer)?;
    let task = db.task(&project, "Short lived").await?;
    TaskRepository::delete(&*db.store, task.id()).await?;

    let result = ledger
        .append(AppendNoteRequest::new(task.id(), dev, "too late"))
        .await;
    eyre::ensure!(
        matches!(result, Err(NoteLedgerError::TaskNotFound(_))),
        "expected TaskNotFound, got {result:?}"
    );
    Ok(())
}
