//! Application services for the task note ledger.

mod ledger;

pub use ledger::{AppendNoteRequest, NoteLedgerError, NoteLedgerResult, TaskNoteLedger};
