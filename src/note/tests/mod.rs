//! Unit tests for the task note ledger.
