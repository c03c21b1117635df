#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use fundraising_core::{
    core::store::{SequentialIds, Store},
    ledger::{Document, Expense, Pledge, Transaction},
    storage::JsonFileStore,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

pub const SLOT: &str = "dcd_fundraising_v20";

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A unique directory that is removed when the test binary exits.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// A store backed by JSON files in `base`, with predictable ids.
pub fn file_store(base: &PathBuf) -> Store {
    let backend = JsonFileStore::new(base.clone()).expect("create json file store");
    Store::load(Box::new(backend), SLOT).with_id_source(SequentialIds::new("rec"))
}

/// Two pledges, three payments (one unlinked) and two expenses.
pub fn sample_document() -> Document {
    Document {
        pledges: vec![
            Pledge::new("Mary Wanjiku", "Eagles", 5000.0).with_id("p1"),
            Pledge::new("John Otieno", "Youth", 1000.0).with_id("p2"),
        ],
        transactions: vec![
            Transaction::new("Mary Wanjiku", "Eagles", 2000.0, "2024-03-01T09:00:00.000Z")
                .with_id("t1")
                .for_pledge("p1"),
            Transaction::new("John Otieno", "Youth", 1000.0, "2024-03-02T09:00:00.000Z")
                .with_id("t2")
                .for_pledge("p2"),
            Transaction::new("Walk-in", "Guests", 300.0, "2024-03-03T09:00:00.000Z")
                .with_id("t3"),
        ],
        expenses: vec![
            Expense::new("Chairs", 800.0, "2024-03-02T12:00:00.000Z").with_id("e1"),
            Expense::new("Tea", 150.0, "2024-03-04T08:00:00.000Z").with_id("e2"),
        ],
    }
}
