//! Tests for run-record persistence in RunStore

use std::path::Path;

use draft_paper::{RunRecord, RunStatus, RunStore, RunStoreOptions};
use tempfile::TempDir;

/// Create a test store with temporary directory
fn create_test_store() -> (RunStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = RunStore::with_options(RunStoreOptions {
        app_folder: Some(temp_dir.path().to_path_buf()),
        verbose: false,
    });
    (store, temp_dir)
}

#[test]
fn test_record_lifecycle_executing_to_executed() {
    let (store, _temp) = create_test_store();

    let mut record = RunRecord::new(
        "openjournals/inara:latest",
        Path::new("/home/user/paper"),
        "docker",
    );
    store.save(&record).unwrap();

    let saved = store.get(&record.uuid).unwrap();
    assert_eq!(saved.status, RunStatus::Executing);
    assert!(saved.exit_code.is_none());
    assert!(saved.end_time.is_none());

    record.complete(0);
    store.save(&record).unwrap();

    let saved = store.get(&record.uuid).unwrap();
    assert_eq!(saved.status, RunStatus::Executed);
    assert_eq!(saved.exit_code, Some(0));
    assert!(saved.end_time.is_some());
}

#[test]
fn test_records_are_stored_one_file_per_run() {
    let (store, temp) = create_test_store();

    let first = RunRecord::new("img", Path::new("/a"), "docker");
    let second = RunRecord::new("img", Path::new("/b"), "docker");
    store.save(&first).unwrap();
    store.save(&second).unwrap();

    let runs_dir = temp.path().join("runs");
    assert!(runs_dir.join(format!("{}.json", first.uuid)).exists());
    assert!(runs_dir.join(format!("{}.json", second.uuid)).exists());

    let loaded = store.get(&second.uuid).unwrap();
    assert_eq!(loaded.project_root, "/b");
}

#[test]
fn test_nonzero_exit_code_is_preserved() {
    let (store, _temp) = create_test_store();

    let mut record = RunRecord::new("img", Path::new("/p"), "docker");
    record.complete(127);
    store.save(&record).unwrap();

    let saved = store.get(&record.uuid).unwrap();
    assert_eq!(saved.exit_code, Some(127));
}
