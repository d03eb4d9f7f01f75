use std::fs;

use envgate_core::{FileSelectionStore, MemorySelectionStore, SelectionStore};
use tempfile::tempdir;

#[test]
fn test_file_store_lifecycle() {
    let dir = tempdir().unwrap();
    let store = FileSelectionStore::new(dir.path().join("current-environment"));

    assert_eq!(store.get().unwrap(), None);
    assert!(!store.has().unwrap());

    store.set("env-42").unwrap();
    assert_eq!(store.get().unwrap().as_deref(), Some("env-42"));
    assert!(store.has().unwrap());

    store.set("env-7").unwrap();
    assert_eq!(store.get().unwrap().as_deref(), Some("env-7"));

    store.clear().unwrap();
    assert_eq!(store.get().unwrap(), None);
}

#[test]
fn test_file_store_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state").join("current-environment");

    FileSelectionStore::new(&path).set("acme & co").unwrap();
    let reopened = FileSelectionStore::new(&path);
    assert_eq!(reopened.get().unwrap().as_deref(), Some("acme & co"));
}

#[test]
fn test_file_store_stores_name_verbatim() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("current-environment");
    let store = FileSelectionStore::new(&path);

    store.set("env-42").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "env-42");
}

#[test]
fn test_empty_file_reads_as_absent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("current-environment");
    fs::write(&path, "").unwrap();

    let store = FileSelectionStore::new(&path);
    assert_eq!(store.get().unwrap(), None);
}

#[test]
fn test_clear_without_value_is_ok() {
    let dir = tempdir().unwrap();
    let store = FileSelectionStore::new(dir.path().join("never-written"));
    assert!(store.clear().is_ok());
    assert!(store.clear().is_ok());
}

#[test]
fn test_memory_store() {
    let store = MemorySelectionStore::with_value("env-1");
    assert_eq!(store.get().unwrap().as_deref(), Some("env-1"));
    store.clear().unwrap();
    assert!(!store.has().unwrap());
}
