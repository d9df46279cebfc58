mod common;

use common::{local, noon_clock};
use planner_core::{
    KeyValueBackend, PersistenceAdapter, SqliteBackend, StorageError, TaskStore,
    TASKS_STORAGE_KEY,
};

#[test]
fn fresh_database_starts_empty() {
    let backend = SqliteBackend::open_in_memory().unwrap();

    assert!(backend.is_empty().unwrap());
    assert_eq!(backend.get(TASKS_STORAGE_KEY).unwrap(), None);
    assert!(!backend.contains(TASKS_STORAGE_KEY).unwrap());
}

#[test]
fn entries_survive_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner.db");

    let mut first = SqliteBackend::open(&path).unwrap();
    first.set("theme", "\"dark\"").unwrap();
    first.set("limit", "3").unwrap();
    drop(first);

    let second = SqliteBackend::open(&path).unwrap();
    assert_eq!(second.len().unwrap(), 2);
    assert_eq!(second.get("theme").unwrap().as_deref(), Some("\"dark\""));
    assert_eq!(second.get("limit").unwrap().as_deref(), Some("3"));
}

#[test]
fn unopenable_path_reports_sqlite_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("planner.db");

    let err = SqliteBackend::open(&path).err().unwrap();
    assert!(matches!(err, StorageError::Sqlite(_)), "unexpected error: {err}");
}

#[test]
fn adapter_over_sqlite_reads_typed_values() {
    let mut adapter = PersistenceAdapter::new(SqliteBackend::open_in_memory().unwrap());

    assert!(adapter.write("limits", &vec![1_u32, 2, 3]));
    assert!(adapter.has("limits"));
    assert_eq!(adapter.read("limits", Vec::<u32>::new()), vec![1, 2, 3]);
    assert_eq!(adapter.read("limits", 0_u32), 0);

    assert!(adapter.clear_all());
    assert!(!adapter.has("limits"));
}

#[test]
fn set_is_an_upsert_and_remove_is_idempotent() {
    let mut backend = SqliteBackend::open_in_memory().unwrap();

    backend.set("k", "1").unwrap();
    backend.set("k", "2").unwrap();
    assert_eq!(backend.get("k").unwrap().as_deref(), Some("2"));
    assert!(backend.contains("k").unwrap());

    backend.remove("k").unwrap();
    backend.remove("k").unwrap();
    assert_eq!(backend.get("k").unwrap(), None);
    assert!(!backend.contains("k").unwrap());
}

#[test]
fn clear_drops_every_entry() {
    let mut backend = SqliteBackend::open_in_memory().unwrap();
    backend.set("a", "1").unwrap();
    backend.set("b", "2").unwrap();

    backend.clear().unwrap();

    assert!(!backend.contains("a").unwrap());
    assert!(!backend.contains("b").unwrap());
}

#[test]
fn task_store_survives_process_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner.db");

    let before = {
        let adapter = PersistenceAdapter::new(SqliteBackend::open(&path).unwrap());
        let mut store = TaskStore::with_clock(adapter, noon_clock());
        let task = store.add_task("Buy milk", "", local(2024, 5, 1, 9));
        store.add_task("Pay rent", "June", local(2024, 6, 1, 9));
        store.toggle_task_completion(&task.id);
        store.all_tasks().to_vec()
    };

    let adapter = PersistenceAdapter::new(SqliteBackend::open(&path).unwrap());
    let mut reopened = TaskStore::with_clock(adapter, noon_clock());

    assert_eq!(reopened.all_tasks(), before.as_slice());
    assert_eq!(reopened.completed_tasks().len(), 1);
}
