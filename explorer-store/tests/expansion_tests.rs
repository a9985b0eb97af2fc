use explorer_store::{
    ExpansionKey, ExpansionStore, ExplorerCategory, KeyValueBackend, MemoryBackend, SqliteBackend,
    StoreError, StoreResult,
};
use explorer_types::ContainerId;
use proptest::prelude::*;
use std::cell::Cell;

fn key(container: &str) -> ExpansionKey {
    ExpansionKey::new(ContainerId::new(container), ExplorerCategory::Datasource)
}

/// Backend that fails every operation, like a full or corrupted local store.
struct BrokenBackend {
    writes_attempted: Cell<usize>,
}

impl BrokenBackend {
    fn new() -> Self {
        Self {
            writes_attempted: Cell::new(0),
        }
    }
}

impl KeyValueBackend for BrokenBackend {
    fn get_item(&self, _key: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Rejected("storage unavailable".into()))
    }

    fn set_item(&self, _key: &str, _value: &str) -> StoreResult<()> {
        self.writes_attempted.set(self.writes_attempted.get() + 1);
        Err(StoreError::Rejected("quota exceeded".into()))
    }

    fn remove_item(&self, _key: &str) -> StoreResult<()> {
        Err(StoreError::Rejected("storage unavailable".into()))
    }
}

/// Backend whose reads work but whose writes always fail.
#[derive(Default)]
struct ReadOnlyBackend {
    inner: MemoryBackend,
}

impl KeyValueBackend for ReadOnlyBackend {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get_item(key)
    }

    fn set_item(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::Rejected("quota exceeded".into()))
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.inner.remove_item(key)
    }
}

// ── Round trip ────────────────────────────────────────────────────

#[test]
fn never_set_key_is_unset() {
    let store = ExpansionStore::new(MemoryBackend::new());
    assert_eq!(store.get(&key("app")), None);
}

#[test]
fn set_true_then_get() {
    let store = ExpansionStore::new(MemoryBackend::new());
    store.set(&key("app"), true);
    assert_eq!(store.get(&key("app")), Some(true));
}

#[test]
fn set_false_then_get() {
    let store = ExpansionStore::new(MemoryBackend::new());
    store.set(&key("app"), false);
    assert_eq!(store.get(&key("app")), Some(false));
}

#[test]
fn last_write_wins() {
    let store = ExpansionStore::new(MemoryBackend::new());
    store.set(&key("app"), false);
    store.set(&key("app"), true);
    store.set(&key("app"), false);
    assert_eq!(store.get(&key("app")), Some(false));
}

proptest! {
    #[test]
    fn any_write_sequence_reads_back_last_value(
        writes in prop::collection::vec((0usize..3, any::<bool>()), 1..20),
    ) {
        let containers = ["app-a", "app-b", "app-c"];
        let store = ExpansionStore::new(MemoryBackend::new());
        let mut expected: [Option<bool>; 3] = [None; 3];

        for (idx, value) in writes {
            store.set(&key(containers[idx]), value);
            expected[idx] = Some(value);
            prop_assert_eq!(store.get(&key(containers[idx])), Some(value));
        }
        for (idx, container) in containers.iter().enumerate() {
            prop_assert_eq!(store.get(&key(container)), expected[idx]);
        }
    }
}

// ── Namespacing ───────────────────────────────────────────────────

#[test]
fn containers_do_not_interfere() {
    let store = ExpansionStore::new(MemoryBackend::new());
    store.set(&key("app-1"), false);
    assert_eq!(store.get(&key("app-1")), Some(false));
    assert_eq!(store.get(&key("app-2")), None);
}

#[test]
fn categories_do_not_interfere() {
    let store = ExpansionStore::new(MemoryBackend::new());
    let container = ContainerId::new("app");
    store.set(&ExpansionKey::new(container.clone(), ExplorerCategory::Datasource), false);
    assert_eq!(
        store.get(&ExpansionKey::new(container, ExplorerCategory::Pages)),
        None
    );
}

// ── Failure handling ──────────────────────────────────────────────

#[test]
fn read_failure_degrades_to_unset() {
    let store = ExpansionStore::new(BrokenBackend::new());
    assert_eq!(store.get(&key("app")), None);
}

#[test]
fn write_after_failed_read_is_skipped() {
    let store = ExpansionStore::new(BrokenBackend::new());
    store.set(&key("app"), true);
    assert_eq!(store.backend().writes_attempted.get(), 0);
}

#[test]
fn write_failure_is_swallowed() {
    let store = ExpansionStore::new(ReadOnlyBackend::default());
    store.set(&key("app"), false);
    assert_eq!(store.get(&key("app")), None);
}

// ── SQLite persistence ────────────────────────────────────────────

#[test]
fn sqlite_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state").join("explorer.db");

    {
        let store = ExpansionStore::new(SqliteBackend::open(&path).unwrap());
        store.set(&key("app"), false);
    }

    let reopened = ExpansionStore::new(SqliteBackend::open(&path).unwrap());
    assert_eq!(reopened.get(&key("app")), Some(false));
    assert_eq!(reopened.get(&key("other")), None);
}

#[test]
fn store_over_borrowed_backend() {
    let backend = SqliteBackend::open_in_memory().unwrap();
    let store = ExpansionStore::new(&backend);
    store.set(&key("app"), true);
    assert!(backend.get_item("explorerState_app").unwrap().is_some());
}
