use explorer_types::ContainerId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, warn};

use crate::backend::KeyValueBackend;

/// Key prefix for per-container explorer state.
pub const STORAGE_PREFIX: &str = "explorerState_";

/// Collapsible top-level node of the explorer tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExplorerCategory {
    Pages,
    Widgets,
    QueriesAndJs,
    Datasource,
    Libraries,
}

impl ExplorerCategory {
    /// Name used inside the persisted JSON object.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pages => "pages",
            Self::Widgets => "widgets",
            Self::QueriesAndJs => "queriesAndJs",
            Self::Datasource => "datasource",
            Self::Libraries => "libraries",
        }
    }
}

impl fmt::Display for ExplorerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Address of one expansion flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpansionKey {
    pub container_id: ContainerId,
    pub category: ExplorerCategory,
}

impl ExpansionKey {
    pub fn new(container_id: ContainerId, category: ExplorerCategory) -> Self {
        Self {
            container_id,
            category,
        }
    }

    /// Backend key holding every category of this key's container.
    pub fn storage_key(&self) -> String {
        storage_key(&self.container_id)
    }
}

/// Backend key under which a container's explorer state is stored.
pub fn storage_key(container_id: &ContainerId) -> String {
    format!("{STORAGE_PREFIX}{container_id}")
}

/// Expand/collapse flags per (container, category).
///
/// Never injects defaults: `get` returns `None` until a value is written.
/// Backend failures never reach the caller.
#[derive(Debug)]
pub struct ExpansionStore<B> {
    backend: B,
}

impl<B: KeyValueBackend> ExpansionStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the recorded flag, or `None` if unset or unreadable.
    pub fn get(&self, key: &ExpansionKey) -> Option<bool> {
        let state = self.load(key)?;
        state.get(key.category.as_str()).and_then(Value::as_bool)
    }

    /// Records a flag immediately. Failures are logged and dropped.
    pub fn set(&self, key: &ExpansionKey, expanded: bool) {
        let storage_key = key.storage_key();
        let mut state = match self.backend.get_item(&storage_key) {
            Ok(Some(raw)) => parse_state(&raw).unwrap_or_else(|| {
                warn!(
                    container_id = %key.container_id,
                    "Replacing unreadable explorer state"
                );
                Map::new()
            }),
            Ok(None) => Map::new(),
            Err(e) => {
                // Writing a fresh object here would drop the other categories.
                warn!(
                    container_id = %key.container_id,
                    error = %e,
                    "Failed to read explorer state before write, dropping toggle"
                );
                return;
            }
        };

        state.insert(key.category.as_str().to_string(), Value::Bool(expanded));

        let payload = Value::Object(state).to_string();
        match self.backend.set_item(&storage_key, &payload) {
            Ok(()) => debug!(
                container_id = %key.container_id,
                category = %key.category,
                expanded,
                "Explorer state saved"
            ),
            Err(e) => warn!(
                container_id = %key.container_id,
                error = %e,
                "Failed to save explorer state"
            ),
        }
    }

    /// Forgets every recorded category for a container.
    pub fn clear(&self, container_id: &ContainerId) {
        if let Err(e) = self.backend.remove_item(&storage_key(container_id)) {
            warn!(container_id = %container_id, error = %e, "Failed to clear explorer state");
        }
    }

    fn load(&self, key: &ExpansionKey) -> Option<Map<String, Value>> {
        match self.backend.get_item(&key.storage_key()) {
            Ok(Some(raw)) => {
                let state = parse_state(&raw);
                if state.is_none() {
                    warn!(container_id = %key.container_id, "Ignoring unreadable explorer state");
                }
                state
            }
            Ok(None) => None,
            Err(e) => {
                warn!(
                    container_id = %key.container_id,
                    error = %e,
                    "Failed to read explorer state"
                );
                None
            }
        }
    }
}

fn parse_state(raw: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    fn key(container: &str, category: ExplorerCategory) -> ExpansionKey {
        ExpansionKey::new(ContainerId::new(container), category)
    }

    #[test]
    fn storage_key_is_prefixed_per_container() {
        assert_eq!(
            key("app-1", ExplorerCategory::Datasource).storage_key(),
            "explorerState_app-1"
        );
    }

    #[test]
    fn key_and_container_share_storage_key() {
        let container = ContainerId::new("app-1");
        for category in [ExplorerCategory::Pages, ExplorerCategory::Datasource] {
            assert_eq!(
                ExpansionKey::new(container.clone(), category).storage_key(),
                storage_key(&container)
            );
        }
    }

    #[test]
    fn categories_share_one_object() {
        let store = ExpansionStore::new(MemoryBackend::new());
        store.set(&key("app", ExplorerCategory::Datasource), false);
        store.set(&key("app", ExplorerCategory::Pages), true);

        let raw = store.backend().get_item("explorerState_app").unwrap().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!({"datasource": false, "pages": true}));
    }

    #[test]
    fn non_boolean_value_reads_as_unset() {
        let backend = MemoryBackend::new();
        backend
            .set_item("explorerState_app", r#"{"datasource":"yes"}"#)
            .unwrap();
        let store = ExpansionStore::new(backend);
        assert_eq!(store.get(&key("app", ExplorerCategory::Datasource)), None);
    }

    #[test]
    fn corrupt_object_is_replaced_on_write() {
        let backend = MemoryBackend::new();
        backend.set_item("explorerState_app", "{not json").unwrap();
        let store = ExpansionStore::new(backend);

        let k = key("app", ExplorerCategory::Datasource);
        assert_eq!(store.get(&k), None);
        store.set(&k, true);
        assert_eq!(store.get(&k), Some(true));
    }

    #[test]
    fn clear_forgets_only_that_container() {
        let store = ExpansionStore::new(MemoryBackend::new());
        store.set(&key("app-1", ExplorerCategory::Datasource), false);
        store.set(&key("app-2", ExplorerCategory::Datasource), false);

        store.clear(&ContainerId::new("app-1"));

        assert_eq!(store.backend().get_item(&storage_key(&ContainerId::new("app-1"))).unwrap(), None);
        assert_eq!(store.get(&key("app-1", ExplorerCategory::Datasource)), None);
        assert_eq!(store.get(&key("app-2", ExplorerCategory::Datasource)), Some(false));
    }

    #[test]
    fn category_serde_names() {
        assert_eq!(
            serde_json::to_string(&ExplorerCategory::QueriesAndJs).unwrap(),
            "\"queriesAndJs\""
        );
        assert_eq!(ExplorerCategory::Datasource.to_string(), "datasource");
    }
}
