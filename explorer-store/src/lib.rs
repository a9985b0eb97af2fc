//! Persisted expansion state for the datasource explorer.
//!
//! Provides a string key/value backend abstraction (the same shape as browser
//! local storage) and the expansion store layered on top of it.
//!
//! # Layout
//!
//! - One value per container under `explorerState_<containerId>`
//! - The value is a JSON object mapping category name to `true`/`false`
//! - Missing keys mean "not yet recorded"; callers apply their own default
//!
//! # Failure policy
//!
//! Backends report failures as [`StoreError`]. The [`ExpansionStore`] absorbs
//! them: reads degrade to "unset" and writes are dropped, each with a warning.

mod backend;
mod error;
mod expansion;
mod sqlite;

pub use backend::{KeyValueBackend, MemoryBackend};
pub use error::{StoreError, StoreResult};
pub use expansion::{ExpansionKey, ExpansionStore, ExplorerCategory, STORAGE_PREFIX, storage_key};
pub use sqlite::SqliteBackend;
