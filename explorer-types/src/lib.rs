//! Core type definitions for the datasource explorer.
//!
//! This crate defines the read-only snapshots the explorer projects over:
//! - String identifiers for datasources, plugins, containers and pages
//! - Datasource, plugin and action records as supplied by the data layer
//! - The navigation context (which container/page is open, which datasource)
//!
//! Nothing here is mutated by the explorer. Records are refreshed externally
//! and the projection is recomputed from scratch.

mod ids;
mod navigation;
mod record;

pub use ids::{ContainerId, DatasourceId, PageId, PluginId};
pub use navigation::NavigationContext;
pub use record::{ActionRecord, DatasourceRecord, DatasourceRef, PermissionToken, PluginRecord, TokenSet};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing explorer types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid identifier: {0:?}")]
    InvalidId(String),
}
