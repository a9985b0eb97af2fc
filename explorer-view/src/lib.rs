//! View-model projection for the explorer's "Datasources" tree node.
//!
//! Composes the pieces a render pass needs:
//! - [`group`] / [`suggest`]: which datasources are used here, which are not,
//!   and which suggestions to append
//! - [`PluginIndex`]: plugin metadata lookup built once per pass
//! - [`resolve_active_id`]: the datasource open in the editor
//! - [`build`]: the final [`ExplorerView`], including the affordances and the
//!   [`Command`]s they trigger
//! - [`DatasourceExplorer`]: `build` plus expansion state read from and
//!   written to an [`explorer_store::ExpansionStore`]
//!
//! Nothing here performs side effects other than expansion-state writes.
//! Navigation and telemetry leave the crate as commands.

mod active;
mod command;
mod config;
mod error;
mod grouper;
mod plugin_index;
mod view_model;

pub use active::resolve_active_id;
pub use command::{
    ADD_DATASOURCE_WALKTHROUGH, CREATE_DATASOURCE_EVENT, Command, CreateEntryPoint,
    IntegrationTab, Navigator, TelemetrySink, TracingTelemetry, Walkthrough,
    create_datasource_commands, dispatch, list_datasources_commands,
};
pub use config::{ExplorerConfig, StorageConfig};
pub use error::ConfigError;
pub use grouper::{DatasourceGroups, DatasourceUsage, UsageIndex, group, suggest};
pub use plugin_index::PluginIndex;
pub use view_model::{
    Affordance, DATASOURCE_CATEGORY, DatasourceExplorer, EmptyState, EntityRow, ExplorerInput,
    ExplorerView, ROW_STEP, RowKind, build,
};
