//! The "Datasources" tree node, projected into plain data.

use explorer_permissions::PermissionProjector;
use explorer_store::{ExpansionKey, ExpansionStore, ExplorerCategory, KeyValueBackend};
use explorer_types::{
    ContainerId, DatasourceId, DatasourceRecord, NavigationContext, PluginRecord, TokenSet,
};
use serde::Serialize;
use tracing::debug;

use crate::active::resolve_active_id;
use crate::command::{
    Command, CreateEntryPoint, create_datasource_commands, list_datasources_commands,
};
use crate::config::ExplorerConfig;
use crate::grouper::{DatasourceUsage, group, novel_suggestions};
use crate::plugin_index::PluginIndex;

/// Nesting depth of datasource rows under the tree node.
pub const ROW_STEP: u8 = 1;

/// Category the datasource node persists its expansion under.
pub const DATASOURCE_CATEGORY: ExplorerCategory = ExplorerCategory::Datasource;

/// Why a row is listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    /// Used by the current application.
    Primary,
    /// Recommended but not attached yet.
    Suggested,
}

/// One renderable datasource row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRow<'a> {
    pub id: &'a DatasourceId,
    pub name: &'a str,
    pub kind: RowKind,
    pub is_active: bool,
    /// `None` when the record points at a plugin missing from the snapshot.
    pub plugin: Option<&'a PluginRecord>,
    pub can_manage: bool,
    pub step: u8,
    #[serde(skip)]
    pub datasource: &'a DatasourceRecord,
}

/// Something the user can click, with the commands it triggers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Affordance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<CreateEntryPoint>,
    pub commands: Vec<Command>,
}

impl Affordance {
    fn create(navigation: &NavigationContext, entry_point: CreateEntryPoint, walkthrough_open: bool) -> Self {
        Self {
            entry_point: Some(entry_point),
            commands: create_datasource_commands(navigation, entry_point, walkthrough_open),
        }
    }

    fn show_all(navigation: &NavigationContext) -> Self {
        Self {
            entry_point: None,
            commands: list_datasources_commands(navigation),
        }
    }
}

/// Placeholder rendered instead of rows when there is nothing to list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyState {
    /// Present only when the principal may create datasources.
    pub add: Option<Affordance>,
}

/// Everything the tree node needs to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerView<'a> {
    pub rows: Vec<EntityRow<'a>>,
    pub is_expanded: bool,
    pub can_create: bool,
    pub show_add_affordance: bool,
    pub show_all_affordance: bool,
    /// "+" on the node header.
    pub header_add: Option<Affordance>,
    /// "Add" row under a non-empty list.
    pub add_row: Option<Affordance>,
    pub show_all: Option<Affordance>,
    pub empty_state: Option<EmptyState>,
}

/// Input snapshots for one render pass.
#[derive(Clone, Copy)]
pub struct ExplorerInput<'a> {
    pub datasources: &'a [DatasourceRecord],
    pub suggestions: &'a [DatasourceRecord],
    pub plugins: &'a [PluginRecord],
    pub usage: &'a dyn DatasourceUsage,
    pub navigation: &'a NavigationContext,
    /// Principal's tokens on the workspace; `None` if not loaded.
    pub workspace_permissions: Option<&'a TokenSet>,
    /// Persisted expansion flag; `None` means not recorded.
    pub expansion_state: Option<bool>,
    pub walkthrough_open: bool,
}

/// Projects the inputs into a view. Pure: identical inputs give equal views.
pub fn build<'a>(input: &ExplorerInput<'a>, projector: &PermissionProjector) -> ExplorerView<'a> {
    let groups = group(input.datasources, input.usage);
    let plugins = PluginIndex::new(input.plugins);
    let active = resolve_active_id(input.navigation);

    let row = |datasource: &'a DatasourceRecord, kind: RowKind| EntityRow {
        id: &datasource.id,
        name: datasource.name.as_str(),
        kind,
        is_active: active == Some(&datasource.id),
        plugin: plugins.get(&datasource.plugin_id),
        can_manage: projector.can_manage(datasource.permissions()),
        step: ROW_STEP,
        datasource,
    };

    let rows: Vec<EntityRow<'a>> = groups
        .primary
        .iter()
        .map(|ds| row(*ds, RowKind::Primary))
        .chain(novel_suggestions(&groups.primary, input.suggestions).map(|ds| row(ds, RowKind::Suggested)))
        .collect();

    let can_create = projector.can_create(input.workspace_permissions);
    let show_add_affordance = !rows.is_empty() && can_create;
    let show_all_affordance = !groups.other.is_empty();
    let navigation = input.navigation;
    let walkthrough = input.walkthrough_open;

    let empty_state = rows.is_empty().then(|| EmptyState {
        add: can_create.then(|| {
            Affordance::create(navigation, CreateEntryPoint::EntityExplorerNewDatasource, walkthrough)
        }),
    });

    debug!(
        container_id = %navigation.container_id,
        rows = rows.len(),
        other = groups.other.len(),
        can_create,
        "Built datasource explorer view"
    );

    ExplorerView {
        is_expanded: input.expansion_state.unwrap_or(true),
        can_create,
        show_add_affordance,
        show_all_affordance,
        header_add: can_create
            .then(|| Affordance::create(navigation, CreateEntryPoint::EntityExplorerAddDs, walkthrough)),
        add_row: show_add_affordance
            .then(|| Affordance::create(navigation, CreateEntryPoint::EntityExplorerAddDsCta, walkthrough)),
        show_all: show_all_affordance.then(|| Affordance::show_all(navigation)),
        empty_state,
        rows,
    }
}

/// The datasource tree node: projection plus persisted expansion.
#[derive(Debug)]
pub struct DatasourceExplorer<B> {
    projector: PermissionProjector,
    store: ExpansionStore<B>,
}

impl<B: KeyValueBackend> DatasourceExplorer<B> {
    pub fn new(projector: PermissionProjector, backend: B) -> Self {
        Self {
            projector,
            store: ExpansionStore::new(backend),
        }
    }

    pub fn from_config(config: &ExplorerConfig, backend: B) -> Self {
        Self::new(PermissionProjector::new(config.permissions.clone()), backend)
    }

    pub fn projector(&self) -> &PermissionProjector {
        &self.projector
    }

    pub fn store(&self) -> &ExpansionStore<B> {
        &self.store
    }

    /// Recorded expansion flag for a container, `None` if never toggled.
    pub fn expansion_state(&self, container_id: &ContainerId) -> Option<bool> {
        self.store.get(&Self::key(container_id))
    }

    /// Builds the view, reading the expansion flag from the store.
    pub fn render<'a>(&self, input: ExplorerInput<'a>) -> ExplorerView<'a> {
        let input = ExplorerInput {
            expansion_state: self.expansion_state(&input.navigation.container_id),
            ..input
        };
        build(&input, &self.projector)
    }

    /// Persists a toggle and returns the new expansion flag.
    pub fn on_toggle(&self, container_id: &ContainerId, is_open: bool) -> bool {
        debug!(container_id = %container_id, is_open, "Datasource node toggled");
        self.store.set(&Self::key(container_id), is_open);
        is_open
    }

    fn key(container_id: &ContainerId) -> ExpansionKey {
        ExpansionKey::new(container_id.clone(), DATASOURCE_CATEGORY)
    }
}
