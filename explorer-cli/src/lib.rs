//! Driver pieces shared by the `explorer-cli` binary and its tests.
//!
//! A snapshot file carries everything the data layer would normally supply:
//! datasources, suggestions, plugins, the application's actions, the current
//! location and the principal's workspace tokens.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use explorer_store::{KeyValueBackend, MemoryBackend, SqliteBackend};
use explorer_types::{
    ActionRecord, ContainerId, DatasourceId, DatasourceRecord, NavigationContext, PageId, PluginRecord, TokenSet,
};
use explorer_view::{
    Command, DatasourceExplorer, ExplorerInput, ExplorerView, IntegrationTab, Navigator,
    UsageIndex, Walkthrough,
};
use serde::Deserialize;
use tracing::info;

/// Where the user is, either resolved already or as a raw editor URL.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub container_id: ContainerId,
    pub page_id: PageId,
    #[serde(default)]
    pub open_datasource_id: Option<DatasourceId>,
    /// Editor URL path; used when `openDatasourceId` is absent.
    #[serde(default)]
    pub path: Option<String>,
}

/// Input snapshot read from a JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub datasources: Vec<DatasourceRecord>,
    #[serde(default)]
    pub suggestions: Vec<DatasourceRecord>,
    #[serde(default)]
    pub plugins: Vec<PluginRecord>,
    #[serde(default)]
    pub actions: Vec<ActionRecord>,
    pub location: Location,
    #[serde(default)]
    pub workspace_permissions: Option<TokenSet>,
    #[serde(default)]
    pub walkthrough_open: bool,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        Self::from_json(&contents).with_context(|| format!("invalid snapshot {}", path.display()))
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn navigation(&self) -> NavigationContext {
        let location = &self.location;
        match (&location.open_datasource_id, &location.path) {
            (None, Some(path)) => NavigationContext::from_path(
                location.container_id.clone(),
                location.page_id.clone(),
                path,
            ),
            (open, _) => NavigationContext {
                container_id: location.container_id.clone(),
                page_id: location.page_id.clone(),
                open_datasource_id: open.clone(),
            },
        }
    }

    pub fn usage(&self) -> UsageIndex {
        UsageIndex::from_actions(&self.actions)
    }
}

/// Opens the SQLite store at `path`, or an in-memory store when `None`.
pub fn open_backend(path: Option<&Path>) -> Result<Box<dyn KeyValueBackend>> {
    match path {
        Some(path) => {
            let backend = SqliteBackend::open(path)
                .with_context(|| format!("failed to open state store {}", path.display()))?;
            info!(path = %path.display(), "Using SQLite explorer state");
            Ok(Box::new(backend))
        }
        None => {
            info!("No state store configured, explorer state is kept in memory");
            Ok(Box::new(MemoryBackend::new()))
        }
    }
}

/// Renders the snapshot and hands the view to `f` while the inputs are alive.
pub fn with_view<B, T>(
    explorer: &DatasourceExplorer<B>,
    snapshot: &Snapshot,
    f: impl FnOnce(&ExplorerView<'_>) -> T,
) -> T
where
    B: KeyValueBackend,
{
    let navigation = snapshot.navigation();
    let usage = snapshot.usage();
    let input = ExplorerInput {
        datasources: &snapshot.datasources,
        suggestions: &snapshot.suggestions,
        plugins: &snapshot.plugins,
        usage: &usage,
        navigation: &navigation,
        workspace_permissions: snapshot.workspace_permissions.as_ref(),
        expansion_state: None,
        walkthrough_open: snapshot.walkthrough_open,
    };
    let view = explorer.render(input);
    f(&view)
}

/// Renders the snapshot as pretty JSON.
pub fn render_json<B: KeyValueBackend>(
    explorer: &DatasourceExplorer<B>,
    snapshot: &Snapshot,
) -> Result<String> {
    let json = with_view(explorer, snapshot, |view| serde_json::to_string_pretty(view))?;
    Ok(json)
}

/// Affordance a user can activate from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AffordanceChoice {
    /// "+" on the node header.
    HeaderAdd,
    /// "Add" row under the list.
    AddRow,
    /// Create button in the empty state.
    EmptyAdd,
    /// "Show all datasources".
    ShowAll,
}

/// Commands behind an affordance, or an error if the view does not offer it.
pub fn activate<B: KeyValueBackend>(
    explorer: &DatasourceExplorer<B>,
    snapshot: &Snapshot,
    choice: AffordanceChoice,
) -> Result<Vec<Command>> {
    let commands = with_view(explorer, snapshot, |view| {
        let affordance = match choice {
            AffordanceChoice::HeaderAdd => view.header_add.as_ref(),
            AffordanceChoice::AddRow => view.add_row.as_ref(),
            AffordanceChoice::EmptyAdd => view.empty_state.as_ref().and_then(|e| e.add.as_ref()),
            AffordanceChoice::ShowAll => view.show_all.as_ref(),
        };
        affordance.map(|a| a.commands.clone())
    });
    match commands {
        Some(commands) => Ok(commands),
        None => bail!("affordance {choice:?} is not offered for this snapshot"),
    }
}

/// Navigator that logs the destination instead of routing.
#[derive(Debug, Default)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate_to(&self, container_id: &ContainerId, page_id: &PageId, tab: IntegrationTab) {
        info!(container_id = %container_id, page_id = %page_id, tab = %tab, "Navigate");
    }
}

/// Walkthrough overlay that only logs.
#[derive(Debug, Default)]
pub struct LoggingWalkthrough;

impl Walkthrough for LoggingWalkthrough {
    fn pop_feature(&self, feature: &str) {
        info!(feature, "Walkthrough feature dismissed");
    }
}
