//! Side effects requested by the explorer, expressed as data.
//!
//! The view model never navigates or emits telemetry itself. Each affordance
//! carries the commands the host should run when the user activates it, and
//! [`dispatch`] runs them against the host's collaborators.

use explorer_types::{ContainerId, NavigationContext, PageId};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use tracing::info;

/// Telemetry event recorded when the user heads to the create-datasource page.
pub const CREATE_DATASOURCE_EVENT: &str = "NAVIGATE_TO_CREATE_NEW_DATASOURCE_PAGE";

/// Walkthrough feature highlighting the explorer's add button.
pub const ADD_DATASOURCE_WALKTHROUGH: &str = "EXPLORER_DATASOURCE_ADD";

/// Where in the explorer a create action was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreateEntryPoint {
    /// "+" button on the tree node header.
    EntityExplorerAddDs,
    /// Button inside the empty state.
    EntityExplorerNewDatasource,
    /// "Add" row under a non-empty list.
    EntityExplorerAddDsCta,
}

impl CreateEntryPoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EntityExplorerAddDs => "ENTITY_EXPLORER_ADD_DS",
            Self::EntityExplorerNewDatasource => "ENTITY_EXPLORER_NEW_DATASOURCE",
            Self::EntityExplorerAddDsCta => "ENTITY_EXPLORER_ADD_DS_CTA",
        }
    }
}

impl fmt::Display for CreateEntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tab of the integrations screen a navigation lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntegrationTab {
    /// Create a new datasource.
    New,
    /// List existing datasources.
    Active,
}

impl fmt::Display for IntegrationTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => f.write_str("NEW"),
            Self::Active => f.write_str("ACTIVE"),
        }
    }
}

/// A fire-and-forget request to a host collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    #[serde(rename_all = "camelCase")]
    Navigate {
        container_id: ContainerId,
        page_id: PageId,
        tab: IntegrationTab,
    },
    Record {
        event: String,
        attributes: Map<String, Value>,
    },
    PopWalkthroughFeature {
        feature: String,
    },
}

/// Commands for any of the "create datasource" affordances.
pub fn create_datasource_commands(
    navigation: &NavigationContext,
    entry_point: CreateEntryPoint,
    walkthrough_open: bool,
) -> Vec<Command> {
    let mut attributes = Map::new();
    attributes.insert("entryPoint".into(), Value::from(entry_point.as_str()));

    let mut commands = vec![
        Command::Navigate {
            container_id: navigation.container_id.clone(),
            page_id: navigation.page_id.clone(),
            tab: IntegrationTab::New,
        },
        Command::Record {
            event: CREATE_DATASOURCE_EVENT.to_string(),
            attributes,
        },
    ];
    if walkthrough_open {
        commands.push(Command::PopWalkthroughFeature {
            feature: ADD_DATASOURCE_WALKTHROUGH.to_string(),
        });
    }
    commands
}

/// Commands for the "show all datasources" affordance.
pub fn list_datasources_commands(navigation: &NavigationContext) -> Vec<Command> {
    vec![Command::Navigate {
        container_id: navigation.container_id.clone(),
        page_id: navigation.page_id.clone(),
        tab: IntegrationTab::Active,
    }]
}

/// Host router.
pub trait Navigator {
    fn navigate_to(&self, container_id: &ContainerId, page_id: &PageId, tab: IntegrationTab);
}

/// Host analytics pipeline. Must not block.
pub trait TelemetrySink {
    fn record(&self, event: &str, attributes: &Map<String, Value>);
}

/// Host feature-walkthrough overlay.
pub trait Walkthrough {
    fn pop_feature(&self, feature: &str);
}

/// Runs commands in order. Collaborators own their failures.
pub fn dispatch(
    commands: &[Command],
    navigator: &dyn Navigator,
    telemetry: &dyn TelemetrySink,
    walkthrough: &dyn Walkthrough,
) {
    for command in commands {
        match command {
            Command::Navigate {
                container_id,
                page_id,
                tab,
            } => navigator.navigate_to(container_id, page_id, *tab),
            Command::Record { event, attributes } => telemetry.record(event, attributes),
            Command::PopWalkthroughFeature { feature } => walkthrough.pop_feature(feature),
        }
    }
}

/// Telemetry sink that writes events to the `tracing` log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetry;

impl TelemetrySink for TracingTelemetry {
    fn record(&self, event: &str, attributes: &Map<String, Value>) {
        let attributes = Value::Object(attributes.clone());
        info!(event, attributes = %attributes, "Telemetry event");
    }
}
