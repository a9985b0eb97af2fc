use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::ids::{DatasourceId, PageId, PluginId};

/// Opaque string naming a capability granted on a subject (e.g. `manage:datasources`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionToken(String);

impl PermissionToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PermissionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PermissionToken {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Ordered set of permission tokens held by a principal on one subject.
pub type TokenSet = BTreeSet<PermissionToken>;

/// A datasource snapshot as delivered by the data layer.
///
/// Only the fields the explorer reads are typed; everything else the data
/// layer sends is kept in `extra` so snapshots round-trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasourceRecord {
    pub id: DatasourceId,
    #[serde(default)]
    pub name: String,
    pub plugin_id: PluginId,
    /// `None` when the data layer sent no permission list at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_permissions: Option<TokenSet>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DatasourceRecord {
    /// Shorthand for a record with a name and no permission list.
    pub fn new(id: impl Into<String>, name: impl Into<String>, plugin_id: impl Into<String>) -> Self {
        Self {
            id: DatasourceId::new(id),
            name: name.into(),
            plugin_id: PluginId::new(plugin_id),
            user_permissions: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Replaces the permission list.
    pub fn with_permissions<I, T>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<PermissionToken>,
    {
        self.user_permissions = Some(tokens.into_iter().map(Into::into).collect());
        self
    }

    /// Permission tokens on this record, or `None` if absent.
    pub fn permissions(&self) -> Option<&TokenSet> {
        self.user_permissions.as_ref()
    }
}

/// A plugin (connector type) snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginRecord {
    pub id: PluginId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_location: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PluginRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: PluginId::new(id),
            name: name.into(),
            package_name: None,
            icon_location: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }
}

/// Reference from an action to the datasource it runs against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasourceRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DatasourceId>,
    /// Present only for embedded (inline) datasources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasource_configuration: Option<serde_json::Value>,
}

impl DatasourceRef {
    /// Returns the referenced id if this points at a stored datasource.
    ///
    /// Embedded datasources carry their own configuration and are never
    /// listed in the explorer, even when they happen to have an id.
    pub fn stored_id(&self) -> Option<&DatasourceId> {
        match self.datasource_configuration {
            Some(ref config) if !config.is_null() => None,
            _ => self.id.as_ref(),
        }
    }
}

/// An action (query/API call) defined on a page of the current application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    pub id: String,
    pub page_id: PageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasource: Option<DatasourceRef>,
}

impl ActionRecord {
    /// Action bound to a stored datasource.
    pub fn stored(id: impl Into<String>, page_id: impl Into<String>, datasource_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            page_id: PageId::new(page_id),
            datasource: Some(DatasourceRef {
                id: Some(DatasourceId::new(datasource_id)),
                datasource_configuration: None,
            }),
        }
    }
}
