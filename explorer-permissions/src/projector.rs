use explorer_types::TokenSet;
use serde::{Deserialize, Serialize};

use crate::permission::Permission;

/// Capability flags derived from one token set. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub can_create: bool,
    pub can_manage: bool,
}

/// Token sets that unlock each capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PermissionConfig {
    #[serde(default = "default_create_tokens")]
    pub create_tokens: TokenSet,
    #[serde(default = "default_manage_tokens")]
    pub manage_tokens: TokenSet,
}

fn default_create_tokens() -> TokenSet {
    [Permission::CreateDatasources.token()].into_iter().collect()
}

fn default_manage_tokens() -> TokenSet {
    [Permission::ManageDatasources.token()].into_iter().collect()
}

impl Default for PermissionConfig {
    fn default() -> Self {
        Self {
            create_tokens: default_create_tokens(),
            manage_tokens: default_manage_tokens(),
        }
    }
}

/// Maps a principal's token set to capability flags.
///
/// Holds no per-principal state; the same projector serves the workspace
/// token set and every datasource token set in a render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionProjector {
    config: PermissionConfig,
}

impl PermissionProjector {
    pub fn new(config: PermissionConfig) -> Self {
        Self { config }
    }

    /// Projects a token set. An absent set is treated as empty.
    pub fn project(&self, tokens: Option<&TokenSet>) -> Capabilities {
        match tokens {
            Some(tokens) => Capabilities {
                can_create: !tokens.is_disjoint(&self.config.create_tokens),
                can_manage: !tokens.is_disjoint(&self.config.manage_tokens),
            },
            None => Capabilities::default(),
        }
    }

    /// Workspace-level check for the create affordances.
    pub fn can_create(&self, workspace_tokens: Option<&TokenSet>) -> bool {
        self.project(workspace_tokens).can_create
    }

    /// Record-level check for the per-row manage affordances.
    pub fn can_manage(&self, record_tokens: Option<&TokenSet>) -> bool {
        self.project(record_tokens).can_manage
    }
}
