//! Navigation context supplied by the host router.

use serde::{Deserialize, Serialize};

use crate::ids::{ContainerId, DatasourceId, PageId};

/// Where the user currently is in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationContext {
    pub container_id: ContainerId,
    pub page_id: PageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_datasource_id: Option<DatasourceId>,
}

impl NavigationContext {
    pub fn new(container_id: impl Into<String>, page_id: impl Into<String>) -> Self {
        Self {
            container_id: ContainerId::new(container_id),
            page_id: PageId::new(page_id),
            open_datasource_id: None,
        }
    }

    pub fn with_open_datasource(mut self, id: impl Into<String>) -> Self {
        self.open_datasource_id = Some(DatasourceId::new(id));
        self
    }

    /// Builds a context from an editor URL path.
    ///
    /// Recognized shapes, matched at the end of the path:
    /// - `.../edit/datasource/<id>`
    /// - `.../edit/saas/<pluginPackageName>/datasources/<id>`
    pub fn from_path(container_id: ContainerId, page_id: PageId, path: &str) -> Self {
        Self {
            container_id,
            page_id,
            open_datasource_id: datasource_id_from_path(path),
        }
    }
}

fn datasource_id_from_path(path: &str) -> Option<DatasourceId> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [.., "edit", "datasource", id] | [.., "edit", "saas", _, "datasources", id] => {
            Some(DatasourceId::new(*id))
        }
        _ => None,
    }
}
