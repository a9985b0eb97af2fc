use explorer_types::{DatasourceId, NavigationContext};

/// Returns the datasource open in the editor, if any.
///
/// No fallback: without an open-datasource segment nothing is active.
pub fn resolve_active_id(navigation: &NavigationContext) -> Option<&DatasourceId> {
    navigation.open_datasource_id.as_ref()
}
