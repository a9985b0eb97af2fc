use explorer_types::{PluginId, PluginRecord};
use std::collections::HashMap;

/// Plugin lookup built once per render pass.
///
/// Borrows the plugin snapshot and keeps a position index into it, so rows
/// reference plugins without cloning or rescanning the collection.
#[derive(Debug, Clone)]
pub struct PluginIndex<'a> {
    plugins: &'a [PluginRecord],
    by_id: HashMap<&'a PluginId, usize>,
}

impl<'a> PluginIndex<'a> {
    /// Indexes the given plugins. On duplicate ids the later record wins.
    pub fn new(plugins: &'a [PluginRecord]) -> Self {
        let by_id = plugins
            .iter()
            .enumerate()
            .map(|(pos, plugin)| (&plugin.id, pos))
            .collect();
        Self { plugins, by_id }
    }

    /// Returns the plugin for an id, or `None` if the snapshot lacks it.
    pub fn get(&self, id: &PluginId) -> Option<&'a PluginRecord> {
        self.by_id.get(id).map(|&pos| &self.plugins[pos])
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
