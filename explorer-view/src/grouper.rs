//! Partitioning of datasources into "used here" and "available elsewhere".
//!
//! Ordering is always the input order. Rows are keyed by id downstream, so a
//! reorder between renders would re-mount every row.

use explorer_types::{ActionRecord, DatasourceId, DatasourceRecord};
use serde::Serialize;
use std::collections::HashSet;

/// Membership test: is a datasource referenced by the current application?
pub trait DatasourceUsage {
    fn is_used(&self, id: &DatasourceId) -> bool;
}

impl<F> DatasourceUsage for F
where
    F: Fn(&DatasourceId) -> bool,
{
    fn is_used(&self, id: &DatasourceId) -> bool {
        self(id)
    }
}

/// Set of datasource ids referenced by the application's actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageIndex {
    ids: HashSet<DatasourceId>,
}

impl UsageIndex {
    /// Collects stored datasource references from every action.
    /// Embedded datasources are skipped.
    pub fn from_actions(actions: &[ActionRecord]) -> Self {
        let ids = actions
            .iter()
            .filter_map(|action| action.datasource.as_ref())
            .filter_map(|reference| reference.stored_id())
            .cloned()
            .collect();
        Self { ids }
    }

    pub fn from_ids<I: IntoIterator<Item = DatasourceId>>(ids: I) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl DatasourceUsage for UsageIndex {
    fn is_used(&self, id: &DatasourceId) -> bool {
        self.ids.contains(id)
    }
}

/// Result of [`group`]: every input record lands in exactly one side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasourceGroups<'a> {
    pub primary: Vec<&'a DatasourceRecord>,
    pub other: Vec<&'a DatasourceRecord>,
}

/// Splits datasources by the membership test, keeping input order per side.
pub fn group<'a, U>(all: &'a [DatasourceRecord], usage: &U) -> DatasourceGroups<'a>
where
    U: DatasourceUsage + ?Sized,
{
    let (primary, other) = all.iter().partition(|ds| usage.is_used(&ds.id));
    DatasourceGroups { primary, other }
}

/// Suggestions whose id is not already in `primary`, in suggestion order.
pub(crate) fn novel_suggestions<'a, 'p>(
    primary: &'p [&'a DatasourceRecord],
    suggestions: &'a [DatasourceRecord],
) -> impl Iterator<Item = &'a DatasourceRecord> + 'p
where
    'a: 'p,
{
    let seen: HashSet<&DatasourceId> = primary.iter().map(|ds| &ds.id).collect();
    suggestions.iter().filter(move |ds| !seen.contains(&ds.id))
}

/// Primary records followed by the suggestions not already among them.
///
/// Only ids in `primary` are filtered; duplicates inside `suggestions` or
/// overlaps with unused records are the supplier's concern.
pub fn suggest<'a>(
    primary: &[&'a DatasourceRecord],
    suggestions: &'a [DatasourceRecord],
) -> Vec<&'a DatasourceRecord> {
    let mut merged = Vec::with_capacity(primary.len() + suggestions.len());
    merged.extend_from_slice(primary);
    merged.extend(novel_suggestions(primary, suggestions));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ds(id: &str) -> DatasourceRecord {
        DatasourceRecord::new(id, id.to_uppercase(), "p1")
    }

    fn ids(records: &[&DatasourceRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn partition_keeps_order() {
        let all = vec![ds("a"), ds("b"), ds("c"), ds("d")];
        let usage = UsageIndex::from_ids([DatasourceId::new("d"), DatasourceId::new("b")]);
        let groups = group(&all, &usage);
        assert_eq!(ids(&groups.primary), ["b", "d"]);
        assert_eq!(ids(&groups.other), ["a", "c"]);
    }

    #[test]
    fn closure_usage() {
        let all = vec![ds("a"), ds("b")];
        let groups = group(&all, &|id: &DatasourceId| id.as_str() == "a");
        assert_eq!(ids(&groups.primary), ["a"]);
    }

    #[test]
    fn suggest_skips_primary_ids() {
        let all = vec![ds("a"), ds("b")];
        let primary: Vec<&DatasourceRecord> = all.iter().collect();
        let suggestions = vec![ds("b"), ds("x"), ds("y")];
        assert_eq!(ids(&suggest(&primary, &suggestions)), ["a", "b", "x", "y"]);
    }

    #[test]
    fn suggest_with_empty_primary() {
        let suggestions = vec![ds("x")];
        assert_eq!(ids(&suggest(&[], &suggestions)), ["x"]);
    }

    #[test]
    fn usage_from_actions_skips_embedded_and_unbound() {
        let mut embedded = ActionRecord::stored("a2", "page", "inline");
        if let Some(reference) = embedded.datasource.as_mut() {
            reference.datasource_configuration = Some(serde_json::json!({"url": "x"}));
        }
        let unbound = ActionRecord {
            id: "a3".into(),
            page_id: "page".into(),
            datasource: None,
        };
        let actions = vec![
            ActionRecord::stored("a1", "page", "ds-1"),
            embedded,
            unbound,
            ActionRecord::stored("a4", "other-page", "ds-1"),
        ];
        let usage = UsageIndex::from_actions(&actions);
        assert_eq!(usage.len(), 1);
        assert!(usage.is_used(&DatasourceId::new("ds-1")));
        assert!(!usage.is_used(&DatasourceId::new("inline")));
    }
}
