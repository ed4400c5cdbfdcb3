//! Deduplicating seed collection for one category

use std::collections::BTreeSet;

/// Selected seeds for one category.
///
/// Identifiers and display labels are kept as two sets that are always
/// updated together. Both are sorted, so `ids()` and `labels_joined()` are
/// stable for the same content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedSet {
    ids: BTreeSet<String>,
    labels: BTreeSet<String>,
}

impl SeedSet {
    /// Union the given identifiers and labels into the set.
    pub fn add<I, L>(mut self, ids: I, labels: L) -> Self
    where
        I: IntoIterator<Item = String>,
        L: IntoIterator<Item = String>,
    {
        self.ids.extend(ids);
        self.labels.extend(labels);
        self
    }

    pub fn clear(self) -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn labels_joined(&self) -> String {
        self.labels
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// First `count` identifiers in sorted order.
    pub fn take_ids(&self, count: usize) -> Vec<String> {
        self.ids.iter().take(count).cloned().collect()
    }
}
