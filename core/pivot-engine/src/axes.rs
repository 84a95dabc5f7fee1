//! FILENAME: core/pivot-engine/src/axes.rs
//! Group axes - the category / series derivation shared by every consumer
//! of aggregated groups (the preview table and all chart families).
//!
//! Computed once per render:
//! - categories: distinct row keys in first-seen order
//! - split keys: distinct column keys, sorted
//! - a (row key, column key) lookup so each cell resolves in O(1)

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use crate::definition::PivotConfig;
use crate::engine::{AggregatedGroup, ColumnKey, GroupKey};

/// One chart category (a distinct row key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub key: GroupKey,
    /// Row labels joined with " / ".
    pub label: String,
}

/// Derived axes over a set of aggregated groups.
#[derive(Debug, Clone)]
pub struct GroupAxes<'a> {
    groups: &'a [AggregatedGroup],
    categories: Vec<Category>,
    split_keys: Vec<ColumnKey>,
    split_active: bool,
    /// Row key -> column key -> group index.
    lookup: FxHashMap<&'a GroupKey, FxHashMap<&'a ColumnKey, usize>>,
    /// Row key -> first group seen with that row key.
    first_by_row: FxHashMap<&'a GroupKey, usize>,
}

impl<'a> GroupAxes<'a> {
    pub fn new(groups: &'a [AggregatedGroup], pivot: &PivotConfig) -> Self {
        let mut categories = Vec::new();
        let mut lookup: FxHashMap<&'a GroupKey, FxHashMap<&'a ColumnKey, usize>> =
            FxHashMap::default();
        let mut first_by_row: FxHashMap<&'a GroupKey, usize> = FxHashMap::default();
        let mut split_keys: Vec<ColumnKey> = Vec::new();

        for (idx, group) in groups.iter().enumerate() {
            if !first_by_row.contains_key(&group.row_key) {
                first_by_row.insert(&group.row_key, idx);
                categories.push(Category {
                    key: group.row_key.clone(),
                    label: group.row_label(),
                });
            }

            lookup
                .entry(&group.row_key)
                .or_default()
                .insert(&group.col_key, idx);

            if !split_keys.contains(&group.col_key) {
                split_keys.push(group.col_key.clone());
            }
        }

        split_keys.sort();
        let split_active = pivot.has_column_fields() && split_keys.len() >= 2;

        GroupAxes {
            groups,
            categories,
            split_keys,
            split_active,
            lookup,
            first_by_row,
        }
    }

    pub fn groups(&self) -> &'a [AggregatedGroup] {
        self.groups
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_labels(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.label.clone()).collect()
    }

    /// All distinct column keys, sorted.
    pub fn split_keys(&self) -> &[ColumnKey] {
        &self.split_keys
    }

    /// True when the column area is used and yields at least two keys.
    pub fn split_active(&self) -> bool {
        self.split_active
    }

    /// Column key read by single-series charts when no split is active.
    /// With an unused or single-valued column area this is the only key.
    pub fn base_key(&self) -> ColumnKey {
        self.split_keys.first().cloned().unwrap_or(ColumnKey::All)
    }

    pub fn get(&self, row_key: &GroupKey, col_key: &ColumnKey) -> Option<&'a AggregatedGroup> {
        let groups = self.groups;
        self.lookup
            .get(row_key)
            .and_then(|by_col| by_col.get(col_key))
            .map(|&idx| &groups[idx])
    }

    /// Value of a cell; combinations without data resolve to 0.
    pub fn value(&self, row_key: &GroupKey, col_key: &ColumnKey, field: usize) -> f64 {
        self.get(row_key, col_key).map_or(0.0, |g| g.value(field))
    }

    /// One value per category for a column key.
    pub fn series_values(&self, col_key: &ColumnKey, field: usize) -> Vec<f64> {
        self.categories
            .iter()
            .map(|c| self.value(&c.key, col_key, field))
            .collect()
    }

    /// The first group seen for a category.
    pub fn first_group(&self, row_key: &GroupKey) -> Option<&'a AggregatedGroup> {
        let groups = self.groups;
        self.first_by_row.get(row_key).map(|&idx| &groups[idx])
    }

    /// Value of a category ignoring any split: the first group seen for it.
    pub fn row_value(&self, row_key: &GroupKey, field: usize) -> f64 {
        self.first_group(row_key).map_or(0.0, |g| g.value(field))
    }

    /// Sum of a category's values across every column key.
    pub fn row_total(&self, row_key: &GroupKey, field: usize) -> f64 {
        self.lookup.get(row_key).map_or(0.0, |by_col| {
            by_col.values().map(|&idx| self.groups[idx].value(field)).sum()
        })
    }

    /// Largest value of a field across all groups (0 when there are none).
    pub fn max_value(&self, field: usize) -> f64 {
        self.groups
            .iter()
            .map(|g| g.value(field))
            .filter(|v| !v.is_nan())
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
            .unwrap_or(0.0)
    }

    /// Observed (min, max) of a field across all groups.
    pub fn value_range(&self, field: usize) -> Option<(f64, f64)> {
        self.groups
            .iter()
            .map(|g| g.value(field))
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
            })
    }
}
