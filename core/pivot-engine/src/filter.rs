//! FILENAME: core/pivot-engine/src/filter.rs
//! Filter Engine - per-column inclusion sets applied before aggregation.
//!
//! A filter field without a selection entry lets every row through. Entries
//! are created lazily (full set of observed values) the first time the user
//! touches a filter, and dropped when the field leaves the Filter area.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use engine::{Dataset, FieldIndex, Row};
use crate::definition::PivotConfig;

/// Permitted stringified values per filter column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    selections: FxHashMap<String, FxHashSet<String>>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&FxHashSet<String>> {
        self.selections.get(column)
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.selections.contains_key(column)
    }

    /// Columns that currently carry a selection.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.selections.keys().map(String::as_str)
    }

    /// Whether a value passes the filter for a column.
    /// Columns without an entry permit everything.
    pub fn is_selected(&self, column: &str, value: &str) -> bool {
        self.selections
            .get(column)
            .map_or(true, |set| set.contains(value))
    }

    /// Creates the entry for a column with every observed value selected,
    /// unless one already exists.
    pub fn ensure<I>(&mut self, column: &str, all_values: I)
    where
        I: IntoIterator<Item = String>,
    {
        if !self.selections.contains_key(column) {
            self.selections
                .insert(column.to_string(), all_values.into_iter().collect());
        }
    }

    /// Replaces a column's selection outright.
    pub fn set<I>(&mut self, column: &str, values: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.selections
            .insert(column.to_string(), values.into_iter().collect());
    }

    /// Checks or unchecks one value. The entry is populated with all observed
    /// values first if the column had none.
    pub fn toggle<I>(&mut self, column: &str, value: &str, checked: bool, all_values: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.ensure(column, all_values);
        if let Some(set) = self.selections.get_mut(column) {
            if checked {
                set.insert(value.to_string());
            } else {
                set.remove(value);
            }
        }
    }

    /// Drops the selection of a column.
    pub fn remove(&mut self, column: &str) -> bool {
        self.selections.remove(column).is_some()
    }

    /// Keeps only entries whose column is still in the Filter area.
    pub fn retain_filters(&mut self, pivot: &PivotConfig) {
        self.selections
            .retain(|column, _| pivot.filters.iter().any(|f| f.name == *column));
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

/// Sorted, de-duplicated stringified values of a column (missing -> "").
pub fn distinct_values(dataset: &Dataset, column: &str) -> Vec<String> {
    let index = dataset.column_index(column);
    let mut seen: FxHashSet<String> = FxHashSet::default();
    for row in &dataset.rows {
        seen.insert(row.get_opt(index).display_value());
    }
    let mut values: Vec<String> = seen.into_iter().collect();
    values.sort();
    values
}

/// Applies the configured filters to the dataset.
///
/// A row survives when, for every filter field that has a selection, its
/// stringified value is in that selection. The result keeps dataset order.
pub fn filter_rows<'a>(
    dataset: &'a Dataset,
    pivot: &PivotConfig,
    selection: &FilterSelection,
) -> Vec<&'a Row> {
    let active: Vec<(Option<FieldIndex>, &FxHashSet<String>)> = pivot
        .filters
        .iter()
        .filter_map(|field| {
            selection
                .get(&field.name)
                .map(|set| (dataset.column_index(&field.name), set))
        })
        .collect();

    if active.is_empty() {
        return dataset.rows.iter().collect();
    }

    let rows: Vec<&Row> = dataset
        .rows
        .iter()
        .filter(|row| {
            active
                .iter()
                .all(|(index, set)| set.contains(&row.get_opt(*index).display_value()))
        })
        .collect();

    log::debug!(
        target: "PIVOT",
        "filter kept {} of {} rows across {} active filters",
        rows.len(),
        dataset.len(),
        active.len()
    );
    rows
}
