//! FILENAME: core/pivot-engine/src/engine.rs
//! Pivot Engine - groups filtered rows and reduces their value fields.
//!
//! Algorithm:
//! 1. Resolve row / column / value field names to dataset columns once
//! 2. For each row, build a structured (row key, column key) pair
//! 3. Look the pair up in a hash map; first sight allocates a new group
//! 4. Feed each value field into that group's accumulators
//! 5. Compute every accumulator with its field's aggregation
//!
//! Keys are tuples of stringified values, not delimiter-joined strings, so
//! cell text can never collide with a separator.

use std::collections::hash_map::Entry;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use engine::{CellValue, Dataset, FieldIndex, Row};
use crate::cache::AggregateAccumulator;
use crate::definition::{FieldRef, PivotConfig};

// ============================================================================
// GROUP KEYS
// ============================================================================

/// Stringified field values forming one key, in field order.
pub type KeyParts = SmallVec<[String; 4]>;

/// A composite grouping key (row axis or column axis).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey(pub KeyParts);

impl GroupKey {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GroupKey(parts.into_iter().map(Into::into).collect())
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// Display label: parts joined with " / ".
    pub fn label(&self) -> String {
        self.0.join(" / ")
    }

    fn from_row(row: &Row, indices: &[Option<FieldIndex>]) -> Self {
        GroupKey(indices.iter().map(|i| row.get_opt(*i).display_value()).collect())
    }
}

/// The column-axis key of a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColumnKey {
    /// No column split configured.
    All,
    /// One combination of the column-split fields.
    Split(GroupKey),
}

impl ColumnKey {
    pub fn label(&self) -> String {
        match self {
            ColumnKey::All => String::new(),
            ColumnKey::Split(key) => key.label(),
        }
    }

    pub fn is_split(&self) -> bool {
        matches!(self, ColumnKey::Split(_))
    }
}

// ============================================================================
// AGGREGATED OUTPUT
// ============================================================================

/// One distinct (row key, column key) combination with its computed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedGroup {
    pub row_key: GroupKey,
    pub col_key: ColumnKey,

    /// First-seen raw values of the row fields (for display).
    pub row_labels: Vec<CellValue>,

    /// First-seen raw values of the column fields (empty without a split).
    pub col_labels: Vec<CellValue>,

    /// One value per configured value field, in Values-area order.
    pub values: SmallVec<[f64; 4]>,

    /// Number of member rows.
    pub row_count: usize,
}

impl AggregatedGroup {
    /// Value of the n-th value field; 0 when out of range.
    pub fn value(&self, field: usize) -> f64 {
        self.values.get(field).copied().unwrap_or(0.0)
    }

    /// Row labels joined with " / " (the chart category label).
    pub fn row_label(&self) -> String {
        join_labels(&self.row_labels)
    }
}

/// Joins raw labels for display.
pub fn join_labels(labels: &[CellValue]) -> String {
    labels
        .iter()
        .map(CellValue::display_value)
        .collect::<Vec<_>>()
        .join(" / ")
}

/// In-progress state of a group while rows are being scanned.
struct GroupBuilder {
    row_key: GroupKey,
    col_key: ColumnKey,
    row_labels: Vec<CellValue>,
    col_labels: Vec<CellValue>,
    accumulators: Vec<AggregateAccumulator>,
    row_count: usize,
}

fn resolve(dataset: &Dataset, fields: &[FieldRef]) -> SmallVec<[Option<FieldIndex>; 4]> {
    fields.iter().map(|f| dataset.column_index(&f.name)).collect()
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Groups the filtered rows and computes every value field per group.
///
/// Returns `None` while the pivot is not configured (no row fields or no
/// value fields). Groups come back in the order their (row, column) key
/// pair was first encountered.
pub fn aggregate(
    dataset: &Dataset,
    rows: &[&Row],
    pivot: &PivotConfig,
) -> Option<Vec<AggregatedGroup>> {
    if !pivot.is_configured() {
        return None;
    }

    let row_indices = resolve(dataset, &pivot.rows);
    let col_indices = resolve(dataset, &pivot.columns);
    let value_indices = resolve(dataset, &pivot.values);

    let mut index: FxHashMap<(GroupKey, ColumnKey), usize> = FxHashMap::default();
    let mut builders: Vec<GroupBuilder> = Vec::new();

    for row in rows {
        let row_key = GroupKey::from_row(row, &row_indices);
        let col_key = if col_indices.is_empty() {
            ColumnKey::All
        } else {
            ColumnKey::Split(GroupKey::from_row(row, &col_indices))
        };

        let slot = match index.entry((row_key, col_key)) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let (row_key, col_key) = entry.key().clone();
                builders.push(GroupBuilder {
                    row_key,
                    col_key,
                    row_labels: row_indices.iter().map(|i| row.get_opt(*i).clone()).collect(),
                    col_labels: col_indices.iter().map(|i| row.get_opt(*i).clone()).collect(),
                    accumulators: vec![AggregateAccumulator::new(); value_indices.len()],
                    row_count: 0,
                });
                *entry.insert(builders.len() - 1)
            }
        };

        let builder = &mut builders[slot];
        builder.row_count += 1;
        for (acc, value_index) in builder.accumulators.iter_mut().zip(&value_indices) {
            match row.get_opt(*value_index).as_number() {
                Some(n) => acc.add_number(n),
                None => acc.add_non_number(),
            }
        }
    }

    let groups: Vec<AggregatedGroup> = builders
        .into_iter()
        .map(|b| AggregatedGroup {
            values: b
                .accumulators
                .iter()
                .zip(&pivot.values)
                .map(|(acc, field)| acc.compute(field.aggregation()))
                .collect(),
            row_key: b.row_key,
            col_key: b.col_key,
            row_labels: b.row_labels,
            col_labels: b.col_labels,
            row_count: b.row_count,
        })
        .collect();

    log::debug!(
        target: "PIVOT",
        "aggregated {} rows into {} groups ({} value fields)",
        rows.len(),
        groups.len(),
        pivot.values.len()
    );

    Some(groups)
}
