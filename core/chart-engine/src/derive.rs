//! FILENAME: core/chart-engine/src/derive.rs
//! Shared derivations over aggregated groups, computed once per build.
//!
//! Every family reads categories, series and cell values through
//! `ChartData` instead of re-deriving them from the group list.

use pivot_engine::{AggregatedGroup, ColumnKey, GroupAxes, PivotConfig};
use crate::spec::{DataItem, Datum, ItemValue, Label};

/// One plotted series: which column key and which value field it reads.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDef {
    pub name: String,
    pub col_key: ColumnKey,
    pub field: usize,
}

/// Categories, series and value lookups for one chart build.
#[derive(Debug, Clone)]
pub struct ChartData<'a> {
    pub axes: GroupAxes<'a>,
    pub pivot: &'a PivotConfig,
    /// Category labels in first-seen order.
    pub categories: Vec<String>,
    /// One series per split key when a split is active, otherwise one per
    /// value field.
    pub series: Vec<SeriesDef>,
}

impl<'a> ChartData<'a> {
    /// `None` when there is nothing to plot.
    pub fn new(groups: &'a [AggregatedGroup], pivot: &'a PivotConfig) -> Option<Self> {
        if groups.is_empty() || pivot.values.is_empty() {
            return None;
        }

        let axes = GroupAxes::new(groups, pivot);
        let categories = axes.category_labels();

        let series = if axes.split_active() {
            axes.split_keys()
                .iter()
                .map(|key| SeriesDef {
                    name: key.label(),
                    col_key: key.clone(),
                    field: 0,
                })
                .collect()
        } else {
            let base = axes.base_key();
            pivot
                .values
                .iter()
                .enumerate()
                .map(|(field, value)| SeriesDef {
                    name: value.display_name(),
                    col_key: base.clone(),
                    field,
                })
                .collect()
        };

        Some(ChartData {
            axes,
            pivot,
            categories,
            series,
        })
    }

    pub fn split_active(&self) -> bool {
        self.axes.split_active()
    }

    /// One value per category for a series.
    pub fn series_values(&self, def: &SeriesDef) -> Vec<f64> {
        self.axes.series_values(&def.col_key, def.field)
    }

    /// Name of the first value field (the one single-measure charts plot).
    pub fn first_field_name(&self) -> &str {
        self.pivot
            .values
            .first()
            .map_or("", |f| f.name.as_str())
    }

    /// (category label, value) per category, ignoring any split.
    pub fn category_values(&self, field: usize) -> Vec<(String, f64)> {
        self.axes
            .categories()
            .iter()
            .map(|c| (c.label.clone(), self.axes.row_value(&c.key, field)))
            .collect()
    }

    /// Per-category totals across all split keys.
    pub fn category_totals(&self, field: usize) -> Vec<f64> {
        self.axes
            .categories()
            .iter()
            .map(|c| self.axes.row_total(&c.key, field))
            .collect()
    }

    /// Number of configured value fields.
    pub fn value_count(&self) -> usize {
        self.pivot.values.len()
    }
}

/// Series data points. With labels on, each point carries its label text.
pub fn points<F>(values: &[f64], labels: bool, format: F) -> Vec<Datum>
where
    F: Fn(f64) -> String,
{
    values
        .iter()
        .map(|&v| {
            if labels {
                Datum::Item(DataItem {
                    label: Some(Label::text(format(v))),
                    ..DataItem::new(ItemValue::Number(v))
                })
            } else {
                Datum::Value(v)
            }
        })
        .collect()
}
