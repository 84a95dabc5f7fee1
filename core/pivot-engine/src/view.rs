//! FILENAME: core/pivot-engine/src/view.rs
//! Pivot View - the preview table shown before charting.
//!
//! Two shapes:
//! - Raw: the first rows of the filtered data, while the pivot is not
//!   configured yet
//! - Aggregated: one row per category, one column per (split key, value
//!   field) pair, values formatted for display

use serde::{Deserialize, Serialize};
use engine::{format_number, Dataset, Row};
use crate::axes::GroupAxes;
use crate::definition::PivotConfig;
use crate::engine::{AggregatedGroup, ColumnKey};

/// Maximum number of raw rows rendered in the preview.
pub const PREVIEW_ROW_LIMIT: usize = 200;

/// A display-ready table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotPreview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Status line, e.g. "12 groups from 480 rows".
    pub summary: String,
    pub is_aggregated: bool,
}

/// Builds the preview for the current pivot.
///
/// `groups` is the output of `aggregate`; `None` renders the raw rows.
pub fn build_preview(
    dataset: &Dataset,
    filtered_rows: &[&Row],
    pivot: &PivotConfig,
    groups: Option<&[AggregatedGroup]>,
) -> PivotPreview {
    match groups {
        Some(groups) => aggregated_preview(filtered_rows.len(), pivot, groups),
        None => raw_preview(dataset, filtered_rows),
    }
}

fn raw_preview(dataset: &Dataset, filtered_rows: &[&Row]) -> PivotPreview {
    let column_count = dataset.column_count();
    let mut summary = format!("{} rows, {} columns", dataset.len(), column_count);
    if filtered_rows.len() > PREVIEW_ROW_LIMIT {
        summary.push_str(&format!(" (showing first {})", PREVIEW_ROW_LIMIT));
    }

    if filtered_rows.is_empty() {
        return PivotPreview {
            summary,
            ..PivotPreview::default()
        };
    }

    let rows = filtered_rows
        .iter()
        .take(PREVIEW_ROW_LIMIT)
        .map(|row| (0..column_count).map(|i| row.get(i).display_value()).collect())
        .collect();

    PivotPreview {
        headers: dataset.columns.clone(),
        rows,
        summary,
        is_aggregated: false,
    }
}

fn aggregated_preview(
    filtered_count: usize,
    pivot: &PivotConfig,
    groups: &[AggregatedGroup],
) -> PivotPreview {
    let axes = GroupAxes::new(groups, pivot);

    let series: Vec<ColumnKey> = if axes.split_active() {
        axes.split_keys().to_vec()
    } else {
        vec![axes.base_key()]
    };

    let mut headers: Vec<String> = pivot.rows.iter().map(|f| f.name.clone()).collect();
    for key in &series {
        for field in &pivot.values {
            if axes.split_active() {
                headers.push(format!("{} {}", key.label(), field.display_name()));
            } else {
                headers.push(field.display_name());
            }
        }
    }

    let rows: Vec<Vec<String>> = axes
        .categories()
        .iter()
        .map(|category| {
            let mut cells: Vec<String> = axes
                .first_group(&category.key)
                .map(|g| g.row_labels.iter().map(|l| l.display_value()).collect())
                .unwrap_or_default();
            for key in &series {
                for field in 0..pivot.values.len() {
                    cells.push(format_number(axes.value(&category.key, key, field)));
                }
            }
            cells
        })
        .collect();

    PivotPreview {
        headers,
        summary: format!("{} groups from {} rows", rows.len(), filtered_count),
        rows,
        is_aggregated: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{AggregationType, FieldRef, PivotRole};
    use crate::engine::aggregate;
    use engine::CellValue;

    fn create_test_dataset() -> Dataset {
        Dataset::from_records(vec![
            vec![("Region", CellValue::from("N")), ("Product", CellValue::from("A")), ("Revenue", CellValue::from(1000.0))],
            vec![("Region", CellValue::from("N")), ("Product", CellValue::from("B")), ("Revenue", CellValue::from(2000.5))],
            vec![("Region", CellValue::from("S")), ("Product", CellValue::from("A")), ("Revenue", CellValue::from(50.0))],
        ])
    }

    #[test]
    fn test_raw_preview_when_unconfigured() {
        let dataset = create_test_dataset();
        let rows: Vec<&Row> = dataset.rows.iter().collect();
        let preview = build_preview(&dataset, &rows, &PivotConfig::new(), None);

        assert!(!preview.is_aggregated);
        assert_eq!(preview.headers, vec!["Region", "Product", "Revenue"]);
        assert_eq!(preview.rows[0], vec!["N", "A", "1000"]);
        assert_eq!(preview.summary, "3 rows, 3 columns");
    }

    #[test]
    fn test_raw_preview_truncates() {
        let records: Vec<Vec<(&str, CellValue)>> = (0..250)
            .map(|i| vec![("Id", CellValue::from(i as f64))])
            .collect();
        let dataset = Dataset::from_records(records);
        let rows: Vec<&Row> = dataset.rows.iter().collect();
        let preview = build_preview(&dataset, &rows, &PivotConfig::new(), None);

        assert_eq!(preview.rows.len(), PREVIEW_ROW_LIMIT);
        assert_eq!(preview.summary, "250 rows, 1 columns (showing first 200)");
    }

    #[test]
    fn test_aggregated_preview_without_split() {
        let dataset = create_test_dataset();
        let pivot = PivotConfig::new()
            .with_field(PivotRole::Rows, FieldRef::new("Region"))
            .with_field(PivotRole::Values, FieldRef::value("Revenue", AggregationType::Sum));
        let rows: Vec<&Row> = dataset.rows.iter().collect();
        let groups = aggregate(&dataset, &rows, &pivot).unwrap();
        let preview = build_preview(&dataset, &rows, &pivot, Some(groups.as_slice()));

        assert!(preview.is_aggregated);
        assert_eq!(preview.headers, vec!["Region", "Revenue (sum)"]);
        assert_eq!(preview.rows, vec![vec!["N", "3,000.5"], vec!["S", "50"]]);
        assert_eq!(preview.summary, "2 groups from 3 rows");
    }

    #[test]
    fn test_aggregated_preview_with_split_fills_zeros() {
        let dataset = create_test_dataset();
        let pivot = PivotConfig::new()
            .with_field(PivotRole::Rows, FieldRef::new("Region"))
            .with_field(PivotRole::Columns, FieldRef::new("Product"))
            .with_field(PivotRole::Values, FieldRef::value("Revenue", AggregationType::Sum));
        let rows: Vec<&Row> = dataset.rows.iter().collect();
        let groups = aggregate(&dataset, &rows, &pivot).unwrap();
        let preview = build_preview(&dataset, &rows, &pivot, Some(groups.as_slice()));

        assert_eq!(
            preview.headers,
            vec!["Region", "A Revenue (sum)", "B Revenue (sum)"]
        );
        assert_eq!(preview.rows[0], vec!["N", "1,000", "2,000.5"]);
        assert_eq!(preview.rows[1], vec!["S", "50", "0"]);
    }
}
