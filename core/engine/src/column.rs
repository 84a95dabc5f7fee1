//! FILENAME: core/engine/src/column.rs
//! PURPOSE: Column type inference for a freshly imported dataset.
//! CONTEXT: Runs exactly once per data load. The inferred type drives the
//! default aggregation of value fields (sum for numbers, count otherwise)
//! and the type badges shown in the field list.

use serde::{Deserialize, Serialize};
use crate::cell::CellValue;
use crate::dataset::{Dataset, FieldIndex};
use crate::datetime::parse_cell_date;

/// Maximum number of non-empty values sampled per column.
pub const SAMPLE_LIMIT: usize = 100;

/// A type wins when strictly more than this share of samples parses as it.
const TYPE_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Number,
    Date,
}

/// A column descriptor: name plus inferred type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Column {
            name: name.into(),
            column_type,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.column_type == ColumnType::Number
    }
}

/// Classifies every column of the dataset, in header order.
pub fn detect_columns(dataset: &Dataset) -> Vec<Column> {
    dataset
        .columns
        .iter()
        .enumerate()
        .map(|(idx, name)| Column::new(name.clone(), infer_column_type(dataset, idx)))
        .collect()
}

/// Infers one column's type from its first non-empty values.
fn infer_column_type(dataset: &Dataset, index: FieldIndex) -> ColumnType {
    let samples: Vec<&CellValue> = dataset
        .rows
        .iter()
        .map(|row| row.get(index))
        .filter(|value| !value.is_blank())
        .take(SAMPLE_LIMIT)
        .collect();

    if samples.is_empty() {
        return ColumnType::Text;
    }

    let total = samples.len() as f64;

    let numeric = samples
        .iter()
        .filter(|v| v.as_strict_number().is_some())
        .count();
    if numeric as f64 / total > TYPE_THRESHOLD {
        return ColumnType::Number;
    }

    let dates = samples
        .iter()
        .filter(|v| parse_cell_date(v).is_some())
        .count();
    if dates as f64 / total > TYPE_THRESHOLD {
        return ColumnType::Date;
    }

    ColumnType::Text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Row;

    fn single_column(values: Vec<CellValue>) -> Dataset {
        Dataset::new(
            vec!["Col".to_string()],
            values.into_iter().map(|v| Row::new(vec![v])).collect(),
        )
    }

    #[test]
    fn test_numeric_text_is_number() {
        let dataset = single_column(vec!["10".into(), "20.5".into(), "-3".into()]);
        assert_eq!(detect_columns(&dataset)[0].column_type, ColumnType::Number);
    }

    #[test]
    fn test_threshold_is_strict() {
        // 4 of 5 numeric = exactly 0.8, which is not enough
        let dataset = single_column(vec![
            "1".into(),
            "2".into(),
            "3".into(),
            "4".into(),
            "n/a".into(),
        ]);
        assert_eq!(detect_columns(&dataset)[0].column_type, ColumnType::Text);
    }

    #[test]
    fn test_blank_values_are_not_samples() {
        let dataset = single_column(vec![
            CellValue::Empty,
            "".into(),
            "2024-01-01".into(),
            "2024-02-01".into(),
        ]);
        assert_eq!(detect_columns(&dataset)[0].column_type, ColumnType::Date);
    }

    #[test]
    fn test_no_samples_is_text() {
        let dataset = single_column(vec![CellValue::Empty, "".into()]);
        assert_eq!(detect_columns(&dataset)[0].column_type, ColumnType::Text);
    }

    #[test]
    fn test_only_first_hundred_samples_count() {
        let mut values: Vec<CellValue> = (0..SAMPLE_LIMIT).map(|i| CellValue::from(i as f64)).collect();
        values.extend((0..500).map(|_| CellValue::from("text")));
        let dataset = single_column(values);
        assert_eq!(detect_columns(&dataset)[0].column_type, ColumnType::Number);
    }

    #[test]
    fn test_column_serializes_with_type_key() {
        let json = serde_json::to_string(&Column::new("Revenue", ColumnType::Number)).unwrap();
        assert_eq!(json, r#"{"name":"Revenue","type":"number"}"#);
    }
}
