//! FILENAME: core/engine/src/dataset.rs
//! PURPOSE: The imported table: a header plus records aligned to it.
//! CONTEXT: Columns come from the first imported row. Later rows are
//! expected, not guaranteed, to carry the same keys; a key they lack reads
//! as an empty cell.

use serde::{Deserialize, Serialize};
use crate::cell::CellValue;

/// Index into the dataset header (0-based).
pub type FieldIndex = usize;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// A single imported row, aligned to the dataset header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub values: Vec<CellValue>,
}

impl Row {
    pub fn new(values: Vec<CellValue>) -> Self {
        Row { values }
    }

    /// Value at a header index; out-of-range reads as empty.
    pub fn get(&self, index: FieldIndex) -> &CellValue {
        self.values.get(index).unwrap_or(&EMPTY_CELL)
    }

    /// Value at an optional header index; `None` (unknown column) reads as empty.
    pub fn get_opt(&self, index: Option<FieldIndex>) -> &CellValue {
        index.map_or(&EMPTY_CELL, |i| self.get(i))
    }
}

/// The raw imported table. Immutable once loaded for a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Column names in first-row key order.
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Dataset { columns, rows }
    }

    /// Builds a dataset from key/value records, the shape produced by
    /// sheet-to-object decoders. The header is the first record's keys;
    /// keys that first appear in later records are ignored.
    pub fn from_records<I, R, K, V>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CellValue>,
    {
        let mut columns: Vec<String> = Vec::new();
        let mut rows = Vec::new();

        for (record_idx, record) in records.into_iter().enumerate() {
            let pairs: Vec<(String, CellValue)> = record
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect();

            if record_idx == 0 {
                columns = pairs.iter().map(|(k, _)| k.clone()).collect();
            }

            let mut values = vec![CellValue::Empty; columns.len()];
            for (key, value) in pairs {
                if let Some(idx) = columns.iter().position(|c| *c == key) {
                    values[idx] = value;
                }
            }
            rows.push(Row { values });
        }

        Dataset { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Looks up a column by name.
    pub fn column_index(&self, name: &str) -> Option<FieldIndex> {
        self.columns.iter().position(|c| c == name)
    }

    /// Reads a named cell of a row; unknown columns read as empty.
    pub fn value<'a>(&self, row: &'a Row, name: &str) -> &'a CellValue {
        row.get_opt(self.column_index(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_records_uses_first_record_header() {
        let dataset = Dataset::from_records(vec![
            vec![("A", CellValue::from(1.0)), ("B", CellValue::from("x"))],
            vec![("B", CellValue::from("y")), ("C", CellValue::from(9.0))],
        ]);

        assert_eq!(dataset.columns, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(dataset.len(), 2);
        // Missing key reads as empty, unknown key is dropped
        assert_eq!(dataset.rows[1].values, vec![CellValue::Empty, CellValue::from("y")]);
    }

    #[test]
    fn test_value_lookup_for_unknown_column() {
        let dataset = Dataset::new(
            vec!["A".to_string()],
            vec![Row::new(vec![CellValue::from(3.0)])],
        );
        let row = &dataset.rows[0];
        assert_eq!(dataset.value(row, "A"), &CellValue::Number(3.0));
        assert_eq!(dataset.value(row, "Missing"), &CellValue::Empty);
        assert_eq!(row.get(7), &CellValue::Empty);
    }
}
