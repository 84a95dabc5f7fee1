//! FILENAME: core/persistence/src/csv_reader.rs

use crate::{build_dataset, PersistenceError};
use csv::ReaderBuilder;
use engine::{CellValue, Dataset};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub fn load_csv(path: &Path) -> Result<Dataset, PersistenceError> {
    let file = File::open(path)?;
    read_csv(file)
}

/// Reads CSV text. The first record is the header; records may be shorter
/// or longer than it. Every cell stays text (numbers are parsed downstream)
/// and empty cells read as missing.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset, PersistenceError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = csv_reader.records();

    let header: Vec<CellValue> = match records.next() {
        Some(record) => record?.iter().map(text_cell).collect(),
        None => return Err(PersistenceError::EmptyFile),
    };

    let mut rows = Vec::new();
    for record in records {
        rows.push(record?.iter().map(text_cell).collect());
    }

    build_dataset(&header, rows)
}

fn text_cell(field: &str) -> CellValue {
    if field.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(field.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_keeps_text() {
        let data = "Region,Revenue\nNorth,100\nSouth,50.5\n";
        let dataset = read_csv(data.as_bytes()).unwrap();

        assert_eq!(dataset.columns, vec!["Region", "Revenue"]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows[1].values[1], CellValue::Text("50.5".to_string()));
        assert_eq!(dataset.rows[1].values[1].as_number(), Some(50.5));
    }

    #[test]
    fn test_read_csv_ragged_records() {
        let data = "A,B,C\n1\n1,2,3,4\n";
        let dataset = read_csv(data.as_bytes()).unwrap();

        assert_eq!(dataset.rows[0].values, vec![
            CellValue::Text("1".to_string()),
            CellValue::Empty,
            CellValue::Empty,
        ]);
        // The extra field has no header and is dropped
        assert_eq!(dataset.rows[1].values.len(), 3);
    }

    #[test]
    fn test_read_csv_quoted_fields() {
        let data = "Name,Note\n\"Smith, J\",\"said \"\"hi\"\"\"\n";
        let dataset = read_csv(data.as_bytes()).unwrap();
        assert_eq!(dataset.rows[0].values[0].display_value(), "Smith, J");
        assert_eq!(dataset.rows[0].values[1].display_value(), "said \"hi\"");
    }

    #[test]
    fn test_header_only_is_empty() {
        assert!(matches!(
            read_csv("A,B\n".as_bytes()),
            Err(PersistenceError::EmptyFile)
        ));
        assert!(matches!(read_csv("".as_bytes()), Err(PersistenceError::EmptyFile)));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let data = "A,B\n1,2\n,\n3,4\n";
        let dataset = read_csv(data.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);
    }
}
