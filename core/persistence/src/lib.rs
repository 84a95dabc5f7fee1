//! FILENAME: core/persistence/src/lib.rs
//! Chartwork Persistence Module
//!
//! Reads CSV and spreadsheet files into a `Dataset`, and builds the demo
//! sales data.

mod csv_reader;
mod demo;
mod error;
mod xlsx_reader;

pub use csv_reader::{load_csv, read_csv};
pub use demo::{demo_dataset, DEMO_MONTHS, DEMO_PRODUCTS, DEMO_REGIONS};
pub use error::PersistenceError;
pub use xlsx_reader::load_spreadsheet;

use engine::{CellValue, Dataset, Row};
use std::path::Path;

// ============================================================================
// FILE DISPATCH
// ============================================================================

/// Extensions read through the spreadsheet decoder.
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Loads a file by extension (case-insensitive).
pub fn load_file(path: &Path) -> Result<Dataset, PersistenceError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let dataset = if extension == "csv" {
        load_csv(path)?
    } else if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
        load_spreadsheet(path)?
    } else {
        return Err(PersistenceError::UnsupportedExtension(extension));
    };

    log::debug!(
        target: "PERSISTENCE",
        "loaded {}: {} rows, {} columns",
        path.display(),
        dataset.len(),
        dataset.column_count()
    );
    Ok(dataset)
}

// ============================================================================
// HEADER + RECORDS -> DATASET
// ============================================================================

/// Name given to header cells that are blank.
pub const EMPTY_HEADER: &str = "__EMPTY";

/// Column names for a header row. Blank cells become `__EMPTY` and repeated
/// names get a numeric suffix (`__EMPTY_1`, `Region_1`, ...).
pub fn header_names(header: &[CellValue]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(header.len());
    for cell in header {
        let text = cell.display_value();
        let base = if text.trim().is_empty() {
            EMPTY_HEADER.to_string()
        } else {
            text
        };

        let mut name = base.clone();
        let mut suffix = 1;
        while names.contains(&name) {
            name = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        names.push(name);
    }
    names
}

/// Aligns records to the header. Blank records are skipped; a file left
/// with no data rows is `EmptyFile`.
pub(crate) fn build_dataset(
    header: &[CellValue],
    records: Vec<Vec<CellValue>>,
) -> Result<Dataset, PersistenceError> {
    let columns = header_names(header);

    let rows: Vec<Row> = records
        .into_iter()
        .filter(|record| !record.iter().all(CellValue::is_blank))
        .map(|mut record| {
            record.resize(columns.len(), CellValue::Empty);
            Row::new(record)
        })
        .collect();

    if rows.is_empty() {
        return Err(PersistenceError::EmptyFile);
    }
    Ok(Dataset::new(columns, rows))
}
