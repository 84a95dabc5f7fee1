//! FILENAME: core/persistence/src/xlsx_reader.rs

use crate::{build_dataset, PersistenceError};
use calamine::{open_workbook_auto, Data, Reader};
use engine::{CellValue, Dataset};
use std::path::Path;

/// Date cells are rendered with this pattern.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Loads the first sheet of a spreadsheet (.xlsx, .xlsm, .xlsb, .xls, .ods).
/// The first row is the header.
pub fn load_spreadsheet(path: &Path) -> Result<Dataset, PersistenceError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| PersistenceError::InvalidFormat(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    let first = sheet_names.first().ok_or_else(|| {
        PersistenceError::InvalidFormat("Workbook contains no sheets".to_string())
    })?;

    let range = workbook.worksheet_range(first)?;
    log::debug!(
        target: "PERSISTENCE",
        "sheet '{}': {} x {}",
        first,
        range.height(),
        range.width()
    );

    let mut rows = range.rows();
    let header: Vec<CellValue> = match rows.next() {
        Some(cells) => cells.iter().map(convert_cell).collect(),
        None => return Err(PersistenceError::EmptyFile),
    };
    let records: Vec<Vec<CellValue>> = rows
        .map(|cells| cells.iter().map(convert_cell).collect())
        .collect();

    build_dataset(&header, records)
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => CellValue::Text(value.format(DATE_FORMAT).to_string()),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => CellValue::Text(iso_date(s)),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

/// The date part of an ISO timestamp ("2024-01-15T00:00:00" -> "2024-01-15").
fn iso_date(s: &str) -> String {
    match s.split_once('T') {
        Some((date, _)) => date.to_string(),
        None => s.to_string(),
    }
}
