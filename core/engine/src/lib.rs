//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the shared data model.
//! CONTEXT: Re-exports public types and modules for use by the pivot and
//! chart crates. Everything here is pure and allocation-light; a dataset is
//! loaded once per session and never mutated afterwards.

pub mod cell;
pub mod column;
pub mod dataset;
pub mod datetime;
pub mod number_format;

// Re-export commonly used types at the crate root
pub use cell::{parse_number_prefix, parse_strict_number, CellValue};
pub use column::{detect_columns, Column, ColumnType, SAMPLE_LIMIT};
pub use dataset::{Dataset, FieldIndex, Row};
pub use datetime::{parse_cell_date, parse_date, timestamp_millis};
pub use number_format::{add_thousands_separator, format_number};
