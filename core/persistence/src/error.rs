//! FILENAME: core/persistence/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet read error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("The file appears to be empty.")]
    EmptyFile,

    #[error("Unsupported file type: {0}")]
    UnsupportedExtension(String),
}
