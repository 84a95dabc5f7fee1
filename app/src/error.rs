//! FILENAME: app/src/error.rs
// PURPOSE: Errors surfaced to the host by session actions and exports.

use persistence::PersistenceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Upload decoded to zero data rows.
    #[error("The file appears to be empty.")]
    EmptyData,

    #[error("Could not read this file. Please try a different .xlsx, .xls, or .csv file. ({0})")]
    Persistence(#[from] PersistenceError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures of the external renderer or clipboard. These never reach the
/// session state; the export boundary turns them into status messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("Render failed: {0}")]
    Render(String),

    #[error("Clipboard write failed: {0}")]
    Clipboard(String),
}
