//! FILENAME: app/src/lib.rs
//! Chartwork application core.
//!
//! Ties ingestion, pivoting and chart building into a session: an
//! `AppState` snapshot is advanced by user actions, and the `pipeline`
//! functions derive the preview table and chart spec from it. Export and
//! clipboard go through host-provided traits.

pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod pipeline;
pub mod state;

pub use config::AppConfig;
pub use error::{AppError, ExportError};
pub use export::{
    copy_to_clipboard, download, resolve_dimensions, Clipboard, Dimensions, ExportFormat,
    ExportOutcome, ExportPlan, ExportSettings, ExportedFile, ImageRenderer, PRESETS,
};
pub use pipeline::{aggregate, export_plan, filtered_rows, preview, render_json, render_spec};
pub use state::AppState;

// Re-exported so hosts only need this crate.
pub use chart_engine::{ChartSpec, ChartType, GanttRoles, LegendPosition, StyleConfig};
pub use engine::{CellValue, Column, ColumnType, Dataset};
pub use pivot_engine::{AggregationType, PivotPreview, PivotRole};
