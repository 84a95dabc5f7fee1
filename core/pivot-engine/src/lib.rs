//! FILENAME: core/pivot-engine/src/lib.rs
//! Pivot subsystem for the chart pipeline.
//!
//! This crate turns an imported dataset plus the user's pivot configuration
//! into aggregated groups. It depends on `engine` only for shared types
//! (CellValue, Dataset, Column).
//!
//! Layers:
//! - `definition`: Serializable configuration (what the pivot IS)
//! - `filter`: Per-column inclusion sets applied before aggregation
//! - `cache`: Accumulator state for one group (HOW we reduce)
//! - `engine`: Grouping and aggregation (HOW we calculate)
//! - `axes`: Category / split derivation shared by preview and charts
//! - `view`: Preview table for the frontend (WHAT we display)

pub mod definition;
pub mod filter;
pub mod cache;
pub mod engine;
pub mod axes;
pub mod view;

pub use definition::*;
pub use filter::{distinct_values, filter_rows, FilterSelection};
pub use cache::AggregateAccumulator;
pub use engine::{aggregate, AggregatedGroup, ColumnKey, GroupKey, KeyParts};
pub use axes::{Category, GroupAxes};
pub use view::{build_preview, PivotPreview, PREVIEW_ROW_LIMIT};
