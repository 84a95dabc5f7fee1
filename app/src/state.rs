//! FILENAME: app/src/state.rs
// PURPOSE: The session as an immutable snapshot.
// CONTEXT: Every user action takes `&self` and returns the next snapshot.
// The dataset and its inferred columns sit behind `Arc`, so a new snapshot
// shares them instead of copying rows.

use std::path::Path;
use std::sync::Arc;

use chart_engine::{ChartType, GanttRoles, StyleConfig};
use engine::{detect_columns, Column, Dataset};
use persistence::PersistenceError;
use pivot_engine::{distinct_values, AggregationType, FilterSelection, PivotConfig, PivotRole};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::export::ExportSettings;
use crate::logging::{log_debug, log_info};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// The imported table; `None` until something is loaded.
    pub dataset: Option<Arc<Dataset>>,
    /// Inferred once per load, in header order.
    pub columns: Arc<Vec<Column>>,
    pub pivot: PivotConfig,
    pub selection: FilterSelection,
    pub chart_type: ChartType,
    pub style: StyleConfig,
    pub gantt: GanttRoles,
    pub export: ExportSettings,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh session seeded from a startup config.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new().with_config(config)
    }

    pub fn has_data(&self) -> bool {
        self.dataset.is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    // ========================================================================
    // DATA
    // ========================================================================

    /// Replaces the dataset. Pivot and filter selections start over; chart
    /// and export settings carry across. Gantt roles pointing at columns the
    /// new data lacks are cleared.
    pub fn load_dataset(&self, dataset: Dataset) -> Result<AppState, AppError> {
        if dataset.is_empty() {
            return Err(AppError::EmptyData);
        }

        let columns = detect_columns(&dataset);
        log_info!(
            "SESSION",
            "loaded dataset: {} rows, {} columns",
            dataset.len(),
            columns.len()
        );

        let mut gantt = self.gantt.clone();
        for role in [
            &mut gantt.task,
            &mut gantt.start,
            &mut gantt.end,
            &mut gantt.category,
            &mut gantt.progress,
        ] {
            if role.as_deref().is_some_and(|name| dataset.column_index(name).is_none()) {
                *role = None;
            }
        }

        Ok(AppState {
            dataset: Some(Arc::new(dataset)),
            columns: Arc::new(columns),
            pivot: PivotConfig::new(),
            selection: FilterSelection::new(),
            gantt,
            ..self.clone()
        })
    }

    /// Reads a CSV or spreadsheet file and loads it.
    pub fn load_file(&self, path: &Path) -> Result<AppState, AppError> {
        let dataset = persistence::load_file(path).map_err(|e| match e {
            PersistenceError::EmptyFile => AppError::EmptyData,
            other => AppError::Persistence(other),
        })?;
        self.load_dataset(dataset)
    }

    /// Loads the generated sample sales data.
    pub fn load_demo(&self, seed: u64) -> Result<AppState, AppError> {
        self.load_dataset(persistence::demo_dataset(seed))
    }

    /// Back to the upload step. Style, chart type and export settings are
    /// kept.
    pub fn reset(&self) -> AppState {
        log_info!("SESSION", "reset");
        AppState {
            chart_type: self.chart_type,
            style: self.style.clone(),
            export: self.export.clone(),
            ..AppState::default()
        }
    }

    // ========================================================================
    // PIVOT
    // ========================================================================

    /// Drops a column into an area. Unknown columns and repeats leave the
    /// state unchanged. A new filter field starts with every value selected.
    pub fn add_field(&self, role: PivotRole, name: &str) -> AppState {
        let mut next = self.clone();
        if !next.pivot.add_field_by_name(role, name, &self.columns) {
            return next;
        }
        log_debug!("PIVOT", "add {:?} field '{}'", role, name);

        if role == PivotRole::Filters {
            if let Some(dataset) = &self.dataset {
                next.selection.ensure(name, distinct_values(dataset, name));
            }
        }
        next
    }

    /// Removes a column from an area; removing a filter also drops its
    /// selection.
    pub fn remove_field(&self, role: PivotRole, name: &str) -> AppState {
        let mut next = self.clone();
        if next.pivot.remove_field(role, name) {
            log_debug!("PIVOT", "remove {:?} field '{}'", role, name);
            if role == PivotRole::Filters {
                next.selection.remove(name);
            }
        }
        next
    }

    pub fn set_aggregation(&self, name: &str, aggregation: AggregationType) -> AppState {
        let mut next = self.clone();
        if next.pivot.set_aggregation(name, aggregation) {
            log_debug!("PIVOT", "aggregation of '{}' -> {}", name, aggregation.as_str());
        }
        next
    }

    /// Checks or unchecks one value of a filter field. Columns that are not
    /// in the Filter area are ignored.
    pub fn toggle_filter_value(&self, column: &str, value: &str, checked: bool) -> AppState {
        let mut next = self.clone();
        let Some(dataset) = &self.dataset else {
            return next;
        };
        if !self.pivot.contains(PivotRole::Filters, column) {
            return next;
        }
        next.selection
            .toggle(column, value, checked, distinct_values(dataset, column));
        next
    }

    /// Replaces a filter field's selection outright (select all / none).
    pub fn set_filter_values<I>(&self, column: &str, values: I) -> AppState
    where
        I: IntoIterator<Item = String>,
    {
        let mut next = self.clone();
        if self.pivot.contains(PivotRole::Filters, column) {
            next.selection.set(column, values);
        }
        next
    }

    // ========================================================================
    // CHART & EXPORT SETTINGS
    // ========================================================================

    pub fn set_chart_type(&self, chart_type: ChartType) -> AppState {
        log_debug!("CHART", "chart type -> {}", chart_type.id());
        AppState {
            chart_type,
            ..self.clone()
        }
    }

    pub fn set_style(&self, style: StyleConfig) -> AppState {
        AppState {
            style,
            ..self.clone()
        }
    }

    pub fn set_gantt_roles(&self, gantt: GanttRoles) -> AppState {
        AppState {
            gantt,
            ..self.clone()
        }
    }

    pub fn set_export(&self, export: ExportSettings) -> AppState {
        AppState {
            export,
            ..self.clone()
        }
    }

    /// Applies the chart, style, Gantt and export settings of a config.
    pub fn with_config(&self, config: &AppConfig) -> AppState {
        AppState {
            chart_type: config.chart_type,
            style: config.style.clone(),
            gantt: config.gantt.clone(),
            export: config.export.clone(),
            ..self.clone()
        }
    }
}
