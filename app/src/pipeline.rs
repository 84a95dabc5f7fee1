//! FILENAME: app/src/pipeline.rs
// PURPOSE: The derived views of a session snapshot.
// CONTEXT: filter -> aggregate -> preview / chart spec. Nothing here is
// cached; each call recomputes from the snapshot it is given.

use chart_engine::{build_chart, setup_placeholder, ChartInput, ChartSpec, ChartType};
use engine::Row;
use pivot_engine::{build_preview, AggregatedGroup, PivotPreview};

use crate::error::AppError;
use crate::export::ExportPlan;
use crate::logging::{log_debug, log_enter, log_exit};
use crate::state::AppState;

/// Rows surviving the active filters, in dataset order. Empty without data.
pub fn filtered_rows(state: &AppState) -> Vec<&Row> {
    match &state.dataset {
        Some(dataset) => pivot_engine::filter_rows(dataset, &state.pivot, &state.selection),
        None => Vec::new(),
    }
}

/// Aggregated groups for the given rows, or `None` while the pivot lacks a
/// row or value field.
pub fn aggregate(state: &AppState, rows: &[&Row]) -> Option<Vec<AggregatedGroup>> {
    let dataset = state.dataset.as_deref()?;
    let groups = pivot_engine::aggregate(dataset, rows, &state.pivot)?;
    log_debug!("PIVOT", "{} groups from {} rows", groups.len(), rows.len());
    Some(groups)
}

/// Preview table: aggregated when the pivot is configured, raw otherwise.
pub fn preview(state: &AppState) -> Option<PivotPreview> {
    let dataset = state.dataset.as_deref()?;
    let rows = filtered_rows(state);
    let groups = aggregate(state, &rows);
    Some(build_preview(dataset, &rows, &state.pivot, groups.as_deref()))
}

/// The chart spec for the current chart type.
pub fn render_spec(state: &AppState) -> ChartSpec {
    render_spec_as(state, state.chart_type)
}

/// The chart spec for an explicit chart type, leaving the session's choice
/// alone (used for chart-picker thumbnails).
pub fn render_spec_as(state: &AppState, chart_type: ChartType) -> ChartSpec {
    let Some(dataset) = state.dataset.as_deref() else {
        return setup_placeholder();
    };
    log_enter!("CHART", "render_spec", "type={}", chart_type.id());

    let rows = filtered_rows(state);
    let groups = aggregate(state, &rows);
    let input = ChartInput::new(&state.pivot, &state.style)
        .with_groups(groups.as_deref())
        .with_rows(dataset, &rows)
        .with_gantt(&state.gantt);

    let spec = build_chart(chart_type, &input);
    log_exit!("CHART", "render_spec", "series={}", spec.series.len());
    spec
}

/// The chart spec as JSON for the external renderer.
pub fn render_json(state: &AppState) -> Result<String, AppError> {
    Ok(render_spec(state).to_json()?)
}

/// Export plan for the session's settings and background.
pub fn export_plan(state: &AppState) -> ExportPlan {
    ExportPlan::new(&state.export, &state.style.background)
}
