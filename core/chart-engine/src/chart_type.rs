//! FILENAME: core/chart-engine/src/chart_type.rs
//! Chart type catalogue.
//!
//! Every chart type belongs to exactly one family; the family decides which
//! builder turns aggregated groups into a chart spec.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// The sixteen supported chart types. Serialized with their short ids
/// ("bar", "bar_h", "stacked_bar", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    #[default]
    Bar,
    BarH,
    StackedBar,
    GroupedBar,
    Line,
    Area,
    Pie,
    Donut,
    Scatter,
    Radar,
    Treemap,
    Funnel,
    Heatmap,
    Bubble,
    Waterfall,
    Gantt,
}

/// Builder families. Types in one family share axes and derivations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartFamily {
    /// Category/value axes: bars, lines, areas, scatter, bubble, waterfall.
    Cartesian,
    /// No cartesian axes: pie, donut, treemap, funnel, radar.
    Radial,
    /// Category x category grid: heatmap.
    Matrix,
    /// Time axis fed from raw rows: gantt.
    Temporal,
}

impl ChartType {
    /// Catalogue order, as offered in the chart picker.
    pub const ALL: [ChartType; 16] = [
        ChartType::Bar,
        ChartType::BarH,
        ChartType::StackedBar,
        ChartType::GroupedBar,
        ChartType::Line,
        ChartType::Area,
        ChartType::Pie,
        ChartType::Donut,
        ChartType::Scatter,
        ChartType::Radar,
        ChartType::Treemap,
        ChartType::Funnel,
        ChartType::Heatmap,
        ChartType::Bubble,
        ChartType::Waterfall,
        ChartType::Gantt,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::BarH => "bar_h",
            ChartType::StackedBar => "stacked_bar",
            ChartType::GroupedBar => "grouped_bar",
            ChartType::Line => "line",
            ChartType::Area => "area",
            ChartType::Pie => "pie",
            ChartType::Donut => "donut",
            ChartType::Scatter => "scatter",
            ChartType::Radar => "radar",
            ChartType::Treemap => "treemap",
            ChartType::Funnel => "funnel",
            ChartType::Heatmap => "heatmap",
            ChartType::Bubble => "bubble",
            ChartType::Waterfall => "waterfall",
            ChartType::Gantt => "gantt",
        }
    }

    /// Button label in the chart picker.
    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Bar => "Bar",
            ChartType::BarH => "H-Bar",
            ChartType::StackedBar => "Stacked",
            ChartType::GroupedBar => "Grouped",
            ChartType::Line => "Line",
            ChartType::Area => "Area",
            ChartType::Pie => "Pie",
            ChartType::Donut => "Donut",
            ChartType::Scatter => "Scatter",
            ChartType::Radar => "Radar",
            ChartType::Treemap => "Treemap",
            ChartType::Funnel => "Funnel",
            ChartType::Heatmap => "Heatmap",
            ChartType::Bubble => "Bubble",
            ChartType::Waterfall => "Waterfall",
            ChartType::Gantt => "Gantt",
        }
    }

    pub fn family(&self) -> ChartFamily {
        match self {
            ChartType::Pie
            | ChartType::Donut
            | ChartType::Treemap
            | ChartType::Funnel
            | ChartType::Radar => ChartFamily::Radial,
            ChartType::Heatmap => ChartFamily::Matrix,
            ChartType::Gantt => ChartFamily::Temporal,
            _ => ChartFamily::Cartesian,
        }
    }

    /// Charts whose tooltip is per item rather than per axis.
    pub fn is_pie_like(&self) -> bool {
        matches!(
            self,
            ChartType::Pie | ChartType::Donut | ChartType::Treemap | ChartType::Funnel
        )
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartType::ALL
            .iter()
            .copied()
            .find(|t| t.id() == s)
            .ok_or_else(|| format!("unknown chart type '{}'", s))
    }
}
