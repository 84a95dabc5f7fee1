//! FILENAME: core/chart-engine/src/builder.rs
//! The builder seam: what a chart family receives and what it must produce.

use engine::{Dataset, Row};
use pivot_engine::{AggregatedGroup, PivotConfig};
use crate::chart_type::{ChartFamily, ChartType};
use crate::spec::ChartSpec;
use crate::style::StyleConfig;
use crate::temporal::GanttRoles;

/// Everything a chart build can read.
///
/// Aggregated families read `groups`; the Gantt chart reads the filtered
/// raw rows and the column roles instead.
#[derive(Debug, Clone, Copy)]
pub struct ChartInput<'a> {
    pub groups: Option<&'a [AggregatedGroup]>,
    pub pivot: &'a PivotConfig,
    pub style: &'a StyleConfig,
    pub dataset: Option<&'a Dataset>,
    pub rows: &'a [&'a Row],
    pub gantt: Option<&'a GanttRoles>,
}

impl<'a> ChartInput<'a> {
    pub fn new(pivot: &'a PivotConfig, style: &'a StyleConfig) -> Self {
        ChartInput {
            groups: None,
            pivot,
            style,
            dataset: None,
            rows: &[],
            gantt: None,
        }
    }

    pub fn with_groups(mut self, groups: Option<&'a [AggregatedGroup]>) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_rows(mut self, dataset: &'a Dataset, rows: &'a [&'a Row]) -> Self {
        self.dataset = Some(dataset);
        self.rows = rows;
        self
    }

    pub fn with_gantt(mut self, roles: &'a GanttRoles) -> Self {
        self.gantt = Some(roles);
        self
    }

    /// Aggregated groups, if there is at least one.
    pub fn non_empty_groups(&self) -> Option<&'a [AggregatedGroup]> {
        self.groups.filter(|g| !g.is_empty())
    }
}

/// Implemented once per chart family.
pub trait ChartBuilder {
    fn family(&self) -> ChartFamily;

    /// Builds the spec for one chart type of this family. Under-configured
    /// input yields a degraded spec carrying a message, never an error.
    fn build(&self, chart_type: ChartType, input: &ChartInput<'_>) -> ChartSpec;
}

/// Shown when there are no aggregated groups to plot.
pub const SETUP_MESSAGE: &str = "Set up your data in Step 2";

pub fn setup_placeholder() -> ChartSpec {
    ChartSpec::placeholder(SETUP_MESSAGE, 18)
}
