//! FILENAME: core/chart-engine/src/lib.rs
//! Chart subsystem: turns aggregated groups and a style configuration into
//! a declarative chart spec for the renderer.
//!
//! This crate depends on `pivot-engine` for aggregated groups and the
//! category / split derivation, and on `engine` for the dataset types the
//! Gantt chart reads directly.
//!
//! Layers:
//! - `chart_type`: The chart catalogue and its families
//! - `style`: Serializable style configuration, palettes and themes
//! - `spec`: The chart spec handed to the renderer (WHAT we draw)
//! - `frame` / `derive`: Pieces shared by every family
//! - `cartesian`, `radial`, `matrix`, `temporal`: One builder per family
//!   (HOW each chart is laid out)

pub mod builder;
pub mod chart_type;
pub mod style;
pub mod spec;
pub mod format;
pub mod frame;
pub mod derive;
pub mod cartesian;
pub mod radial;
pub mod matrix;
pub mod temporal;

pub use builder::{setup_placeholder, ChartBuilder, ChartInput, SETUP_MESSAGE};
pub use chart_type::{ChartFamily, ChartType};
pub use style::{LegendPosition, Palette, StyleConfig, Theme, PALETTES};
pub use spec::ChartSpec;
pub use format::abbreviate;
pub use temporal::GanttRoles;

use cartesian::CartesianBuilder;
use matrix::MatrixBuilder;
use radial::RadialBuilder;
use temporal::TemporalBuilder;

/// The builder responsible for a chart family.
pub fn builder_for(family: ChartFamily) -> &'static dyn ChartBuilder {
    match family {
        ChartFamily::Cartesian => &CartesianBuilder,
        ChartFamily::Radial => &RadialBuilder,
        ChartFamily::Matrix => &MatrixBuilder,
        ChartFamily::Temporal => &TemporalBuilder,
    }
}

/// Builds the chart spec for a chart type.
///
/// Aggregated families fall back to the setup placeholder when there are no
/// groups; the Gantt chart reads raw rows and reports its own messages.
pub fn build_chart(chart_type: ChartType, input: &ChartInput<'_>) -> ChartSpec {
    let family = chart_type.family();
    if family != ChartFamily::Temporal && input.non_empty_groups().is_none() {
        log::debug!(target: "CHART", "{}: no groups, showing setup message", chart_type);
        return setup_placeholder();
    }
    builder_for(family).build(chart_type, input)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{build, sales_groups, sales_pivot};
    use pivot_engine::{AggregationType, PivotConfig};

    #[test]
    fn test_no_groups_shows_setup_message() {
        let pivot = PivotConfig::new();
        let style = StyleConfig::default();
        for chart_type in ChartType::ALL {
            if chart_type == ChartType::Gantt {
                continue;
            }
            let spec = build_chart(chart_type, &ChartInput::new(&pivot, &style));
            assert!(spec.is_degraded(), "{} should degrade", chart_type);
            assert_eq!(spec.title.text, SETUP_MESSAGE);
        }
    }

    #[test]
    fn test_gantt_does_not_need_groups() {
        let pivot = PivotConfig::new();
        let style = StyleConfig::default();
        let spec = build_chart(ChartType::Gantt, &ChartInput::new(&pivot, &style));
        assert_eq!(spec.title.text, temporal::SELECT_COLUMNS);
    }

    #[test]
    fn test_every_type_builds_from_sales() {
        let pivot = sales_pivot(
            &["Region"],
            &["Product"],
            &[
                ("Revenue", AggregationType::Sum),
                ("Units", AggregationType::Sum),
                ("Product", AggregationType::Count),
            ],
        );
        let groups = sales_groups(&pivot);
        let style = StyleConfig::default();

        for chart_type in ChartType::ALL {
            if chart_type == ChartType::Gantt {
                continue;
            }
            let spec = build(chart_type, &pivot, &groups, &style);
            assert!(!spec.is_degraded(), "{} produced no series", chart_type);
            let json = spec.to_json().unwrap();
            assert!(json.contains("\"series\""));
        }
    }

    #[test]
    fn test_builder_for_matches_family() {
        for chart_type in ChartType::ALL {
            let family = chart_type.family();
            assert_eq!(builder_for(family).family(), family);
        }
    }
}
