//! FILENAME: tests/test_pipeline.rs
//! End-to-end tests: session actions through aggregation to chart specs.

mod common;

use app_lib::{
    aggregate, filtered_rows, preview, render_json, render_spec, AggregationType, ChartType,
    PivotRole,
};
use chart_engine::radial::funnel_slices;
use common::{RegionFixture, SalesFixture, TestHarness};
use pivot_engine::{ColumnKey, GroupAxes, GroupKey};

fn region_harness() -> TestHarness {
    TestHarness::with_dataset(RegionFixture::dataset())
}

fn split(part: &str) -> ColumnKey {
    ColumnKey::Split(GroupKey::new([part]))
}

// ============================================================================
// AGGREGATION SCENARIOS
// ============================================================================

#[test]
fn test_region_revenue_sum_in_first_seen_order() {
    let mut harness = region_harness();
    harness
        .add(PivotRole::Rows, "Region")
        .add(PivotRole::Values, "Revenue");

    let rows = filtered_rows(&harness.state);
    let groups = aggregate(&harness.state, &rows).unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].row_key, GroupKey::new(["N"]));
    assert_eq!(groups[0].value(0), 300.0);
    assert_eq!(groups[1].row_key, GroupKey::new(["S"]));
    assert_eq!(groups[1].value(0), 50.0);
    assert!(groups.iter().all(|g| g.col_key == ColumnKey::All));
}

#[test]
fn test_region_revenue_with_product_split() {
    let mut harness = region_harness();
    harness
        .add(PivotRole::Rows, "Region")
        .add(PivotRole::Columns, "Product")
        .add(PivotRole::Values, "Revenue");

    let rows = filtered_rows(&harness.state);
    let groups = aggregate(&harness.state, &rows).unwrap();
    let axes = GroupAxes::new(&groups, &harness.state.pivot);

    assert!(axes.split_active());
    assert_eq!(axes.split_keys(), &[split("A"), split("B")]);
    let north = GroupKey::new(["N"]);
    let south = GroupKey::new(["S"]);
    assert_eq!(axes.value(&north, &split("A"), 0), 100.0);
    assert_eq!(axes.value(&north, &split("B"), 0), 200.0);
    assert!(axes.get(&south, &split("B")).is_none());

    let spec = render_spec(&harness.state.set_chart_type(ChartType::StackedBar));
    assert_eq!(spec.series.len(), 2);
    assert_eq!(spec.series[0].values(), vec![100.0, 50.0]);
    assert_eq!(spec.series[1].values(), vec![200.0, 0.0]);
}

#[test]
fn test_missing_role_yields_no_groups() {
    let mut harness = region_harness();
    harness.add(PivotRole::Values, "Revenue");
    let rows = filtered_rows(&harness.state);
    assert!(aggregate(&harness.state, &rows).is_none());

    harness
        .remove(PivotRole::Values, "Revenue")
        .add(PivotRole::Rows, "Region");
    let rows = filtered_rows(&harness.state);
    assert!(aggregate(&harness.state, &rows).is_none());
}

#[test]
fn test_count_ignores_numeric_parsing() {
    let mut harness = region_harness();
    harness
        .add(PivotRole::Rows, "Region")
        .add(PivotRole::Values, "Product");
    assert_eq!(
        harness.state.pivot.values[0].aggregation(),
        AggregationType::Count
    );

    let rows = filtered_rows(&harness.state);
    let groups = aggregate(&harness.state, &rows).unwrap();
    assert_eq!(groups[0].value(0), 2.0);
    assert_eq!(groups[1].value(0), 1.0);
}

#[test]
fn test_avg_of_text_field_is_zero() {
    let mut harness = region_harness();
    harness
        .add(PivotRole::Rows, "Region")
        .add(PivotRole::Values, "Product")
        .apply(|s| s.set_aggregation("Product", AggregationType::Average));

    let rows = filtered_rows(&harness.state);
    let groups = aggregate(&harness.state, &rows).unwrap();
    assert!(groups.iter().all(|g| g.value(0) == 0.0));
}

// ============================================================================
// FILTERS
// ============================================================================

#[test]
fn test_filter_excludes_unchecked_values() {
    let mut harness = TestHarness::with_sales_data();
    harness
        .add(PivotRole::Rows, "Region")
        .add(PivotRole::Values, "Sales")
        .add(PivotRole::Filters, "Quarter")
        .uncheck("Quarter", "Q2");

    let rows = filtered_rows(&harness.state);
    assert_eq!(rows.len(), 6);

    let groups = aggregate(&harness.state, &rows).unwrap();
    let totals: Vec<f64> = groups.iter().map(|g| g.value(0)).collect();
    assert_eq!(totals, vec![18000.0, 26000.0, 16000.0]);
}

#[test]
fn test_filtering_is_idempotent() {
    let mut harness = TestHarness::with_sales_data();
    harness
        .add(PivotRole::Filters, "Region")
        .uncheck("Region", "South");

    let once = filtered_rows(&harness.state).len();
    harness.uncheck("Region", "South");
    assert_eq!(filtered_rows(&harness.state).len(), once);
    assert_eq!(once, 8);

    harness.check("Region", "South");
    assert_eq!(filtered_rows(&harness.state).len(), SalesFixture::data().len());
}

#[test]
fn test_removing_filter_restores_all_rows() {
    let mut harness = TestHarness::with_sales_data();
    harness
        .add(PivotRole::Filters, "Product")
        .uncheck("Product", "Widget")
        .remove(PivotRole::Filters, "Product");

    assert_eq!(filtered_rows(&harness.state).len(), 12);
}

// ============================================================================
// PREVIEW & CHARTS
// ============================================================================

#[test]
fn test_preview_switches_to_aggregated() {
    let mut harness = TestHarness::with_sales_data();
    let raw = preview(&harness.state).unwrap();
    assert!(!raw.is_aggregated);
    assert_eq!(raw.headers, SalesFixture::headers());

    harness
        .add(PivotRole::Rows, "Region")
        .add(PivotRole::Values, "Sales");
    let aggregated = preview(&harness.state).unwrap();
    assert!(aggregated.is_aggregated);
    assert_eq!(aggregated.rows.len(), 3);
}

#[test]
fn test_funnel_sorted_descending() {
    let mut harness = TestHarness::with_sales_data();
    harness
        .add(PivotRole::Rows, "Region")
        .add(PivotRole::Values, "Sales")
        .apply(|s| s.set_chart_type(ChartType::Funnel));

    let spec = render_spec(&harness.state);
    assert_eq!(spec.series[0].values(), vec![53000.0, 39000.0, 35500.0]);

    let rows = filtered_rows(&harness.state);
    let groups = aggregate(&harness.state, &rows).unwrap();
    let slices = funnel_slices(groups.iter().map(|g| (g.row_label(), g.value(0))).collect());
    assert_eq!(slices[0].0, "South");
    assert!(slices.windows(2).all(|w| w[0].1 >= w[1].1));
}

#[test]
fn test_under_configured_charts_degrade() {
    let mut harness = TestHarness::with_sales_data();
    harness
        .add(PivotRole::Rows, "Region")
        .add(PivotRole::Values, "Sales");

    for chart_type in [ChartType::Heatmap, ChartType::Scatter, ChartType::Bubble] {
        let spec = render_spec(&harness.state.set_chart_type(chart_type));
        assert!(spec.is_degraded(), "{} should degrade", chart_type);
        assert!(!spec.title.subtext.is_empty());
    }
}

#[test]
fn test_waterfall_running_totals() {
    let mut harness = TestHarness::with_dataset(app_lib::Dataset::from_records(vec![
        vec![("Step", app_lib::CellValue::from("Start")), ("Delta", app_lib::CellValue::from(100.0))],
        vec![("Step", app_lib::CellValue::from("Returns")), ("Delta", app_lib::CellValue::from(-30.0))],
        vec![("Step", app_lib::CellValue::from("Upsell")), ("Delta", app_lib::CellValue::from(50.0))],
    ]));
    harness
        .add(PivotRole::Rows, "Step")
        .add(PivotRole::Values, "Delta")
        .apply(|s| s.set_chart_type(ChartType::Waterfall));

    let spec = render_spec(&harness.state);
    assert_eq!(spec.series[0].values(), vec![0.0, 70.0, 70.0]);
    assert_eq!(spec.series[1].values(), vec![100.0, 0.0, 50.0]);
    assert_eq!(spec.series[2].values(), vec![0.0, 30.0, 0.0]);
}

#[test]
fn test_render_json_round_trips_series_names() {
    let mut harness = TestHarness::with_sales_data();
    harness
        .add(PivotRole::Rows, "Region")
        .add(PivotRole::Columns, "Product")
        .add(PivotRole::Values, "Sales");

    let json = render_json(&harness.state).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let names: Vec<&str> = value["series"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Gadget", "Widget"]);
}
