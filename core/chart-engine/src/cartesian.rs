//! FILENAME: core/chart-engine/src/cartesian.rs
//! Cartesian family: bar, horizontal bar, stacked, grouped, line, area,
//! scatter, bubble and waterfall.
//!
//! All of these share a category axis (rows) and a value axis. Horizontal
//! bars swap the two. Scatter and bubble replace both with value axes.

use crate::builder::{setup_placeholder, ChartBuilder, ChartInput};
use crate::chart_type::{ChartFamily, ChartType};
use crate::derive::{points, ChartData};
use crate::format::abbreviate;
use crate::frame::Frame;
use crate::spec::{
    AreaStyle, Axis, AxisLabel, AxisLine, AxisType, ChartSpec, DataItem, Datum, Emphasis, Grid,
    ItemStyle, ItemValue, Label, LineStyle, Series, SeriesKind, SplitLine, TextStyle, Toggle,
    ValueFormat,
};

pub const SCATTER_NEEDS_TWO: &str = "Scatter/Bubble needs at least 2 value columns.";
pub const BUBBLE_NEEDS_THREE: &str = "Bubble needs at least 3 value columns.";

/// Categories beyond this count get rotated axis labels.
const ROTATE_AFTER: usize = 10;
const DECREASE_FALLBACK: &str = "#ef4444";

pub struct CartesianBuilder;

impl ChartBuilder for CartesianBuilder {
    fn family(&self) -> ChartFamily {
        ChartFamily::Cartesian
    }

    fn build(&self, chart_type: ChartType, input: &ChartInput<'_>) -> ChartSpec {
        let Some(data) = input
            .non_empty_groups()
            .and_then(|groups| ChartData::new(groups, input.pivot))
        else {
            return setup_placeholder();
        };

        let frame = Frame::new(input.style, input.pivot);
        let mut spec = frame.base_spec(chart_type);

        let horizontal = chart_type == ChartType::BarH;
        let category = category_axis(&frame, &data.categories, horizontal);
        let value = value_axis(&frame, horizontal);
        spec.grid = Some(frame.grid());
        if horizontal {
            spec.x_axis = Some(value);
            spec.y_axis = Some(category);
        } else {
            spec.x_axis = Some(category);
            spec.y_axis = Some(value);
        }

        match chart_type {
            ChartType::Waterfall => spec.series = waterfall_series(&frame, &data),
            ChartType::Scatter | ChartType::Bubble => {
                scatter(&mut spec, &frame, &data, chart_type == ChartType::Bubble)
            }
            _ => spec.series = series(chart_type, &frame, &data),
        }

        log::debug!(
            target: "CHART",
            "{} chart: {} categories, {} series",
            chart_type,
            data.categories.len(),
            spec.series.len()
        );
        spec
    }
}

// ============================================================================
// AXES
// ============================================================================

fn category_axis(frame: &Frame<'_>, categories: &[String], horizontal: bool) -> Axis {
    let rotate = if categories.len() > ROTATE_AFTER { 45 } else { 0 };
    Axis {
        axis_type: AxisType::Category,
        data: categories.to_vec(),
        name: Some(if horizontal { frame.y_label.clone() } else { frame.x_label.clone() }),
        name_location: Some("end".to_string()),
        name_gap: Some(15),
        name_text_style: Some(frame.text(-1, frame.theme.subtext)),
        axis_label: Some(AxisLabel {
            style: frame.text(-2, frame.theme.subtext),
            rotate: Some(rotate),
            overflow: Some("truncate".to_string()),
            width: Some(120),
            value_format: None,
        }),
        axis_line: Some(AxisLine {
            show: None,
            line_style: Some(LineStyle {
                color: frame.theme.grid.to_string(),
            }),
        }),
        axis_tick: Some(Toggle::off()),
        ..Axis::default()
    }
}

fn value_axis(frame: &Frame<'_>, horizontal: bool) -> Axis {
    let padding = if horizontal { [10, 0, 0, 0] } else { [0, 0, 0, 0] };
    Axis {
        axis_type: AxisType::Value,
        name: Some(if horizontal { frame.x_label.clone() } else { frame.y_label.clone() }),
        name_location: Some("end".to_string()),
        name_gap: Some(15),
        name_text_style: Some(TextStyle {
            padding: Some(padding),
            ..frame.text(-1, frame.theme.subtext)
        }),
        axis_label: Some(AxisLabel {
            style: frame.text(-2, frame.theme.subtext),
            value_format: Some(ValueFormat::Abbreviate),
            ..AxisLabel::default()
        }),
        axis_line: Some(AxisLine {
            show: Some(false),
            line_style: None,
        }),
        split_line: Some(SplitLine {
            show: Some(frame.style.show_grid),
            line_style: Some(LineStyle {
                color: frame.theme.grid.to_string(),
            }),
        }),
        ..Axis::default()
    }
}

/// Value axis for scatter/bubble, titled with a value field name.
fn scatter_axis(frame: &Frame<'_>, name: &str, location: &str, gap: u32) -> Axis {
    Axis {
        axis_type: AxisType::Value,
        name: Some(name.to_string()),
        name_location: Some(location.to_string()),
        name_gap: Some(gap),
        name_text_style: Some(frame.short_text(-1, Some(frame.theme.text))),
        axis_label: Some(AxisLabel {
            style: TextStyle {
                font_size: Some(frame.font(-2)),
                color: Some(frame.theme.text.to_string()),
                ..TextStyle::default()
            },
            value_format: Some(ValueFormat::Abbreviate),
            ..AxisLabel::default()
        }),
        split_line: Some(SplitLine {
            show: None,
            line_style: Some(LineStyle {
                color: frame.theme.grid.to_string(),
            }),
        }),
        ..Axis::default()
    }
}

// ============================================================================
// BAR / LINE / AREA
// ============================================================================

fn series(chart_type: ChartType, frame: &Frame<'_>, data: &ChartData<'_>) -> Vec<Series> {
    let kind = match chart_type {
        ChartType::Line | ChartType::Area => SeriesKind::Line,
        _ => SeriesKind::Bar,
    };
    let show_labels = frame.style.show_data_labels;

    data.series
        .iter()
        .map(|def| Series {
            name: Some(def.name.clone()),
            data: points(&data.series_values(def), show_labels, abbreviate),
            label: Some(Label {
                show: Some(show_labels),
                style: frame.text(-3, frame.theme.text),
                ..Label::default()
            }),
            area_style: (chart_type == ChartType::Area).then(|| AreaStyle { opacity: 0.3 }),
            stack: (chart_type == ChartType::StackedBar).then(|| "total".to_string()),
            bar_gap: (chart_type == ChartType::GroupedBar).then(|| "10%".to_string()),
            ..Series::new(kind)
        })
        .collect()
}

// ============================================================================
// SCATTER / BUBBLE
// ============================================================================

fn scatter(spec: &mut ChartSpec, frame: &Frame<'_>, data: &ChartData<'_>, bubble: bool) {
    let fields = data.value_count();
    if fields < 2 {
        spec.title.subtext = SCATTER_NEEDS_TWO.to_string();
        return;
    }
    if bubble && fields < 3 {
        spec.title.subtext = BUBBLE_NEEDS_THREE.to_string();
        return;
    }

    let x_name = &data.pivot.values[0].name;
    let y_name = &data.pivot.values[1].name;
    spec.x_axis = Some(scatter_axis(frame, x_name, "middle", 30));
    spec.y_axis = Some(scatter_axis(frame, y_name, "end", 15));
    spec.grid = Some(Grid {
        top: 80,
        right: 50,
        bottom: 60,
        left: 30,
        contain_label: Some(true),
    });

    let keys = if data.split_active() {
        data.axes.split_keys().to_vec()
    } else {
        vec![data.axes.base_key()]
    };
    let show_labels = frame.style.show_data_labels;

    spec.series = keys
        .iter()
        .map(|key| {
            let markers: Vec<Datum> = data
                .axes
                .categories()
                .iter()
                .map(|category| {
                    let group = data.axes.get(&category.key, key);
                    let x = group.map_or(0.0, |g| g.value(0));
                    let y = group.map_or(0.0, |g| g.value(1));
                    let mut item = if bubble {
                        let size = group.map_or(0.0, |g| g.value(2));
                        DataItem {
                            symbol_size: Some(bubble_size(size)),
                            ..DataItem::new(ItemValue::Vector(vec![x, y, size]))
                        }
                    } else {
                        DataItem::new(ItemValue::Vector(vec![x, y]))
                    };
                    if show_labels {
                        item.label = Some(Label::text(abbreviate(y)));
                        Datum::Item(item)
                    } else if item.symbol_size.is_some() {
                        Datum::Item(item)
                    } else {
                        Datum::Point(vec![x, y])
                    }
                })
                .collect();

            Series {
                name: data.split_active().then(|| key.label()),
                data: markers,
                symbol_size: (!bubble).then_some(10.0),
                label: Some(Label {
                    show: Some(show_labels),
                    style: TextStyle {
                        font_size: Some(frame.font(-3)),
                        ..TextStyle::default()
                    },
                    ..Label::default()
                }),
                ..Series::new(SeriesKind::Scatter)
            }
        })
        .collect();
}

/// Marker size for a bubble value: sqrt(v) / 3 + 5.
pub fn bubble_size(value: f64) -> f64 {
    value.max(0.0).sqrt() / 3.0 + 5.0
}

// ============================================================================
// WATERFALL
// ============================================================================

/// Stacked-bar decomposition of a running total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaterfallSteps {
    /// Invisible offset under each visible bar.
    pub base: Vec<f64>,
    pub increase: Vec<f64>,
    pub decrease: Vec<f64>,
    /// Running total after each step.
    pub totals: Vec<f64>,
}

pub fn waterfall_steps(values: &[f64]) -> WaterfallSteps {
    let mut steps = WaterfallSteps::default();
    let mut cumulative = 0.0;

    for &v in values {
        if v >= 0.0 {
            steps.base.push(cumulative);
            steps.increase.push(v);
            steps.decrease.push(0.0);
        } else {
            steps.base.push(cumulative + v);
            steps.increase.push(0.0);
            steps.decrease.push(-v);
        }
        cumulative += v;
        steps.totals.push(cumulative);
    }
    steps
}

fn waterfall_series(frame: &Frame<'_>, data: &ChartData<'_>) -> Vec<Series> {
    // Category totals: a column split is folded into one step per category
    let steps = waterfall_steps(&data.category_totals(0));
    let show_labels = frame.style.show_data_labels;
    let decrease_color = frame
        .colors
        .get(4)
        .cloned()
        .unwrap_or_else(|| DECREASE_FALLBACK.to_string());

    let transparent = ItemStyle::color("transparent");
    let label = |position: &str| Label {
        show: Some(show_labels),
        position: Some(position.to_string()),
        style: frame.text(-3, frame.theme.text),
        ..Label::default()
    };

    vec![
        Series {
            data: steps.base.iter().map(|&v| Datum::Value(v)).collect(),
            stack: Some("wf".to_string()),
            item_style: Some(transparent.clone()),
            emphasis: Some(Emphasis {
                item_style: transparent,
            }),
            ..Series::new(SeriesKind::Bar)
        },
        Series {
            name: Some("Increase".to_string()),
            data: points(&steps.increase, show_labels, |v| {
                if v != 0.0 { abbreviate(v) } else { String::new() }
            }),
            stack: Some("wf".to_string()),
            item_style: Some(ItemStyle::color(frame.color(0))),
            label: Some(label("top")),
            ..Series::new(SeriesKind::Bar)
        },
        Series {
            name: Some("Decrease".to_string()),
            data: points(&steps.decrease, show_labels, |v| {
                if v != 0.0 { format!("-{}", abbreviate(v)) } else { String::new() }
            }),
            stack: Some("wf".to_string()),
            item_style: Some(ItemStyle::color(decrease_color)),
            label: Some(label("bottom")),
            ..Series::new(SeriesKind::Bar)
        },
    ]
}
