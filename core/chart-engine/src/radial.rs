//! FILENAME: core/chart-engine/src/radial.rs
//! Radial family: pie, donut, treemap, funnel and radar.
//!
//! Pie-like charts plot one slice per category valued by the first value
//! field and ignore any column split. Radar draws one polygon per split key.

use crate::builder::{setup_placeholder, ChartBuilder, ChartInput};
use crate::chart_type::{ChartFamily, ChartType};
use crate::derive::ChartData;
use crate::frame::Frame;
use crate::spec::{
    ChartSpec, DataItem, Datum, Emphasis, ItemStyle, ItemValue, Label, LineStyle, Pos, Radar,
    RadarIndicator, Series, SeriesKind, SplitLine, TextStyle, Toggle,
};

/// Headroom above the largest value on every radar spoke.
const RADAR_HEADROOM: f64 = 1.2;

pub struct RadialBuilder;

impl ChartBuilder for RadialBuilder {
    fn family(&self) -> ChartFamily {
        ChartFamily::Radial
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

        match chart_type {
            ChartType::Donut => spec.series = vec![pie(&frame, &data, true)],
            ChartType::Treemap => spec.series = vec![treemap(&frame, &data)],
            ChartType::Funnel => spec.series = vec![funnel(&frame, &data)],
            ChartType::Radar => radar(&mut spec, &frame, &data),
            _ => spec.series = vec![pie(&frame, &data, false)],
        }

        log::debug!(
            target: "CHART",
            "{} chart: {} categories",
            chart_type,
            data.categories.len()
        );
        spec
    }
}

fn slices(data: &ChartData<'_>) -> Vec<(String, f64)> {
    data.category_values(0)
}

fn named(slices: Vec<(String, f64)>) -> Vec<Datum> {
    slices
        .into_iter()
        .map(|(name, value)| Datum::Item(DataItem::named(name, ItemValue::Number(value))))
        .collect()
}

fn pie(frame: &Frame<'_>, data: &ChartData<'_>, donut: bool) -> Series {
    let inner = if donut { "40%" } else { "0%" };
    Series {
        data: named(slices(data)),
        radius: vec![inner.to_string(), "72%".to_string()],
        center: vec!["50%".to_string(), "55%".to_string()],
        label: Some(Label {
            show: Some(true),
            formatter: Some(
                if frame.style.show_data_labels { "{b}: {d}%" } else { "{b}" }.to_string(),
            ),
            style: TextStyle {
                font_weight: Some(500),
                ..frame.short_text(-2, Some(frame.theme.text))
            },
            ..Label::default()
        }),
        emphasis: Some(Emphasis {
            item_style: ItemStyle {
                shadow_blur: Some(10),
                shadow_color: Some("rgba(0,0,0,0.15)".to_string()),
                ..ItemStyle::default()
            },
        }),
        item_style: Some(ItemStyle {
            border_radius: Some(if donut { 6 } else { 4 }),
            border_color: Some(frame.background()),
            border_width: Some(2),
            ..ItemStyle::default()
        }),
        ..Series::new(SeriesKind::Pie)
    }
}

fn treemap(frame: &Frame<'_>, data: &ChartData<'_>) -> Series {
    Series {
        data: named(slices(data)),
        label: Some(Label {
            show: Some(true),
            formatter: Some("{b}\n{c}".to_string()),
            style: TextStyle {
                font_weight: Some(500),
                ..frame.short_text(-2, Some("#fff"))
            },
            ..Label::default()
        }),
        breadcrumb: Some(Toggle::off()),
        item_style: Some(ItemStyle {
            border_width: Some(2),
            border_color: Some(frame.background()),
            gap_width: Some(2),
            ..ItemStyle::default()
        }),
        ..Series::new(SeriesKind::Treemap)
    }
}

/// Slices sorted largest first (stable for ties).
pub fn funnel_slices(mut slices: Vec<(String, f64)>) -> Vec<(String, f64)> {
    slices.sort_by(|a, b| b.1.total_cmp(&a.1));
    slices
}

fn funnel(frame: &Frame<'_>, data: &ChartData<'_>) -> Series {
    Series {
        data: named(funnel_slices(slices(data))),
        left: Some("15%".into()),
        right: Some("15%".into()),
        top: Some(Pos::Px(80)),
        bottom: Some(Pos::Px(40)),
        label: Some(Label {
            show: Some(true),
            formatter: Some(
                if frame.style.show_data_labels { "{b}: {c}" } else { "{b}" }.to_string(),
            ),
            style: TextStyle {
                font_weight: Some(500),
                ..frame.short_text(-1, Some(frame.theme.text))
            },
            ..Label::default()
        }),
        item_style: Some(ItemStyle {
            border_width: Some(1),
            border_color: Some(frame.background()),
            ..ItemStyle::default()
        }),
        ..Series::new(SeriesKind::Funnel)
    }
}

fn radar(spec: &mut ChartSpec, frame: &Frame<'_>, data: &ChartData<'_>) {
    let max = data.axes.max_value(0) * RADAR_HEADROOM;
    spec.radar = Some(Radar {
        indicator: data
            .categories
            .iter()
            .map(|name| RadarIndicator {
                name: name.clone(),
                max,
            })
            .collect(),
        shape: "polygon".to_string(),
        axis_name: frame.short_text(-3, Some(frame.theme.text)),
        split_line: SplitLine {
            show: None,
            line_style: Some(LineStyle {
                color: frame.theme.grid.to_string(),
            }),
        },
        split_area: Toggle::off(),
    });

    let polygons: Vec<Datum> = if data.split_active() {
        data.axes
            .split_keys()
            .iter()
            .map(|key| {
                Datum::Item(DataItem::named(
                    key.label(),
                    ItemValue::Vector(data.axes.series_values(key, 0)),
                ))
            })
            .collect()
    } else {
        vec![Datum::Item(DataItem::named(
            data.first_field_name(),
            ItemValue::Vector(data.axes.series_values(&data.axes.base_key(), 0)),
        ))]
    };

    spec.series = vec![Series {
        data: polygons,
        label: Some(Label {
            show: Some(frame.style.show_data_labels),
            style: TextStyle {
                font_size: Some(frame.font(-3)),
                ..TextStyle::default()
            },
            ..Label::default()
        }),
        ..Series::new(SeriesKind::Radar)
    }];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleConfig;
    use crate::test_support::{build, sales_groups, sales_pivot};
    use pivot_engine::AggregationType::Sum;

    fn names_and_values(series: &Series) -> Vec<(String, f64)> {
        series
            .data
            .iter()
            .map(|d| (d.name().unwrap_or_default().to_string(), d.number().unwrap_or(f64::NAN)))
            .collect()
    }

    #[test]
    fn test_pie_one_slice_per_category() {
        let pivot = sales_pivot(&["Region"], &[], &[("Revenue", Sum)]);
        let groups = sales_groups(&pivot);
        let spec = build(ChartType::Pie, &pivot, &groups, &StyleConfig::default());

        assert_eq!(spec.series.len(), 1);
        assert_eq!(spec.series[0].radius, vec!["0%", "72%"]);
        assert_eq!(
            names_and_values(&spec.series[0]),
            vec![
                ("North".to_string(), 300.0),
                ("South".to_string(), 50.0),
                ("East".to_string(), 80.0)
            ]
        );
        assert_eq!(spec.tooltip.unwrap().trigger.as_deref(), Some("item"));
        assert!(spec.x_axis.is_none());
    }

    #[test]
    fn test_donut_radius_and_label_template() {
        let pivot = sales_pivot(&["Region"], &[], &[("Revenue", Sum)]);
        let groups = sales_groups(&pivot);
        let style = StyleConfig {
            show_data_labels: true,
            ..StyleConfig::default()
        };
        let spec = build(ChartType::Donut, &pivot, &groups, &style);

        assert_eq!(spec.series[0].radius, vec!["40%", "72%"]);
        let label = spec.series[0].label.as_ref().unwrap();
        assert_eq!(label.formatter.as_deref(), Some("{b}: {d}%"));
    }

    #[test]
    fn test_pie_ignores_split() {
        let pivot = sales_pivot(&["Region"], &["Product"], &[("Revenue", Sum)]);
        let groups = sales_groups(&pivot);
        let spec = build(ChartType::Pie, &pivot, &groups, &StyleConfig::default());
        assert_eq!(spec.series[0].data.len(), 3);
    }

    #[test]
    fn test_funnel_sorted_descending() {
        let pivot = sales_pivot(&["Region"], &[], &[("Revenue", Sum)]);
        let groups = sales_groups(&pivot);
        let spec = build(ChartType::Funnel, &pivot, &groups, &StyleConfig::default());

        let values = spec.series[0].values();
        assert_eq!(values, vec![300.0, 80.0, 50.0]);
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_funnel_ties_keep_order() {
        let sorted = funnel_slices(vec![
            ("a".to_string(), 1.0),
            ("b".to_string(), 5.0),
            ("c".to_string(), 1.0),
        ]);
        let names: Vec<&str> = sorted.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_treemap_hides_breadcrumb() {
        let pivot = sales_pivot(&["Region"], &[], &[("Revenue", Sum)]);
        let groups = sales_groups(&pivot);
        let spec = build(ChartType::Treemap, &pivot, &groups, &StyleConfig::default());

        assert_eq!(spec.series[0].kind, SeriesKind::Treemap);
        assert_eq!(spec.series[0].breadcrumb, Some(Toggle::off()));
    }

    #[test]
    fn test_radar_indicator_max_has_headroom() {
        let pivot = sales_pivot(&["Region"], &[], &[("Revenue", Sum)]);
        let groups = sales_groups(&pivot);
        let spec = build(ChartType::Radar, &pivot, &groups, &StyleConfig::default());

        let radar = spec.radar.unwrap();
        assert_eq!(radar.indicator.len(), 3);
        assert!(radar.indicator.iter().all(|i| (i.max - 360.0).abs() < 1e-9));
        assert_eq!(spec.series[0].data.len(), 1);
        assert_eq!(spec.series[0].data[0].name(), Some("Revenue"));
    }

    #[test]
    fn test_radar_polygon_per_split_key() {
        let pivot = sales_pivot(&["Region"], &["Product"], &[("Revenue", Sum)]);
        let groups = sales_groups(&pivot);
        let spec = build(ChartType::Radar, &pivot, &groups, &StyleConfig::default());

        let polygons = &spec.series[0].data;
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0].name(), Some("Laptops"));
        assert_eq!(polygons[1].vector(), Some(&[200.0, 0.0, 80.0][..]));
        // Max over all groups (200), not over category totals
        let max = spec.radar.unwrap().indicator[0].max;
        assert!((max - 240.0).abs() < 1e-9);
    }
}
