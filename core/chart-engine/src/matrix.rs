//! FILENAME: core/chart-engine/src/matrix.rs
//! Heatmap: categories across, split keys down, colour by value.

use crate::builder::{setup_placeholder, ChartBuilder, ChartInput};
use crate::chart_type::{ChartFamily, ChartType};
use crate::derive::ChartData;
use crate::format::abbreviate;
use crate::frame::Frame;
use crate::spec::{
    Axis, AxisLabel, AxisType, ChartSpec, DataItem, Datum, InRange, ItemValue, Label, Pos,
    Series, SeriesKind, Toggle, VisualMap,
};
use crate::style::DARK_BACKGROUND;

pub const NEEDS_SPLIT: &str = "Heatmap requires a \"Split By\" column. Please add one in Step 2.";

/// Rotate category labels once there are more than this many.
const ROTATE_AFTER: usize = 8;

/// Scale used when there are no values to measure.
const FALLBACK_RANGE: (f64, f64) = (0.0, 100.0);

const LIGHT_LOW: &str = "#eef2ff";

pub struct MatrixBuilder;

impl ChartBuilder for MatrixBuilder {
    fn family(&self) -> ChartFamily {
        ChartFamily::Matrix
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

        if !data.split_active() {
            spec.title.subtext = NEEDS_SPLIT.to_string();
            log::debug!(target: "CHART", "heatmap without an active split");
            return spec;
        }

        let split_labels: Vec<String> = data.axes.split_keys().iter().map(|k| k.label()).collect();

        spec.legend = None;
        spec.grid = Some({
            let mut grid = frame.grid();
            grid.left = 30;
            grid
        });
        spec.x_axis = Some(Axis {
            axis_type: AxisType::Category,
            data: data.categories.clone(),
            axis_label: Some(AxisLabel {
                style: frame.short_text(-3, Some(frame.theme.text)),
                rotate: (data.categories.len() > ROTATE_AFTER).then_some(45),
                ..AxisLabel::default()
            }),
            split_area: Some(Toggle::on()),
            ..Axis::default()
        });
        spec.y_axis = Some(Axis {
            axis_type: AxisType::Category,
            data: split_labels.clone(),
            axis_label: Some(AxisLabel {
                style: frame.short_text(-3, Some(frame.theme.text)),
                ..AxisLabel::default()
            }),
            split_area: Some(Toggle::on()),
            ..Axis::default()
        });

        let (min, max) = data.axes.value_range(0).unwrap_or(FALLBACK_RANGE);
        let low = if frame.theme.is_dark { DARK_BACKGROUND } else { LIGHT_LOW };
        spec.visual_map = Some(VisualMap {
            min,
            max,
            calculable: true,
            orient: "horizontal".to_string(),
            left: "center".into(),
            bottom: Pos::Px(10),
            in_range: InRange {
                color: vec![low.to_string(), frame.color(0)],
            },
            text_style: frame.short_text(-2, Some(frame.theme.text)),
        });

        let show_labels = frame.style.show_data_labels;
        let mut cells = Vec::with_capacity(data.categories.len() * split_labels.len());
        for (x, category) in data.axes.categories().iter().enumerate() {
            for (y, key) in data.axes.split_keys().iter().enumerate() {
                let value = data.axes.value(&category.key, key, 0);
                let mut item = DataItem::new(ItemValue::Vector(vec![x as f64, y as f64, value]));
                if show_labels {
                    item.label = Some(Label::text(abbreviate(value)));
                }
                cells.push(Datum::Item(item));
            }
        }

        spec.series = vec![Series {
            data: cells,
            label: Some(Label {
                show: Some(show_labels),
                style: frame.short_text(-3, None),
                ..Label::default()
            }),
            ..Series::new(SeriesKind::Heatmap)
        }];

        log::debug!(
            target: "CHART",
            "heatmap: {} x {} cells, range {}..{}",
            data.categories.len(),
            split_labels.len(),
            min,
            max
        );
        spec
    }
}
