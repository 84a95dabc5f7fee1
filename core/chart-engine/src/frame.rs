//! FILENAME: core/chart-engine/src/frame.rs
//! The chart frame: everything a spec has before any series are added.
//!
//! Title, tooltip, legend placement, global text style, palette and
//! background come from the style config and are the same for every family.
//! The grid padding is computed here too, but only the axis-based families
//! attach it.

use pivot_engine::PivotConfig;
use crate::chart_type::ChartType;
use crate::spec::{ChartSpec, Grid, Legend, Pos, TextStyle, Title, Tooltip};
use crate::style::{LegendPosition, StyleConfig, Theme};

pub const FONT_FAMILY: &str = "Inter, -apple-system, BlinkMacSystemFont, Segoe UI, sans-serif";
pub const SHORT_FONT_FAMILY: &str = "Inter, sans-serif";

/// Resolved styling shared by the family builders.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub style: &'a StyleConfig,
    pub theme: Theme,
    pub colors: Vec<String>,
    pub x_label: String,
    pub y_label: String,
}

impl<'a> Frame<'a> {
    pub fn new(style: &'a StyleConfig, pivot: &PivotConfig) -> Self {
        let x_label = if style.x_axis_label.is_empty() {
            pivot
                .rows
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        } else {
            style.x_axis_label.clone()
        };

        let y_label = if style.y_axis_label.is_empty() {
            pivot
                .values
                .iter()
                .map(|f| f.display_name())
                .collect::<Vec<_>>()
                .join(", ")
        } else {
            style.y_axis_label.clone()
        };

        Frame {
            style,
            theme: style.theme(),
            colors: style.palette().to_vec(),
            x_label,
            y_label,
        }
    }

    pub fn font(&self, delta: i32) -> u32 {
        self.style.font(delta)
    }

    /// Colour at a palette slot, wrapping around.
    pub fn color(&self, index: usize) -> String {
        self.style.palette().color(index).to_string()
    }

    /// The base text style at a font size offset.
    pub fn text(&self, delta: i32, color: &str) -> TextStyle {
        TextStyle {
            font_family: Some(FONT_FAMILY.to_string()),
            font_size: Some(self.font(delta)),
            font_weight: Some(500),
            color: Some(color.to_string()),
            padding: None,
        }
    }

    /// A compact text style used inside series labels and radial charts.
    pub fn short_text(&self, delta: i32, color: Option<&str>) -> TextStyle {
        TextStyle {
            font_family: Some(SHORT_FONT_FAMILY.to_string()),
            font_size: Some(self.font(delta)),
            font_weight: None,
            color: color.map(str::to_string),
            padding: None,
        }
    }

    /// Value used for `backgroundColor` and slice borders.
    pub fn background(&self) -> String {
        self.style.background.clone()
    }

    /// The spec every family starts from.
    pub fn base_spec(&self, chart_type: ChartType) -> ChartSpec {
        ChartSpec {
            background_color: Some(self.background()),
            color: self.colors.clone(),
            text_style: Some(self.text(0, self.theme.text)),
            title: Title {
                text: self.style.title.clone(),
                subtext: self.style.subtitle.clone(),
                left: Some("center".into()),
                top: Some(Pos::Px(8)),
                text_style: Some(TextStyle {
                    font_weight: Some(700),
                    ..self.text(6, self.theme.text)
                }),
                subtext_style: Some(self.text(-1, self.theme.subtext)),
            },
            tooltip: Some(Tooltip {
                trigger: Some(if chart_type.is_pie_like() { "item" } else { "axis" }.to_string()),
                text_style: Some(TextStyle {
                    font_size: Some(self.font(-2)),
                    ..TextStyle::default()
                }),
            }),
            legend: self.legend(),
            animation: Some(true),
            animation_duration: Some(600),
            ..ChartSpec::default()
        }
    }

    fn legend(&self) -> Option<Legend> {
        if !self.style.show_legend {
            return None;
        }

        let mut legend = Legend {
            show: true,
            item_gap: Some(16),
            item_width: Some(14),
            item_height: Some(10),
            text_style: Some(self.text(-2, self.theme.text)),
            ..Legend::default()
        };

        match self.style.legend_position {
            LegendPosition::Bottom => {
                legend.bottom = Some(Pos::Px(10));
                legend.left = Some("center".into());
            }
            LegendPosition::Top => {
                let top = if self.style.title.is_empty() { 10 } else { 60 };
                legend.top = Some(Pos::Px(top));
                legend.left = Some("center".into());
            }
            LegendPosition::Left => {
                legend.left = Some(Pos::Px(10));
                legend.top = Some("middle".into());
                legend.orient = Some("vertical".to_string());
            }
            LegendPosition::Right => {
                legend.right = Some(Pos::Px(10));
                legend.top = Some("middle".into());
                legend.orient = Some("vertical".to_string());
            }
        }
        Some(legend)
    }

    /// Plot padding leaving room for the title and the legend.
    pub fn grid(&self) -> Grid {
        let legend_at = |pos: LegendPosition| {
            self.style.show_legend && self.style.legend_position == pos
        };

        Grid {
            top: 80,
            right: if legend_at(LegendPosition::Right) { 160 } else { 80 },
            bottom: if legend_at(LegendPosition::Bottom) { 80 } else { 50 },
            left: if legend_at(LegendPosition::Left) { 140 } else { 30 },
            contain_label: Some(true),
        }
    }
}
