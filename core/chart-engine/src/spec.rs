//! FILENAME: core/chart-engine/src/spec.rs
//! Chart Spec - the declarative chart description handed to the renderer.
//!
//! The shape follows the ECharts option object (camelCase keys, optional
//! components omitted when unset) so it can be serialized with serde_json
//! and passed straight to the renderer. Things a renderer would normally
//! compute with callbacks are emitted as data instead:
//! - per-point labels carry their pre-formatted text
//! - value axes carry a `valueFormat` hint naming the label formatter
//! - custom series carry a `renderItem` hint naming the shape to draw

use serde::{Deserialize, Serialize};

// ============================================================================
// SHARED PIECES
// ============================================================================

/// A position or size: pixels or a keyword / percentage string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pos {
    Px(u32),
    Keyword(String),
}

impl From<u32> for Pos {
    fn from(px: u32) -> Self {
        Pos::Px(px)
    }
}

impl From<&str> for Pos {
    fn from(keyword: &str) -> Self {
        Pos::Keyword(keyword.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// [top, right, bottom, left]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<[u32; 4]>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Toggle {
    pub show: bool,
}

impl Toggle {
    pub fn on() -> Self {
        Toggle { show: true }
    }

    pub fn off() -> Self {
        Toggle { show: false }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_blur: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_color: Option<String>,
}

impl ItemStyle {
    pub fn color(color: impl Into<String>) -> Self {
        ItemStyle {
            color: Some(color.into()),
            ..ItemStyle::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Emphasis {
    pub item_style: ItemStyle,
}

/// Data label settings. `formatter` is a renderer template such as
/// "{b}: {d}%" or, on a single data point, the final label text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatter: Option<String>,
    #[serde(flatten)]
    pub style: TextStyle,
}

impl Label {
    /// A label whose text is already final.
    pub fn text(text: impl Into<String>) -> Self {
        Label {
            formatter: Some(text.into()),
            ..Label::default()
        }
    }
}

// ============================================================================
// TOP-LEVEL COMPONENTS
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subtext: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Pos>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<Pos>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_style: Option<TextStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtext_style: Option<TextStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_style: Option<TextStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    pub show: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Pos>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Pos>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<Pos>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Pos>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_gap: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_style: Option<TextStyle>,
}

/// Plot area padding in pixels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contain_label: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    #[default]
    Category,
    Value,
    Time,
}

/// Formatter the renderer applies to numeric tick labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    /// `format::abbreviate`
    Abbreviate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLabel {
    #[serde(flatten)]
    pub style: TextStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_format: Option<ValueFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_style: Option<LineStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_style: Option<LineStyle>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(rename = "type")]
    pub axis_type: AxisType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_gap: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_text_style: Option<TextStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_label: Option<AxisLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_line: Option<AxisLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_tick: Option<Toggle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_line: Option<SplitLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_area: Option<Toggle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inverse: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadarIndicator {
    pub name: String,
    pub max: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Radar {
    pub indicator: Vec<RadarIndicator>,
    pub shape: String,
    pub axis_name: TextStyle,
    pub split_line: SplitLine,
    pub split_area: Toggle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InRange {
    pub color: Vec<String>,
}

/// Continuous colour scale (heatmap).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualMap {
    pub min: f64,
    pub max: f64,
    pub calculable: bool,
    pub orient: String,
    pub left: Pos,
    pub bottom: Pos,
    pub in_range: InRange,
    pub text_style: TextStyle,
}

impl Default for Pos {
    fn default() -> Self {
        Pos::Px(0)
    }
}

// ============================================================================
// SERIES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    #[default]
    Bar,
    Line,
    Pie,
    Scatter,
    Radar,
    Treemap,
    Funnel,
    Heatmap,
    Custom,
}

/// One Gantt bar: `[row index, start ms, end ms, progress, category]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSpan(pub usize, pub i64, pub i64, pub f64, pub String);

/// The value part of a data item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemValue {
    Number(f64),
    Vector(Vec<f64>),
    Task(TaskSpan),
}

/// A data point carrying more than a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub value: ItemValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_style: Option<ItemStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol_size: Option<f64>,
}

impl DataItem {
    pub fn new(value: ItemValue) -> Self {
        DataItem {
            name: None,
            value,
            label: None,
            item_style: None,
            symbol_size: None,
        }
    }

    pub fn named(name: impl Into<String>, value: ItemValue) -> Self {
        DataItem {
            name: Some(name.into()),
            ..DataItem::new(value)
        }
    }
}

/// One entry of a series' `data` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Datum {
    Value(f64),
    Point(Vec<f64>),
    Item(DataItem),
}

impl Datum {
    /// The scalar value of the point, if it has one.
    pub fn number(&self) -> Option<f64> {
        match self {
            Datum::Value(v) => Some(*v),
            Datum::Item(DataItem {
                value: ItemValue::Number(v),
                ..
            }) => Some(*v),
            _ => None,
        }
    }

    /// Name of a named item.
    pub fn name(&self) -> Option<&str> {
        match self {
            Datum::Item(item) => item.name.as_deref(),
            _ => None,
        }
    }

    /// Coordinates of a point-like datum.
    pub fn vector(&self) -> Option<&[f64]> {
        match self {
            Datum::Point(v) => Some(v),
            Datum::Item(DataItem {
                value: ItemValue::Vector(v),
                ..
            }) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaStyle {
    pub opacity: f64,
}

/// Dimension mapping for custom series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encode {
    pub x: Vec<usize>,
    pub y: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    #[serde(rename = "type")]
    pub kind: SeriesKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub data: Vec<Datum>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_gap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_style: Option<AreaStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_style: Option<ItemStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emphasis: Option<Emphasis>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub radius: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub center: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Pos>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Pos>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<Pos>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<Pos>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breadcrumb: Option<Toggle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encode: Option<Encode>,
    /// Name of the shape a custom series draws per item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render_item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub silent: Option<bool>,
}

impl Series {
    pub fn new(kind: SeriesKind) -> Self {
        Series {
            kind,
            ..Series::default()
        }
    }

    /// Scalar values of the data points (non-scalar points read as NaN).
    pub fn values(&self) -> Vec<f64> {
        self.data
            .iter()
            .map(|d| d.number().unwrap_or(f64::NAN))
            .collect()
    }
}

// ============================================================================
// CHART SPEC
// ============================================================================

/// The complete chart description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Palette colours, assigned to series in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub color: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_style: Option<TextStyle>,
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Tooltip>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radar: Option<Radar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_map: Option<VisualMap>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub series: Vec<Series>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_duration: Option<u32>,
}

impl ChartSpec {
    /// A centered message in place of a chart.
    pub fn placeholder(message: &str, font_size: u32) -> Self {
        ChartSpec {
            title: Title {
                text: message.to_string(),
                left: Some("center".into()),
                top: Some("center".into()),
                text_style: Some(TextStyle {
                    color: Some("#94a3b8".to_string()),
                    font_size: Some(font_size),
                    ..TextStyle::default()
                }),
                ..Title::default()
            },
            ..ChartSpec::default()
        }
    }

    /// True when the spec carries no series to draw.
    pub fn is_degraded(&self) -> bool {
        self.series.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
