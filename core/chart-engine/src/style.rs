//! FILENAME: core/chart-engine/src/style.rs
//! PURPOSE: Presentation settings for a chart: titles, fonts, legend,
//! palette and background.
//! CONTEXT: A `StyleConfig` is plain data chosen by the user in the design
//! step. The `Theme` is derived from the background and decides text and
//! grid line colours.

use serde::{Deserialize, Serialize};

// ============================================================================
// PALETTES
// ============================================================================

/// A named colour palette. Series take colours in order, wrapping around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub colors: &'static [&'static str],
}

impl Palette {
    /// Colour at a slot, wrapping around the palette.
    pub fn color(&self, index: usize) -> &'static str {
        self.colors[index % self.colors.len()]
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_string()).collect()
    }
}

/// Presentation-friendly, high-contrast palettes.
pub const PALETTES: [Palette; 6] = [
    Palette {
        name: "Indigo",
        colors: &[
            "#6366f1", "#8b5cf6", "#ec4899", "#f59e0b", "#10b981",
            "#3b82f6", "#ef4444", "#14b8a6", "#f97316", "#84cc16",
        ],
    },
    Palette {
        name: "Business",
        colors: &[
            "#1e3a5f", "#2563eb", "#0891b2", "#059669", "#d97706",
            "#dc2626", "#7c3aed", "#db2777", "#ea580c", "#4f46e5",
        ],
    },
    Palette {
        name: "Pastel",
        colors: &[
            "#93c5fd", "#a5b4fc", "#f9a8d4", "#fcd34d", "#6ee7b7",
            "#fdba74", "#fca5a5", "#67e8f9", "#d8b4fe", "#86efac",
        ],
    },
    Palette {
        name: "Bold",
        colors: &[
            "#ef4444", "#f59e0b", "#22c55e", "#3b82f6", "#a855f7",
            "#ec4899", "#14b8a6", "#f97316", "#6366f1", "#eab308",
        ],
    },
    Palette {
        name: "Earth",
        colors: &[
            "#92400e", "#b45309", "#a16207", "#4d7c0f", "#047857",
            "#0e7490", "#1e40af", "#6b21a8", "#be123c", "#78716c",
        ],
    },
    Palette {
        name: "Ocean",
        colors: &[
            "#0c4a6e", "#0369a1", "#0284c7", "#0891b2", "#06b6d4",
            "#22d3ee", "#67e8f9", "#a5f3fc", "#155e75", "#164e63",
        ],
    },
];

// ============================================================================
// STYLE CONFIG
// ============================================================================

/// Background that switches the chart to light-on-dark text.
pub const DARK_BACKGROUND: &str = "#1e293b";

/// Where the legend is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

/// User-chosen chart styling. Every field has a default so partial JSON
/// configs deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub title: String,
    pub subtitle: String,
    /// Category axis title; empty means "derive from the row fields".
    pub x_axis_label: String,
    /// Value axis title; empty means "derive from the value fields".
    pub y_axis_label: String,
    pub font_size: u32,
    pub show_legend: bool,
    pub show_data_labels: bool,
    pub show_grid: bool,
    pub legend_position: LegendPosition,
    pub palette_index: usize,
    /// Any CSS colour, or "transparent".
    pub background: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig {
            title: String::new(),
            subtitle: String::new(),
            x_axis_label: String::new(),
            y_axis_label: String::new(),
            font_size: 14,
            show_legend: true,
            show_data_labels: false,
            show_grid: true,
            legend_position: LegendPosition::Bottom,
            palette_index: 0,
            background: "#ffffff".to_string(),
        }
    }
}

impl StyleConfig {
    /// The selected palette; out-of-range indices clamp to the last one.
    pub fn palette(&self) -> &'static Palette {
        &PALETTES[self.palette_index.min(PALETTES.len() - 1)]
    }

    pub fn theme(&self) -> Theme {
        Theme::for_background(&self.background)
    }

    /// Font size offset by `delta`, never below 1.
    pub fn font(&self, delta: i32) -> u32 {
        (self.font_size as i32 + delta).max(1) as u32
    }
}

// ============================================================================
// THEME
// ============================================================================

/// Text and line colours derived from the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub is_dark: bool,
    pub text: &'static str,
    pub subtext: &'static str,
    pub grid: &'static str,
}

impl Theme {
    pub fn for_background(background: &str) -> Self {
        if background.eq_ignore_ascii_case(DARK_BACKGROUND) {
            Theme {
                is_dark: true,
                text: "#e2e8f0",
                subtext: "#94a3b8",
                grid: "rgba(255,255,255,0.08)",
            }
        } else {
            Theme {
                is_dark: false,
                text: "#334155",
                subtext: "#64748b",
                grid: "rgba(0,0,0,0.06)",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let style = StyleConfig::default();
        assert_eq!(style.font_size, 14);
        assert!(style.show_legend);
        assert!(!style.show_data_labels);
        assert_eq!(style.legend_position, LegendPosition::Bottom);
        assert_eq!(style.palette().name, "Indigo");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let style: StyleConfig =
            serde_json::from_str(r#"{"title":"Sales","legend_position":"right"}"#).unwrap();
        assert_eq!(style.title, "Sales");
        assert_eq!(style.legend_position, LegendPosition::Right);
        assert_eq!(style.font_size, 14);
        assert_eq!(style.background, "#ffffff");
    }

    #[test]
    fn test_palette_index_is_clamped() {
        let style = StyleConfig {
            palette_index: 42,
            ..StyleConfig::default()
        };
        assert_eq!(style.palette().name, "Ocean");
        assert_eq!(PALETTES[0].color(12), "#8b5cf6");
    }

    #[test]
    fn test_dark_background_switches_theme() {
        assert!(Theme::for_background("#1e293b").is_dark);
        assert!(!Theme::for_background("transparent").is_dark);
        assert_eq!(Theme::for_background("#1E293B").text, "#e2e8f0");
    }

    #[test]
    fn test_font_offsets_never_reach_zero() {
        let style = StyleConfig {
            font_size: 2,
            ..StyleConfig::default()
        };
        assert_eq!(style.font(-3), 1);
        assert_eq!(style.font(6), 8);
    }
}
