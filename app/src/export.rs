//! FILENAME: app/src/export.rs
// PURPOSE: Export planning (size, scale, file name) and the boundary to the
// external image renderer and clipboard.
// CONTEXT: Rendering is not done here. A host hands in an `ImageRenderer`
// and a `Clipboard`; every failure on that side ends as a status message.

use chart_engine::ChartSpec;
use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::logging::{log_info, log_warn};

// ============================================================================
// PRESETS & SETTINGS
// ============================================================================

pub const DEFAULT_WIDTH: u32 = 1920;
pub const DEFAULT_HEIGHT: u32 = 1080;
pub const DEFAULT_SCALE: u32 = 2;

/// Preset value that switches to the custom width/height fields.
pub const CUSTOM_PRESET: &str = "custom";

/// (preset value, label) for every named size.
pub const PRESETS: [(&str, &str); 6] = [
    ("1920x1080", "Full HD 16:9"),
    ("1280x720", "HD 16:9"),
    ("3840x2160", "4K 16:9"),
    ("1080x1080", "Square"),
    ("1024x768", "Classic 4:3"),
    ("1080x1920", "Portrait 9:16"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Svg,
}

/// Export controls as the user set them. Custom sizes are kept as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// A `PRESETS` value, a raw "WxH" string, or `"custom"`.
    pub preset: String,
    pub custom_width: String,
    pub custom_height: String,
    pub scale: u32,
    pub format: ExportFormat,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            preset: PRESETS[0].0.to_string(),
            custom_width: DEFAULT_WIDTH.to_string(),
            custom_height: DEFAULT_HEIGHT.to_string(),
            scale: DEFAULT_SCALE,
            format: ExportFormat::Png,
        }
    }
}

impl ExportSettings {
    /// Pixel ratio; 0 falls back to the default.
    pub fn effective_scale(&self) -> u32 {
        if self.scale == 0 {
            DEFAULT_SCALE
        } else {
            self.scale
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Default for Dimensions {
    fn default() -> Self {
        Dimensions {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

// ============================================================================
// DIMENSION RESOLVER
// ============================================================================

/// Leading decimal digits of a field as a positive integer
/// ("800px" -> 800). Anything else is `None`.
pub fn parse_positive(text: &str) -> Option<u32> {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<u32>().ok().filter(|n| *n > 0)
}

/// Parses a "WxH" size string.
pub fn parse_size(text: &str) -> Option<Dimensions> {
    let (w, h) = text.split_once('x')?;
    Some(Dimensions {
        width: w.trim().parse().ok().filter(|n: &u32| *n > 0)?,
        height: h.trim().parse().ok().filter(|n: &u32| *n > 0)?,
    })
}

/// Target size for an export. Custom fields that are not positive integers
/// fall back to 1920 / 1080 individually; an unreadable preset is 1920x1080.
pub fn resolve_dimensions(settings: &ExportSettings) -> Dimensions {
    if settings.preset == CUSTOM_PRESET {
        return Dimensions {
            width: parse_positive(&settings.custom_width).unwrap_or(DEFAULT_WIDTH),
            height: parse_positive(&settings.custom_height).unwrap_or(DEFAULT_HEIGHT),
        };
    }
    parse_size(&settings.preset).unwrap_or_default()
}

// ============================================================================
// EXPORT PLAN
// ============================================================================

/// Everything the renderer needs besides the chart spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPlan {
    pub format: ExportFormat,
    pub dimensions: Dimensions,
    pub scale: u32,
    pub file_name: String,
    /// Background for raster output ("transparent" is passed through).
    pub background: String,
}

impl ExportPlan {
    pub fn new(settings: &ExportSettings, background: &str) -> Self {
        let dimensions = resolve_dimensions(settings);
        let scale = settings.effective_scale();
        ExportPlan {
            format: settings.format,
            dimensions,
            scale,
            file_name: file_name(settings.format, dimensions, scale),
            background: if background.is_empty() {
                "#ffffff".to_string()
            } else {
                background.to_string()
            },
        }
    }

    /// Output size in pixels after applying the scale.
    pub fn pixel_size(&self) -> (u64, u64) {
        let scale = u64::from(self.scale);
        (
            u64::from(self.dimensions.width) * scale,
            u64::from(self.dimensions.height) * scale,
        )
    }
}

pub fn file_name(format: ExportFormat, dimensions: Dimensions, scale: u32) -> String {
    match format {
        ExportFormat::Png => format!(
            "chart_{}x{}@{}x.png",
            dimensions.width, dimensions.height, scale
        ),
        ExportFormat::Svg => "chart.svg".to_string(),
    }
}

// ============================================================================
// RENDERER / CLIPBOARD BOUNDARY
// ============================================================================

/// The external charting library, replaying a spec at a target size.
pub trait ImageRenderer {
    fn render_png(&self, spec: &ChartSpec, plan: &ExportPlan) -> Result<Vec<u8>, ExportError>;
    fn render_svg(&self, spec: &ChartSpec, plan: &ExportPlan) -> Result<String, ExportError>;
}

/// Host clipboard accepting PNG images.
pub trait Clipboard {
    fn write_png(&mut self, png: &[u8]) -> Result<(), ExportError>;
}

pub const COPY_SUCCESS: &str = "Copied to clipboard! Paste directly into PowerPoint.";
pub const COPY_FAILED: &str = "Clipboard copy failed. Please use Download instead.";

/// A rendered file ready to save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Result of an export action: the status line to show, and the file when
/// one was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub status: String,
    pub file: Option<ExportedFile>,
}

pub fn download_status(plan: &ExportPlan) -> String {
    let (width, height) = plan.pixel_size();
    format!("Downloaded {} ({}×{} pixels)", plan.file_name, width, height)
}

/// Renders the chart for download.
pub fn download(renderer: &dyn ImageRenderer, spec: &ChartSpec, plan: &ExportPlan) -> ExportOutcome {
    let rendered = match plan.format {
        ExportFormat::Png => renderer.render_png(spec, plan),
        ExportFormat::Svg => renderer.render_svg(spec, plan).map(String::into_bytes),
    };

    match rendered {
        Ok(bytes) => {
            log_info!("EXPORT", "downloaded {} ({} bytes)", plan.file_name, bytes.len());
            ExportOutcome {
                status: download_status(plan),
                file: Some(ExportedFile {
                    file_name: plan.file_name.clone(),
                    bytes,
                }),
            }
        }
        Err(e) => {
            log_warn!("EXPORT", "download failed: {}", e);
            ExportOutcome {
                status: format!("Export failed: {}", e),
                file: None,
            }
        }
    }
}

/// Renders a PNG and places it on the clipboard. Always PNG regardless of
/// the selected format.
pub fn copy_to_clipboard(
    renderer: &dyn ImageRenderer,
    clipboard: &mut dyn Clipboard,
    spec: &ChartSpec,
    plan: &ExportPlan,
) -> String {
    let png_plan = ExportPlan {
        format: ExportFormat::Png,
        ..plan.clone()
    };

    match renderer
        .render_png(spec, &png_plan)
        .and_then(|png| clipboard.write_png(&png))
    {
        Ok(()) => {
            log_info!("EXPORT", "copied {}x{} chart to clipboard", plan.dimensions.width, plan.dimensions.height);
            COPY_SUCCESS.to_string()
        }
        Err(e) => {
            log_warn!("EXPORT", "clipboard copy failed: {}", e);
            COPY_FAILED.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(width: &str, height: &str) -> ExportSettings {
        ExportSettings {
            preset: CUSTOM_PRESET.to_string(),
            custom_width: width.to_string(),
            custom_height: height.to_string(),
            ..ExportSettings::default()
        }
    }

    #[test]
    fn test_every_preset_resolves() {
        for (value, _) in PRESETS {
            let settings = ExportSettings {
                preset: value.to_string(),
                ..ExportSettings::default()
            };
            let dims = resolve_dimensions(&settings);
            assert_eq!(format!("{}x{}", dims.width, dims.height), value);
        }
    }

    #[test]
    fn test_custom_fields_default_individually() {
        assert_eq!(
            resolve_dimensions(&custom("800", "abc")),
            Dimensions { width: 800, height: 1080 }
        );
        assert_eq!(
            resolve_dimensions(&custom("", "600px")),
            Dimensions { width: 1920, height: 600 }
        );
        assert_eq!(resolve_dimensions(&custom("0", "-5")), Dimensions::default());
    }

    #[test]
    fn test_raw_size_string_and_garbage_preset() {
        let raw = ExportSettings {
            preset: "640x480".to_string(),
            ..ExportSettings::default()
        };
        assert_eq!(resolve_dimensions(&raw), Dimensions { width: 640, height: 480 });

        let garbage = ExportSettings {
            preset: "huge".to_string(),
            ..ExportSettings::default()
        };
        assert_eq!(resolve_dimensions(&garbage), Dimensions::default());
    }

    #[test]
    fn test_file_names() {
        let dims = Dimensions { width: 1280, height: 720 };
        assert_eq!(file_name(ExportFormat::Png, dims, 3), "chart_1280x720@3x.png");
        assert_eq!(file_name(ExportFormat::Svg, dims, 3), "chart.svg");
    }

    #[test]
    fn test_plan_scale_and_status() {
        let settings = ExportSettings {
            scale: 0,
            ..ExportSettings::default()
        };
        let plan = ExportPlan::new(&settings, "transparent");
        assert_eq!(plan.scale, 2);
        assert_eq!(plan.background, "transparent");
        assert_eq!(plan.pixel_size(), (3840, 2160));
        assert_eq!(
            download_status(&plan),
            "Downloaded chart_1920x1080@2x.png (3840×2160 pixels)"
        );
    }
}
