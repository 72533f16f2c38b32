//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::draw::{PageSize, PenStyle};
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the pen the session starts with and returns to after a clear.
#[derive(Debug, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Default pen color - a named color, an RGB string like `"#000000"`,
    /// or an RGB array like `[0, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default brush size in pixels (valid range: 1.0 - 20.0)
    #[serde(default = "default_brush_size")]
    pub default_brush_size: f64,

    /// Default pen style (ballpoint, fountain, pencil, marker)
    #[serde(default)]
    pub default_pen_style: PenStyle,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_brush_size: default_brush_size(),
            default_pen_style: PenStyle::default(),
        }
    }
}

/// Page bitmap settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct PageConfig {
    /// Bitmap width in pixels (default: A4 at 300 DPI)
    #[serde(default = "default_page_width")]
    pub width: u32,

    /// Bitmap height in pixels (default: A4 at 300 DPI)
    #[serde(default = "default_page_height")]
    pub height: u32,

    /// Strokes with this many points or fewer are treated as taps and dropped
    #[serde(default = "default_min_stroke_points")]
    pub min_stroke_points: usize,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width: default_page_width(),
            height: default_page_height(),
            min_stroke_points: default_min_stroke_points(),
        }
    }
}

impl PageConfig {
    pub fn page_size(&self) -> PageSize {
        PageSize::new(self.width, self.height)
    }
}

/// Zoom settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Zoom factor at session start (valid range: 0.5 - 3.0)
    #[serde(default = "default_zoom")]
    pub default_zoom: f64,

    /// Increment used by zoom in/out (valid range: 0.01 - 1.0)
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_zoom: default_zoom(),
            zoom_step: default_zoom_step(),
        }
    }
}

/// Converted text export settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory saved text files go to (`~` is expanded)
    #[serde(default = "default_export_directory")]
    pub directory: String,

    /// Filename template without extension (supports chrono format specifiers)
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// File extension for saved text
    #[serde(default = "default_export_format")]
    pub format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            filename_template: default_filename_template(),
            format: default_export_format(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("#000000".to_string())
}

fn default_brush_size() -> f64 {
    2.0
}

fn default_page_width() -> u32 {
    PageSize::A4_300_DPI.width
}

fn default_page_height() -> u32 {
    PageSize::A4_300_DPI.height
}

fn default_min_stroke_points() -> usize {
    crate::input::stroke::DEFAULT_MIN_STROKE_POINTS
}

fn default_zoom() -> f64 {
    1.0
}

fn default_zoom_step() -> f64 {
    0.1
}

fn default_export_directory() -> String {
    "~/Documents/Sketchpage".to_string()
}

fn default_filename_template() -> String {
    "converted-text".to_string()
}

fn default_export_format() -> String {
    "txt".to_string()
}
