//! Configuration file support for sketchpage.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/sketchpage/config.toml`. Settings include pen defaults,
//! page resolution, zoom behaviour and text export destinations.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{DrawingConfig, ExportConfig, PageConfig, ViewConfig};

use crate::draw::style::{MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
use crate::input::state::{MAX_ZOOM, MIN_ZOOM};
use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Smallest accepted page edge in pixels.
const MIN_PAGE_EDGE: u32 = 16;
/// Largest accepted page edge in pixels.
const MAX_PAGE_EDGE: u32 = 10_000;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "#000000"
/// default_brush_size = 2.0
/// default_pen_style = "ballpoint"
///
/// [page]
/// width = 2480
/// height = 3508
///
/// [view]
/// default_zoom = 1.0
/// zoom_step = 0.1
///
/// [export]
/// directory = "~/Documents/Sketchpage"
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Pen defaults (color, brush size, pen style)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Page bitmap resolution and stroke commit threshold
    #[serde(default)]
    pub page: PageConfig,

    /// Zoom defaults
    #[serde(default)]
    pub view: ViewConfig,

    /// Converted text export settings
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_brush_size`: 1.0 - 20.0
    /// - `page.width` / `page.height`: 16 - 10000
    /// - `default_zoom`: 0.5 - 3.0
    /// - `zoom_step`: 0.01 - 1.0
    pub fn validate_and_clamp(&mut self) {
        // Brush size: 1.0 - 20.0
        if !(MIN_BRUSH_SIZE..=MAX_BRUSH_SIZE).contains(&self.drawing.default_brush_size) {
            log::warn!(
                "Invalid default_brush_size {:.1}, clamping to {:.1}-{:.1} range",
                self.drawing.default_brush_size,
                MIN_BRUSH_SIZE,
                MAX_BRUSH_SIZE
            );
            self.drawing.default_brush_size = if self.drawing.default_brush_size.is_nan() {
                MIN_BRUSH_SIZE
            } else {
                self.drawing
                    .default_brush_size
                    .clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE)
            };
        }

        // Page edges: 16 - 10000 px
        if !(MIN_PAGE_EDGE..=MAX_PAGE_EDGE).contains(&self.page.width) {
            log::warn!(
                "Invalid page width {}, clamping to {}-{} range",
                self.page.width,
                MIN_PAGE_EDGE,
                MAX_PAGE_EDGE
            );
            self.page.width = self.page.width.clamp(MIN_PAGE_EDGE, MAX_PAGE_EDGE);
        }
        if !(MIN_PAGE_EDGE..=MAX_PAGE_EDGE).contains(&self.page.height) {
            log::warn!(
                "Invalid page height {}, clamping to {}-{} range",
                self.page.height,
                MIN_PAGE_EDGE,
                MAX_PAGE_EDGE
            );
            self.page.height = self.page.height.clamp(MIN_PAGE_EDGE, MAX_PAGE_EDGE);
        }

        // Zoom: 0.5 - 3.0
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.view.default_zoom) {
            log::warn!(
                "Invalid default_zoom {:.2}, clamping to {:.1}-{:.1} range",
                self.view.default_zoom,
                MIN_ZOOM,
                MAX_ZOOM
            );
            self.view.default_zoom = if self.view.default_zoom.is_nan() {
                1.0
            } else {
                self.view.default_zoom.clamp(MIN_ZOOM, MAX_ZOOM)
            };
        }

        // Zoom step: 0.01 - 1.0
        if !(0.01..=1.0).contains(&self.view.zoom_step) {
            log::warn!(
                "Invalid zoom_step {:.3}, clamping to 0.01-1.0 range",
                self.view.zoom_step
            );
            self.view.zoom_step = if self.view.zoom_step.is_nan() {
                0.1
            } else {
                self.view.zoom_step.clamp(0.01, 1.0)
            };
        }

        // Filename template must be a valid strftime pattern without path separators
        let template = &self.export.filename_template;
        let bad_specifier = StrftimeItems::new(template).any(|item| matches!(item, Item::Error));
        if template.trim().is_empty() || template.contains(['/', '\\']) || bad_specifier {
            log::warn!(
                "Invalid export filename_template '{}', falling back to 'converted-text'",
                template
            );
            self.export.filename_template = "converted-text".to_string();
        }

        // Export format must be a bare extension
        let format = self.export.format.trim().trim_start_matches('.');
        if format.is_empty() || format.contains(['/', '\\']) {
            log::warn!(
                "Invalid export format '{}', falling back to 'txt'",
                self.export.format
            );
            self.export.format = "txt".to_string();
        } else if format != self.export.format {
            self.export.format = format.to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/sketchpage/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sketchpage");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path, or returns defaults if the file is missing.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to the given path.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Writes the documented example config to the given path.
    ///
    /// # Errors
    /// Returns an error if a config file already exists at the target path or
    /// the file cannot be written.
    pub fn create_default_file(config_path: &Path) -> Result<()> {
        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(config_path, default_config)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Created default config at {}", config_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::PenStyle;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_blank_session() {
        let config = Config::default();
        assert_eq!(config.drawing.default_brush_size, 2.0);
        assert_eq!(config.drawing.default_pen_style, PenStyle::Ballpoint);
        assert_eq!(config.page.width, 2480);
        assert_eq!(config.page.height, 3508);
        assert_eq!(config.page.min_stroke_points, 5);
        assert_eq!(config.view.default_zoom, 1.0);
    }

    #[test]
    fn validate_clamps_out_of_range_values() {
        let mut config = Config::default();
        config.drawing.default_brush_size = 50.0;
        config.view.default_zoom = 10.0;
        config.view.zoom_step = 0.0;
        config.page.width = 1;
        config.export.format = ".md".to_string();
        config.export.filename_template = "notes_%Q".to_string();

        config.validate_and_clamp();

        assert_eq!(config.drawing.default_brush_size, 20.0);
        assert_eq!(config.view.default_zoom, 3.0);
        assert_eq!(config.view.zoom_step, 0.01);
        assert_eq!(config.page.width, 16);
        assert_eq!(config.export.format, "md");
        assert_eq!(config.export.filename_template, "converted-text");
    }

    #[test]
    fn validate_keeps_good_templates_and_rejects_paths() {
        let mut config = Config::default();
        config.export.filename_template = "notes_%Y-%m-%d".to_string();
        config.validate_and_clamp();
        assert_eq!(config.export.filename_template, "notes_%Y-%m-%d");

        config.export.filename_template = "../outside/%Y".to_string();
        config.validate_and_clamp();
        assert_eq!(config.export.filename_template, "converted-text");
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_fields() {
        let config: Config = toml::from_str(
            r##"
            [drawing]
            default_color = "#ff0000"
            default_pen_style = "fountain"
            "##,
        )
        .unwrap();

        assert_eq!(config.drawing.default_pen_style, PenStyle::Fountain);
        assert_eq!(config.drawing.default_brush_size, 2.0);
        assert_eq!(config.page.height, 3508);
        assert_eq!(config.export.filename_template, "converted-text");
    }

    #[test]
    fn load_from_missing_file_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(config.view.zoom_step, 0.1);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[drawing\nbroken").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn example_config_parses() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        Config::create_default_file(&path).unwrap();
        assert!(Config::create_default_file(&path).is_err());

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.page.width, 2480);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");

        let mut config = Config::default();
        config.drawing.default_brush_size = 7.0;
        config.view.default_zoom = 1.5;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.drawing.default_brush_size, 7.0);
        assert_eq!(loaded.view.default_zoom, 1.5);
    }
}
