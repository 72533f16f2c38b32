//! Pen styles and the persistent stroke style applied to every paint.

use super::color::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest brush size the pen accepts.
pub const MIN_BRUSH_SIZE: f64 = 1.0;
/// Largest brush size the pen accepts.
pub const MAX_BRUSH_SIZE: f64 = 20.0;

/// Blur width of the fountain pen's soft edge.
pub const FOUNTAIN_GLOW_WIDTH: f64 = 1.0;

/// Opacity of the fountain pen's soft edge relative to the stroke color.
const FOUNTAIN_GLOW_ALPHA: f64 = 0.35;

/// Pen flavour selected in the toolbar.
///
/// Only [`PenStyle::Fountain`] changes rendering (it adds a soft edge); the
/// other styles draw a plain round-capped line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PenStyle {
    #[default]
    Ballpoint,
    Fountain,
    Pencil,
    Marker,
}

impl PenStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            PenStyle::Ballpoint => "ballpoint",
            PenStyle::Fountain => "fountain",
            PenStyle::Pencil => "pencil",
            PenStyle::Marker => "marker",
        }
    }
}

impl fmt::Display for PenStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PenStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ballpoint" => Ok(PenStyle::Ballpoint),
            "fountain" => Ok(PenStyle::Fountain),
            "pencil" => Ok(PenStyle::Pencil),
            "marker" => Ok(PenStyle::Marker),
            other => Err(format!("unknown pen style '{other}'")),
        }
    }
}

/// Soft edge drawn underneath a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    /// Extra width added on each side of the core line
    pub width: f64,
    /// Glow color (stroke color at reduced opacity)
    pub color: Color,
}

/// Persistent style the render surface applies to every segment.
///
/// Line cap and join are always round; they are not part of the struct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    pub glow: Option<Glow>,
}

impl StrokeStyle {
    /// Builds the style for the given pen settings.
    ///
    /// Calling this again with the same inputs yields an identical style.
    pub fn build(color: Color, brush_size: f64, pen_style: PenStyle) -> Self {
        let glow = match pen_style {
            PenStyle::Fountain => Some(Glow {
                width: FOUNTAIN_GLOW_WIDTH,
                color: color.with_alpha(color.a * FOUNTAIN_GLOW_ALPHA),
            }),
            PenStyle::Ballpoint | PenStyle::Pencil | PenStyle::Marker => None,
        };

        Self {
            color,
            width: brush_size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE),
            glow,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::build(super::color::BLACK, 2.0, PenStyle::Ballpoint)
    }
}
