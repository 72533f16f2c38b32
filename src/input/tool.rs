//! Drawing tool selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Drawing tool selection.
///
/// The active tool decides what a pointer drag does: paint, erase, or move
/// the page around. Rectangle and circle can be selected but do nothing yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand drawing with the current pen style (default)
    #[default]
    Pen,
    /// Removes pixels along the drag
    Eraser,
    /// Drags the page inside the viewport
    Pan,
    /// Placeholder, no drawing behaviour
    Rectangle,
    /// Placeholder, no drawing behaviour
    Circle,
}

impl Tool {
    /// Whether pointer drags with this tool produce a stroke.
    pub fn captures_strokes(&self) -> bool {
        matches!(self, Tool::Pen | Tool::Eraser)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Pen => "pen",
            Tool::Eraser => "eraser",
            Tool::Pan => "pan",
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pen" => Ok(Tool::Pen),
            "eraser" => Ok(Tool::Eraser),
            "pan" => Ok(Tool::Pan),
            "rectangle" | "rect" => Ok(Tool::Rectangle),
            "circle" => Ok(Tool::Circle),
            other => Err(format!("unknown tool '{other}'")),
        }
    }
}
