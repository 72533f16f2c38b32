//! Scripted input replay.
//!
//! A replay script is a JSON document describing what a host would feed the
//! session: pointer/touch events interleaved with toolbar actions.
//!
//! ```json
//! {
//!   "viewport": { "left": 0, "top": 0, "width": 620, "height": 877 },
//!   "actions": [
//!     { "action": "set_pen_style", "style": "fountain" },
//!     { "action": "pointer_down", "x": 40, "y": 40 },
//!     { "action": "pointer_move", "x": 60, "y": 42 },
//!     { "action": "pointer_up" },
//!     { "action": "undo" }
//!   ]
//! }
//! ```

use crate::draw::PenStyle;
use crate::input::{DrawingSession, PanOffset, PointerEvent, Tool, TouchPoint, ViewportRect};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A recorded sequence of input for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Page placement on screen; defaults to one device pixel per bitmap pixel
    #[serde(default)]
    pub viewport: Option<ViewportRect>,
    pub actions: Vec<ReplayAction>,
}

/// One step of a replay script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ReplayAction {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    PointerLeave,
    TouchStart { touches: Vec<TouchPoint> },
    TouchMove { touches: Vec<TouchPoint> },
    TouchEnd,
    SetTool { tool: Tool },
    SetColor { color: String },
    SetBrushSize { size: f64 },
    SetPenStyle { style: PenStyle },
    SetZoom { zoom: f64 },
    ZoomIn,
    ZoomOut,
    SetPanOffset { x: f64, y: f64 },
    SetViewport(ViewportRect),
    Undo,
    Clear,
}

/// Counters reported after a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaySummary {
    pub actions: usize,
    pub history_len: usize,
}

impl ReplayScript {
    /// Reads and parses a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay script {}", path.display()))?;
        Self::parse(&raw)
            .with_context(|| format!("Failed to parse replay script {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("invalid replay script json")
    }

    /// Feeds every action into the session in order.
    pub fn apply(&self, session: &mut DrawingSession) -> ReplaySummary {
        if let Some(viewport) = self.viewport {
            session.set_viewport(viewport);
        }

        for action in &self.actions {
            apply_action(session, action);
        }

        let summary = ReplaySummary {
            actions: self.actions.len(),
            history_len: session.history().len(),
        };
        log::info!(
            "Replayed {} actions; history holds {} entries",
            summary.actions,
            summary.history_len
        );
        summary
    }
}

fn apply_action(session: &mut DrawingSession, action: &ReplayAction) {
    match action {
        ReplayAction::PointerDown { x, y } => {
            session.handle_pointer_event(&PointerEvent::Down { x: *x, y: *y })
        }
        ReplayAction::PointerMove { x, y } => {
            session.handle_pointer_event(&PointerEvent::Move { x: *x, y: *y })
        }
        ReplayAction::PointerUp => session.handle_pointer_event(&PointerEvent::Up),
        ReplayAction::PointerLeave => session.handle_pointer_event(&PointerEvent::Leave),
        ReplayAction::TouchStart { touches } => {
            session.handle_pointer_event(&PointerEvent::TouchStart {
                touches: touches.clone(),
            })
        }
        ReplayAction::TouchMove { touches } => {
            session.handle_pointer_event(&PointerEvent::TouchMove {
                touches: touches.clone(),
            })
        }
        ReplayAction::TouchEnd => session.handle_pointer_event(&PointerEvent::TouchEnd),
        ReplayAction::SetTool { tool } => session.set_tool(*tool),
        ReplayAction::SetColor { color } => {
            session.set_color(color);
        }
        ReplayAction::SetBrushSize { size } => session.set_brush_size(*size),
        ReplayAction::SetPenStyle { style } => session.set_pen_style(*style),
        ReplayAction::SetZoom { zoom } => session.set_zoom(*zoom),
        ReplayAction::ZoomIn => session.zoom_in(),
        ReplayAction::ZoomOut => session.zoom_out(),
        ReplayAction::SetPanOffset { x, y } => session.set_pan_offset(PanOffset::new(*x, *y)),
        ReplayAction::SetViewport(viewport) => session.set_viewport(*viewport),
        ReplayAction::Undo => {
            session.undo();
        }
        ReplayAction::Clear => session.clear(),
    }
}
