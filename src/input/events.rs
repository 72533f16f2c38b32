//! Pointer and touch events delivered by the host.

use serde::{Deserialize, Serialize};

/// One finger position in device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

/// Input events in viewport-relative device coordinates.
///
/// Touch events only look at the first touch point; multi-touch gestures are
/// not interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    /// Pointer left the page element; ends a stroke like `Up`
    Leave,
    TouchStart { touches: Vec<TouchPoint> },
    TouchMove { touches: Vec<TouchPoint> },
    TouchEnd,
}

/// Event after touch input has been folded into pointer semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PointerPhase {
    Down(f64, f64),
    Move(f64, f64),
    Up,
}

impl PointerEvent {
    /// Normalizes mouse and touch variants. Touch events without any touch
    /// point yield `None`.
    pub(crate) fn phase(&self) -> Option<PointerPhase> {
        match self {
            PointerEvent::Down { x, y } => Some(PointerPhase::Down(*x, *y)),
            PointerEvent::Move { x, y } => Some(PointerPhase::Move(*x, *y)),
            PointerEvent::Up | PointerEvent::Leave | PointerEvent::TouchEnd => {
                Some(PointerPhase::Up)
            }
            PointerEvent::TouchStart { touches } => touches
                .first()
                .map(|touch| PointerPhase::Down(touch.x, touch.y)),
            PointerEvent::TouchMove { touches } => touches
                .first()
                .map(|touch| PointerPhase::Move(touch.x, touch.y)),
        }
    }
}
