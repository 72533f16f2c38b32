//! Pointer input, coordinate mapping and the drawing session state machine.
//!
//! This module translates pointer and touch events into drawing actions. It
//! maps device coordinates into canvas space, records strokes, and routes each
//! drag to the behaviour of the active tool (draw, erase, pan).

pub mod events;
pub mod state;
pub mod stroke;
pub mod tool;
pub mod transform;

// Re-export commonly used types at module level
pub use events::{PointerEvent, TouchPoint};
pub use state::{DrawingSession, SessionSettings, ToolState, ViewState};
pub use stroke::{Stroke, StrokeOutcome, StrokeRecorder};
pub use tool::Tool;
pub use transform::{PanOffset, ViewportRect};
