//! Library exports for the sketchpage drawing surface.
//!
//! Exposes the drawing session (pointer handling, stroke capture, undo
//! history) alongside the configuration, rendering and export modules it
//! relies on, so hosts other than the bundled CLI can drive a session.

pub mod config;
pub mod convert;
pub mod draw;
pub mod export;
pub mod history;
pub mod input;
pub mod replay;
pub mod util;

pub use config::Config;
pub use input::DrawingSession;
