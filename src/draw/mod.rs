//! Rendering primitives for the page bitmap (Cairo-based).
//!
//! This module defines the core drawing types:
//! - [`Color`]: RGBA color representation with RGB string parsing
//! - [`PenStyle`] / [`StrokeStyle`]: pen flavours and the style they produce
//! - [`RenderSurface`]: the fixed-resolution page with snapshot/restore

pub mod color;
pub mod style;
pub mod surface;

// Re-export commonly used types at module level
pub use color::Color;
pub use style::{PenStyle, StrokeStyle};
pub use surface::{PageSize, PaintMode, RenderSurface, SurfaceError};
