//! Export of converted text (file, clipboard, stdout).
//!
//! Converted text is plain UTF-8 with no further formatting. The page bitmap
//! itself is exported through [`crate::draw::RenderSurface::write_png`].

pub mod clipboard;
pub mod file;
pub mod types;

pub use clipboard::copy_text_to_clipboard;
pub use file::{TextExportConfig, save_text, write_text_to};
pub use types::ExportError;
