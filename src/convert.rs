//! Stroke-to-text conversion seam and the converted text buffer.
//!
//! No recognition happens here: [`PlaceholderConverter`] answers every stroke
//! with the same line of text. A real recognizer plugs in through
//! [`TextConverter`].

use crate::input::Stroke;

/// Text appended for every committed stroke by the placeholder converter.
pub const PLACEHOLDER_TEXT: &str = "Sample recognized text\n";

/// Turns a committed stroke into text to append to the buffer.
pub trait TextConverter {
    fn convert(&mut self, stroke: &Stroke) -> String;
}

/// Converter that ignores the stroke and returns [`PLACEHOLDER_TEXT`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderConverter;

impl TextConverter for PlaceholderConverter {
    fn convert(&mut self, stroke: &Stroke) -> String {
        log::debug!(
            "Placeholder conversion for {} stroke with {} points",
            stroke.tool(),
            stroke.len()
        );
        PLACEHOLDER_TEXT.to_string()
    }
}

/// Append-only text buffer fed by stroke commits.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConvertedText {
    text: String,
}

impl ConvertedText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, fragment: &str) {
        self.text.push_str(fragment);
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}
