//! Error type for converted text export.

use thiserror::Error;

/// Errors that can occur while exporting converted text.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to save text: {0}")]
    SaveError(#[from] std::io::Error),

    #[error("Clipboard operation failed: {0}")]
    ClipboardError(String),

    #[error("Invalid filename template '{0}'")]
    InvalidTemplate(String),
}
