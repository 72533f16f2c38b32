//! Saving converted text to disk.

use super::types::ExportError;
use crate::config::ExportConfig;
use crate::util::expand_tilde;
use chrono::Local;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

/// Where and under which name converted text is saved.
#[derive(Debug, Clone)]
pub struct TextExportConfig {
    /// Directory to save text files to.
    pub save_directory: PathBuf,
    /// Filename template (supports chrono format specifiers).
    pub filename_template: String,
    /// File extension.
    pub format: String,
}

impl Default for TextExportConfig {
    fn default() -> Self {
        Self {
            save_directory: dirs::document_dir()
                .unwrap_or_else(|| PathBuf::from("~"))
                .join("Sketchpage"),
            filename_template: "converted-text".to_string(),
            format: "txt".to_string(),
        }
    }
}

impl From<&ExportConfig> for TextExportConfig {
    fn from(config: &ExportConfig) -> Self {
        Self {
            save_directory: expand_tilde(&config.directory),
            filename_template: config.filename_template.clone(),
            format: config.format.clone(),
        }
    }
}

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `format` - File extension (e.g., "txt")
///
/// # Errors
/// Returns [`ExportError::InvalidTemplate`] if the template contains an
/// unknown format specifier.
pub fn generate_filename(template: &str, format: &str) -> Result<String, ExportError> {
    let now = Local::now();
    let mut filename = String::new();
    write!(filename, "{}.{}", now.format(template), format)
        .map_err(|_| ExportError::InvalidTemplate(template.to_string()))?;
    Ok(filename)
}

/// Ensure the save directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Save converted text into the configured export directory.
///
/// # Returns
/// Path to the saved file
pub fn save_text(text: &str, config: &TextExportConfig) -> Result<PathBuf, ExportError> {
    let directory = ensure_directory_exists(&config.save_directory)?;
    let filename = generate_filename(&config.filename_template, &config.format)?;
    let file_path = directory.join(&filename);

    write_text_to(&file_path, text)?;
    Ok(file_path)
}

/// Write converted text to an explicit path.
///
/// The file is readable and writable by the current user only.
pub fn write_text_to(path: &Path, text: &str) -> Result<(), ExportError> {
    log::info!(
        "Saving converted text to: {} ({} bytes)",
        path.display(),
        text.len()
    );

    fs::write(path, text.as_bytes())?;

    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, Permissions::from_mode(0o600))?;
    }

    log::debug!("Converted text saved: {}", path.display());
    Ok(())
}
