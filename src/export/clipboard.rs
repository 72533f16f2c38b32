//! Clipboard integration for copying converted text.

use super::types::ExportError;
use std::process::{Command, Stdio};
use wl_clipboard_rs::copy::{MimeType, Options, Source};

const TEXT_MIME: &str = "text/plain;charset=utf-8";

/// Copy converted text to the Wayland clipboard.
///
/// Tries the `wl-copy` command first and falls back to wl-clipboard-rs.
pub fn copy_text_to_clipboard(text: &str) -> Result<(), ExportError> {
    log::debug!(
        "Attempting to copy converted text to clipboard ({} bytes)",
        text.len()
    );

    match copy_via_command(text) {
        Ok(()) => {
            log::info!("Copied converted text to clipboard via wl-copy");
            Ok(())
        }
        Err(cmd_err) => {
            log::warn!(
                "wl-copy command path failed ({}). Falling back to wl-clipboard-rs",
                cmd_err
            );
            match copy_via_library(text) {
                Ok(()) => {
                    log::info!("Copied converted text to clipboard via wl-clipboard-rs");
                    Ok(())
                }
                Err(lib_err) => {
                    let combined = format!(
                        "wl-copy failed: {} ; wl-clipboard-rs failed: {}",
                        cmd_err, lib_err
                    );
                    Err(ExportError::ClipboardError(combined))
                }
            }
        }
    }
}

/// Copy to clipboard using wl-clipboard-rs library.
fn copy_via_library(text: &str) -> Result<(), ExportError> {
    use wl_clipboard_rs::copy::ServeRequests;

    let mut opts = Options::new();
    // Serve one paste then exit
    opts.serve_requests(ServeRequests::Only(1));

    opts.copy(Source::Bytes(text.as_bytes().into()), MimeType::Text)
        .map_err(|e| ExportError::ClipboardError(format!("wl-clipboard-rs error: {}", e)))?;

    Ok(())
}

/// Copy to clipboard by shelling out to wl-copy command.
fn copy_via_command(text: &str) -> Result<(), ExportError> {
    use std::io::Write;

    let mut child = Command::new("wl-copy")
        .arg("--type")
        .arg(TEXT_MIME)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            ExportError::ClipboardError(format!(
                "Failed to spawn wl-copy (is it installed?): {}",
                e
            ))
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes()).map_err(|e| {
            ExportError::ClipboardError(format!("Failed to write to wl-copy stdin: {}", e))
        })?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| ExportError::ClipboardError(format!("Failed to wait for wl-copy: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ExportError::ClipboardError(format!(
            "wl-copy failed: {}",
            stderr
        )));
    }

    log::debug!("wl-copy command completed successfully");
    Ok(())
}
