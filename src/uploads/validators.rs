// src/uploads/validators.rs

use std::io::Read;
use thiserror::Error;
use tracing::{debug, warn};

use super::config::FileValidationConfig;
use super::file::UploadedFile;
use super::sniff::{detect_content_type, SNIFF_LEN};

/// Why an upload was refused. `Display` yields the message recorded
/// against the field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadRejection {
    #[error("No file was uploaded")]
    Missing,

    #[error("File size exceeds maximum limit of {0} bytes")]
    TooLarge(i64),

    #[error("Invalid file extension. Allowed: {}", .0.join(", "))]
    Extension(Vec<String>),

    #[error("Invalid file type. Allowed: {}", .0.join(", "))]
    ContentType(Vec<String>),

    #[error("Could not process file")]
    Open,

    #[error("Could not read file content")]
    Read,
}

/// Checks `file` against `config`: size, then extension, then sniffed
/// content type. Stops at the first failure.
pub fn validate_upload(
    file: &UploadedFile,
    config: &FileValidationConfig,
) -> Result<(), UploadRejection> {
    if config.max_size > 0 && file.size > config.max_size {
        debug!(size = file.size, max_size = config.max_size, "Upload too large");
        return Err(UploadRejection::TooLarge(config.max_size));
    }

    if !config.allowed_extensions.is_empty() {
        let ext = file.extension();
        let allowed = config
            .allowed_extensions
            .iter()
            .any(|allowed| allowed.to_lowercase() == ext);

        if !allowed {
            debug!(extension = %ext, "Upload extension not allowed");
            return Err(UploadRejection::Extension(config.allowed_extensions.clone()));
        }
    }

    if !config.allowed_mime_types.is_empty() {
        let detected = sniff(file)?;
        let allowed = config
            .allowed_mime_types
            .iter()
            .any(|allowed| detected.starts_with(allowed.as_str()));

        if !allowed {
            debug!(detected = %detected, "Upload content type not allowed");
            return Err(UploadRejection::ContentType(config.allowed_mime_types.clone()));
        }
    }

    Ok(())
}

/// Reads at most [`SNIFF_LEN`] bytes and infers the content type. The reader
/// is dropped before returning on every path.
fn sniff(file: &UploadedFile) -> Result<String, UploadRejection> {
    let reader = file.open().map_err(|e| {
        warn!(error = %e, "Failed to open upload for sniffing");
        UploadRejection::Open
    })?;

    let mut prefix = Vec::with_capacity(SNIFF_LEN);
    reader
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut prefix)
        .map_err(|e| {
            warn!(error = %e, "Failed to read upload for sniffing");
            UploadRejection::Read
        })?;

    Ok(detect_content_type(&prefix))
}
