// src/uploads/config.rs

use tracing::debug;

/// Common file size constants.
pub const KB: i64 = 1024;
pub const MB: i64 = 1024 * KB;

pub const MIME_JPEG: &str = "image/jpeg";
pub const MIME_PNG: &str = "image/png";
pub const MIME_GIF: &str = "image/gif";
pub const MIME_WEBP: &str = "image/webp";

/// Formats accepted by [`image_config`] when none are named.
pub const DEFAULT_IMAGE_FORMATS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Format name -> (MIME type, extensions).
const IMAGE_FORMATS: &[(&str, &str, &[&str])] = &[
    ("jpg", MIME_JPEG, &[".jpg", ".jpeg"]),
    ("jpeg", MIME_JPEG, &[".jpg", ".jpeg"]),
    ("png", MIME_PNG, &[".png"]),
    ("gif", MIME_GIF, &[".gif"]),
    ("webp", MIME_WEBP, &[".webp"]),
];

/// Rules applied to one uploaded file.
///
/// `max_size <= 0` disables the size check. Empty lists disable the
/// corresponding check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileValidationConfig {
    pub max_size: i64,
    /// Prefixes matched against the sniffed content type.
    pub allowed_mime_types: Vec<String>,
    /// Dot-prefixed extensions, compared case-insensitively.
    pub allowed_extensions: Vec<String>,
}

impl FileValidationConfig {
    pub fn new(max_size: i64) -> Self {
        Self {
            max_size,
            ..Self::default()
        }
    }

    pub fn allow_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.allowed_mime_types.push(mime_type.into());
        self
    }

    pub fn allow_extension(mut self, extension: impl Into<String>) -> Self {
        self.allowed_extensions.push(extension.into());
        self
    }
}

/// Builds a config for common image formats.
///
/// Format names are matched case-insensitively; unknown names are skipped.
/// An empty list means [`DEFAULT_IMAGE_FORMATS`].
pub fn image_config(max_size: i64, formats: &[&str]) -> FileValidationConfig {
    let formats = if formats.is_empty() {
        DEFAULT_IMAGE_FORMATS
    } else {
        formats
    };

    let mut config = FileValidationConfig::new(max_size);

    for format in formats {
        let name = format.to_lowercase();
        match IMAGE_FORMATS.iter().find(|(key, _, _)| *key == name) {
            Some((_, mime_type, extensions)) => {
                config.allowed_mime_types.push(mime_type.to_string());
                config
                    .allowed_extensions
                    .extend(extensions.iter().map(|ext| ext.to_string()));
            }
            None => debug!(format = %format, "Skipping unknown image format"),
        }
    }

    config
}
