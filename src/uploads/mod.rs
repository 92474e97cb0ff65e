// src/uploads/mod.rs
//! Uploaded file handles and the checks applied to them

pub mod config;
pub mod file;
pub mod sniff;
pub mod validators;


pub use config::{
    image_config, FileValidationConfig, DEFAULT_IMAGE_FORMATS, KB, MB, MIME_GIF, MIME_JPEG,
    MIME_PNG, MIME_WEBP,
};
pub use file::{file_extension, UploadedFile};
pub use sniff::detect_content_type;
pub use validators::{validate_upload, UploadRejection};
