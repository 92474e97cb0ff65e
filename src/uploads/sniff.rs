// src/uploads/sniff.rs
//! Content-based MIME detection over the leading bytes of an upload

/// Number of leading bytes inspected when sniffing.
pub const SNIFF_LEN: usize = 512;

pub const MIME_TEXT: &str = "text/plain; charset=utf-8";
pub const MIME_BINARY: &str = "application/octet-stream";

/// Infers a MIME type from `data`. Only the first [`SNIFF_LEN`] bytes are
/// considered.
pub fn detect_content_type(data: &[u8]) -> String {
    let data = &data[..data.len().min(SNIFF_LEN)];

    if let Some(kind) = infer::get(data) {
        return kind.mime_type().to_string();
    }

    if data.iter().copied().any(is_binary_byte) {
        MIME_BINARY.to_string()
    } else {
        MIME_TEXT.to_string()
    }
}

/// Control bytes that never appear in text content.
fn is_binary_byte(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}
