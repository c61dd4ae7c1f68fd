//! MIME type resolution for embedded files.

use std::path::Path;

/// MIME type used when nothing else matches.
pub const FALLBACK_MIME_TYPE: &str = "binary/octet-stream";

/// Guesses the MIME type of `path` from its extension.
///
/// The standard extension registry is consulted first, then the test-specific
/// table, and finally [`FALLBACK_MIME_TYPE`] is returned.
#[must_use]
pub fn guess_mime_type(path: &Path) -> String {
    if let Some(mime) = mime_guess::from_path(path).first() {
        return mime.essence_str().to_string();
    }
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(|ext| test_type(&ext.to_ascii_lowercase()))
        .unwrap_or(FALLBACK_MIME_TYPE)
        .to_string()
}

fn test_type(ext: &str) -> Option<&'static str> {
    match ext {
        "pcap" => Some("application/vnd.tcpdump.pcap"),
        _ => None,
    }
}
