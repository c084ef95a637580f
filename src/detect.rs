//! Input format detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Supported line input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFormat {
    /// UTF-8 text, one line per line, form feed between regions
    Text,
    /// JSON line records
    Json,
}

impl InputFormat {
    /// Canonical file extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            InputFormat::Text => "txt",
            InputFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Text => write!(f, "text"),
            InputFormat::Json => write!(f, "json"),
        }
    }
}

/// UTF-8 byte order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Bytes sniffed from the head of a file.
const SNIFF_LEN: usize = 8192;

/// Detect the input format of a file.
///
/// A `.json`, `.txt` or `.text` extension decides directly; otherwise the
/// head of the file is sniffed with [`detect_format_from_bytes`].
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match ext.as_deref() {
        Some("json") => return Ok(InputFormat::Json),
        Some("txt") | Some("text") => return Ok(InputFormat::Text),
        _ => {}
    }

    let mut head = Vec::with_capacity(SNIFF_LEN);
    File::open(path)?
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut head)?;
    detect_format_from_bytes(&head)
}

/// Detect the input format from content.
///
/// JSON input starts with `[` after an optional BOM and whitespace. Anything
/// else must be UTF-8 to count as text; a multi-byte character cut off at
/// the end of `data` is tolerated.
///
/// # Returns
/// * `Err(Error::UnknownFormat)` for binary data
pub fn detect_format_from_bytes(data: &[u8]) -> Result<InputFormat> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let first = data.iter().find(|b| !b.is_ascii_whitespace());
    if first == Some(&b'[') {
        return Ok(InputFormat::Json);
    }

    match std::str::from_utf8(data) {
        Ok(text) if !text.contains('\0') => Ok(InputFormat::Text),
        Ok(_) => Err(Error::UnknownFormat),
        // error_len() is None when the input merely ends mid-character
        Err(e) if e.error_len().is_none() => Ok(InputFormat::Text),
        Err(_) => Err(Error::UnknownFormat),
    }
}

/// Check if bytes look like JSON line records.
pub fn is_json_bytes(data: &[u8]) -> bool {
    matches!(detect_format_from_bytes(data), Ok(InputFormat::Json))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_json() {
        assert_eq!(
            detect_format_from_bytes(b"  [{\"text\": \"a\"}]").unwrap(),
            InputFormat::Json
        );
        assert_eq!(
            detect_format_from_bytes(b"\xEF\xBB\xBF[]").unwrap(),
            InputFormat::Json
        );
    }

    #[test]
    fn test_detect_text() {
        assert_eq!(
            detect_format_from_bytes(b"EXECUTIVE SUMMARY\nThe fund grew.").unwrap(),
            InputFormat::Text
        );
        assert_eq!(detect_format_from_bytes(b"").unwrap(), InputFormat::Text);
    }

    #[test]
    fn test_truncated_utf8_is_text() {
        // "é" cut after its first byte
        assert_eq!(
            detect_format_from_bytes(b"caf\xC3").unwrap(),
            InputFormat::Text
        );
    }

    #[test]
    fn test_detect_binary() {
        let result = detect_format_from_bytes(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\xff\xfe");
        assert!(matches!(result, Err(Error::UnknownFormat)));
        assert!(matches!(
            detect_format_from_bytes(b"abc\0def"),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_is_json_bytes() {
        assert!(is_json_bytes(b"[]"));
        assert!(!is_json_bytes(b"plain text"));
    }

    #[test]
    fn test_extension() {
        assert_eq!(InputFormat::Json.extension(), "json");
        assert_eq!(InputFormat::Text.to_string(), "text");
    }
}
