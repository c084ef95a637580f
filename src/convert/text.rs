//! Plain text line source.

use crate::error::{Error, Result};
use crate::model::{LineInput, Region};

use super::LineSource;

/// Form feed: page break between regions.
const PAGE_BREAK: char = '\u{000C}';

/// Reads UTF-8 text: one line per line, form feed between regions.
///
/// Each form-feed separated segment becomes one region and its lines carry
/// the segment index as `page_idx`. Segments with no text are skipped but
/// still advance the page index.
#[derive(Debug, Clone, Default)]
pub struct TextSource {
    _private: (),
}

impl TextSource {
    /// Registry name of this source.
    pub const NAME: &'static str = "text";

    /// Create a new text source.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Split text into regions.
    pub fn read_str(&self, text: &str) -> Vec<Region> {
        let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
        text.split(PAGE_BREAK)
            .enumerate()
            .filter(|(_, segment)| !segment.trim().is_empty())
            .map(|(page_idx, segment)| {
                segment
                    .lines()
                    .map(|line| LineInput::new(line).with_page(page_idx))
                    .collect::<Vec<_>>()
                    .into()
            })
            .collect()
    }
}

impl LineSource for TextSource {
    fn supported_extensions(&self) -> &[&str] {
        &["txt", "text"]
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn read_bytes(&self, bytes: &[u8]) -> Result<Vec<Region>> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::InvalidInput(format!("text input is not UTF-8: {}", e)))?;
        Ok(self.read_str(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_source_extensions() {
        let source = TextSource::new();
        assert!(source.supports_extension("TXT"));
        assert!(source.supports_extension("text"));
        assert!(!source.supports_extension("json"));
        assert_eq!(source.name(), "text");
    }

    #[test]
    fn test_lines_and_pages() {
        let regions = TextSource::new().read_str("one\r\ntwo\n\u{000C}three\n");
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].lines[1].text, "two");
        assert_eq!(regions[1].lines[0].text, "three");
        assert_eq!(regions[1].lines[0].page_idx, 1);
    }

    #[test]
    fn test_blank_pages_keep_numbering() {
        let regions = TextSource::new().read_str("a\u{000C}  \n\u{000C}b\u{000C}");
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[1].lines[0].page_idx, 2);
    }

    #[test]
    fn test_bom_and_invalid_utf8() {
        let regions = TextSource::new().read_bytes(b"\xEF\xBB\xBFhello").unwrap();
        assert_eq!(regions[0].lines[0].text, "hello");
        let result = TextSource::new().read_bytes(b"\xff\xfe");
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
