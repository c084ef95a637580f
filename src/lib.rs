//! # unlines
//!
//! Line classification and block building for flattened document text.
//!
//! Layout extractors (PDF, HTML, OCR) deliver documents as runs of raw
//! lines. This library classifies every line (header, paragraph text, table
//! row, numbered list item), merges lines that continue one another into
//! logical blocks, and links every block to its closest preceding header.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unlines::{parse_file, render};
//!
//! fn main() -> unlines::Result<()> {
//!     // Read lines and build blocks
//!     let doc = parse_file("lines.txt")?;
//!
//!     // Convert to Markdown
//!     let options = render::RenderOptions::default();
//!     let markdown = render::to_markdown(&doc, &options)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Token classification**: numbers, currency, percentages, years, ranges, dates
//! - **Line classification**: headers, table rows, numbered and bulleted items
//! - **Block building**: continuation-aware merging with header back-references
//! - **Typography repair**: letter-spaced words and broken capitalization
//! - **Parallel processing**: Uses Rayon across layout regions
//! - **Region cache**: LRU memoization of repeated regions

pub mod cache;
pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use cache::{CachedBuilder, LruCache};
pub use convert::{JsonSource, LineSource, SourceRegistry, TextSource};
pub use detect::{detect_format_from_bytes, detect_format_from_path, InputFormat};
pub use error::{Error, Result};
pub use model::{BBox, Block, BlockType, Document, LineInput, Region};
pub use parser::{BlockBuilder, BuildOptions, Line, LineType, Word};
pub use render::{ExtractionStats, JsonFormat, PageSelection, RenderOptions};

use std::path::Path;

/// Classify a single line.
///
/// # Example
///
/// ```
/// use unlines::{classify_line, LineType};
///
/// let line = classify_line("3.15 Vacancies");
/// assert_eq!(line.line_type, LineType::Header);
/// assert_eq!(line.start_number.as_deref(), Some("3.15"));
/// ```
pub fn classify_line(text: &str) -> Line {
    Line::new(text)
}

/// Build blocks from the lines of a single region.
///
/// # Example
///
/// ```
/// use unlines::parse_lines;
///
/// let blocks = parse_lines(["line one ", "line 2"]);
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].block_text, "line one line 2");
/// ```
pub fn parse_lines<I, S>(lines: I) -> Vec<Block>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    BlockBuilder::new().build_region(&Region::from_texts(lines))
}

/// Build a document from several regions.
pub fn parse_regions(regions: &[Region]) -> Document {
    BlockBuilder::new().build_document(regions)
}

/// Build a document from several regions with custom options.
pub fn parse_regions_with_options(regions: &[Region], options: BuildOptions) -> Document {
    BlockBuilder::with_options(options).build_document(regions)
}

/// Read a text or JSON line file and build its blocks.
///
/// # Arguments
///
/// * `path` - Path to a `.txt`/`.text` or `.json` file, or an
///   extension-less file whose format is sniffed
///
/// # Example
///
/// ```no_run
/// use unlines::parse_file;
///
/// let doc = parse_file("lines.json").unwrap();
/// println!("Blocks: {}", doc.block_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    parse_file_with_options(path, BuildOptions::default())
}

/// Read a line file and build its blocks with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: BuildOptions) -> Result<Document> {
    let regions = SourceRegistry::with_defaults().read_path(path.as_ref())?;
    Ok(BlockBuilder::with_options(options).build_document(&regions))
}

/// Read line data of unknown format from bytes and build its blocks.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    let regions = SourceRegistry::with_defaults().read_detected(data)?;
    Ok(BlockBuilder::new().build_document(&regions))
}

/// Convert a line file to Markdown.
///
/// # Example
///
/// ```no_run
/// use unlines::to_markdown;
///
/// let markdown = to_markdown("lines.txt").unwrap();
/// std::fs::write("output.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_markdown(&doc, &RenderOptions::default())
}

/// Convert a line file to plain text.
pub fn to_text<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_text(&doc, options)
}

/// Convert a line file to block JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for building and rendering block documents.
///
/// # Example
///
/// ```no_run
/// use unlines::Unlines;
///
/// let markdown = Unlines::new()
///     .drop_empty_blocks()
///     .with_fix_case()
///     .sequential()
///     .parse("lines.txt")?
///     .to_markdown()?;
/// # Ok::<(), unlines::Error>(())
/// ```
pub struct Unlines {
    build_options: BuildOptions,
    render_options: RenderOptions,
}

impl Unlines {
    /// Create a new Unlines builder.
    pub fn new() -> Self {
        Self {
            build_options: BuildOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.build_options = self.build_options.sequential();
        self
    }

    /// Drop blocks built from blank lines.
    pub fn drop_empty_blocks(mut self) -> Self {
        self.build_options = self.build_options.drop_empty();
        self
    }

    /// Repair irregular capitalization in rendered output.
    pub fn with_fix_case(mut self) -> Self {
        self.render_options = self.render_options.with_fix_case(true);
        self
    }

    /// Prefix rendered text blocks with their header.
    pub fn with_header_context(mut self) -> Self {
        self.render_options = self.render_options.with_header_context(true);
        self
    }

    /// Render raw block text without repairs.
    pub fn raw(mut self) -> Self {
        self.render_options = self.render_options.raw();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.render_options = self.render_options.with_pages(pages);
        self
    }

    /// Read a line file and build its blocks.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UnlinesResult> {
        let regions = SourceRegistry::with_defaults().read_path(path.as_ref())?;
        Ok(self.build(&regions))
    }

    /// Read line data of unknown format from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<UnlinesResult> {
        let regions = SourceRegistry::with_defaults().read_detected(data)?;
        Ok(self.build(&regions))
    }

    /// Build blocks from regions already in memory.
    pub fn build(self, regions: &[Region]) -> UnlinesResult {
        let document = BlockBuilder::with_options(self.build_options).build_document(regions);
        UnlinesResult {
            document,
            render_options: self.render_options,
        }
    }
}

impl Default for Unlines {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of building a block document.
pub struct UnlinesResult {
    /// The built document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl UnlinesResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get block texts without repairs.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Collect statistics.
    pub fn stats(&self) -> ExtractionStats {
        ExtractionStats::from_document(&self.document)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Convenience Function Tests ====================

    #[test]
    fn test_classify_line() {
        let line = classify_line("iv) Testing");
        assert!(line.roman_numbered_line);
        assert_eq!(line.line_without_number, "Testing");
    }

    #[test]
    fn test_parse_lines_merges_and_splits() {
        let blocks = parse_lines(["line one ", "line 2"]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].block_text, "line one line 2");

        let blocks = parse_lines(["Name Value", "Ambika 20"]);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].block_text, "Name Value");
        assert_eq!(blocks[1].block_text, "Ambika 20");
    }

    #[test]
    fn test_parse_regions() {
        let doc = parse_regions(&[
            Region::from_texts(["Risk Factors"]),
            Region::from_texts(["Markets fell."]),
        ]);
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.blocks[1].header_text.as_deref(), Some("Risk Factors"));
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_parse_bytes_empty_data() {
        let doc = parse_bytes(b"").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_parse_bytes_binary_data() {
        let data = [0xFF, 0xFE, 0x00, 0x01, 0x02, 0x03];
        assert!(matches!(parse_bytes(&data), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_parse_bytes_json() {
        let doc = parse_bytes(br#"[{"text": "Risk Factors"}, {"text": "Markets fell."}]"#).unwrap();
        assert_eq!(doc.block_count(), 2);
    }

    #[test]
    fn test_parse_file_missing() {
        assert!(matches!(
            parse_file("does/not/exist.txt"),
            Err(Error::Io(_))
        ));
        assert!(matches!(
            parse_file("lines.docx"),
            Err(Error::UnsupportedExtension(_))
        ));
    }

    // ==================== Builder Pattern Tests ====================

    #[test]
    fn test_unlines_builder_default() {
        let builder = Unlines::default();
        assert!(builder.build_options.parallel);
        assert!(!builder.render_options.fix_case);
    }

    #[test]
    fn test_unlines_builder_chained() {
        let builder = Unlines::new()
            .sequential()
            .drop_empty_blocks()
            .with_fix_case()
            .with_header_context()
            .with_pages(PageSelection::Range(1..=2));

        assert!(!builder.build_options.parallel);
        assert!(builder.build_options.drop_empty_blocks);
        assert!(builder.render_options.fix_case);
        assert!(builder.render_options.include_header_context);
        assert_eq!(builder.render_options.page_selection, PageSelection::Range(1..=2));
    }

    #[test]
    fn test_unlines_build_and_render() {
        let result = Unlines::new()
            .drop_empty_blocks()
            .with_header_context()
            .build(&[Region::from_texts(["Risk Factors", "", "Markets fell."])]);

        assert_eq!(result.document().block_count(), 2);
        assert_eq!(
            result.to_text().unwrap(),
            "Risk Factors\n\n[Risk Factors] Markets fell."
        );
        assert_eq!(result.stats().header_count, 1);
        assert!(result.to_json(JsonFormat::Compact).unwrap().starts_with('{'));
    }

    #[test]
    fn test_unlines_parse_invalid_bytes() {
        let result = Unlines::new().parse_bytes(b"\xff\xfe\x00");
        assert!(result.is_err());
    }
}
