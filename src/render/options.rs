//! Rendering options and configuration.

use std::ops::RangeInclusive;

use crate::parser::{formatter, Line};

/// Options for rendering a block document.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Collapse letter-spaced words ("E x e c u t i v e")
    pub fix_spacing: bool,

    /// Repair irregular capitalization ("GoAT" -> "Goat")
    pub fix_case: bool,

    /// Prefix each block with the text of its header block (text output)
    pub include_header_context: bool,

    /// Apply Unicode NFKC normalization
    pub normalize_unicode: bool,

    /// Escape special Markdown characters
    pub escape_special_chars: bool,

    /// Character to use for unordered list markers
    pub list_marker: char,

    /// Deepest heading level emitted for dotted section numbers (1-6)
    pub max_heading_level: u8,

    /// Which pages to render
    pub page_selection: PageSelection,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable letter-spacing repair.
    pub fn with_fix_spacing(mut self, fix: bool) -> Self {
        self.fix_spacing = fix;
        self
    }

    /// Enable or disable capitalization repair.
    pub fn with_fix_case(mut self, fix: bool) -> Self {
        self.fix_case = fix;
        self
    }

    /// Enable or disable header context in text output.
    pub fn with_header_context(mut self, include: bool) -> Self {
        self.include_header_context = include;
        self
    }

    /// Enable or disable Unicode normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.page_selection = selection;
        self
    }

    /// Render raw block text with no repairs at all.
    pub fn raw(mut self) -> Self {
        self.fix_spacing = false;
        self.fix_case = false;
        self.normalize_unicode = false;
        self
    }

    /// Apply the enabled text repairs to one piece of block text.
    pub fn apply(&self, text: &str) -> String {
        // Despacing reads the double-space word gaps, so it runs before
        // normalization collapses them.
        let mut out = if self.fix_spacing && Line::new(text).has_spaced_characters {
            formatter::despace(text)
        } else {
            text.to_string()
        };
        if self.normalize_unicode {
            out = formatter::normalize(&out);
        }
        if self.fix_case {
            out = formatter::fix_line_case(&out);
        }
        out
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fix_spacing: true,
            fix_case: false,
            include_header_context: false,
            normalize_unicode: true,
            escape_special_chars: true,
            list_marker: '-',
            max_heading_level: 4,
            page_selection: PageSelection::All,
        }
    }
}

/// Page selection for rendering.
///
/// Page numbers are 1-indexed; a block on `page_idx` 0 is page 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Render all pages
    #[default]
    All,
    /// Render a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<usize>),
    /// Render specific pages (1-indexed)
    Pages(Vec<usize>),
}

impl PageSelection {
    /// Check if a 1-indexed page number should be included.
    pub fn includes(&self, page: usize) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Check if a 0-indexed `page_idx` should be included.
    pub fn includes_index(&self, page_idx: usize) -> bool {
        self.includes(page_idx + 1)
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let start: usize = start.trim().parse().map_err(|_| "Invalid start page")?;
                let end: usize = end.trim().parse().map_err(|_| "Invalid end page")?;
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let start: usize = start.trim().parse().map_err(|_| "Invalid page number")?;
                let end: usize = end.trim().parse().map_err(|_| "Invalid page number")?;
                pages.extend(start..=end);
            } else {
                pages.push(part.parse().map_err(|_| "Invalid page number")?);
            }
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}
