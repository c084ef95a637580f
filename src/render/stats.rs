//! Statistics over a built block document.

use std::collections::BTreeSet;

use crate::model::{BlockType, Document};
use serde::{Deserialize, Serialize};

/// Statistics collected from a block document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of distinct pages with at least one block
    pub page_count: usize,

    /// Number of regions the document was built from
    pub region_count: usize,

    /// Number of raw lines consumed
    pub line_count: usize,

    /// Total number of blocks
    pub block_count: usize,

    /// Number of header blocks
    pub header_count: usize,

    /// Number of paragraph blocks (empty blocks excluded)
    pub para_count: usize,

    /// Number of table row blocks
    pub table_row_count: usize,

    /// Number of numbered list item blocks
    pub numbered_item_count: usize,

    /// Number of bulleted list item blocks
    pub list_item_count: usize,

    /// Number of blocks built from blank lines
    pub empty_block_count: usize,

    /// Number of blocks that merged two or more lines
    pub merged_block_count: usize,

    /// Total number of sentences
    pub sentence_count: usize,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: usize,

    /// Character count (excluding whitespace)
    pub char_count: usize,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics from a document.
    pub fn from_document(doc: &Document) -> Self {
        let mut stats = Self {
            region_count: doc.region_count,
            line_count: doc.line_count,
            block_count: doc.blocks.len(),
            ..Self::default()
        };
        let mut pages = BTreeSet::new();

        for block in &doc.blocks {
            pages.insert(block.page_idx);
            if block.is_empty() {
                stats.empty_block_count += 1;
                continue;
            }
            match block.block_type {
                BlockType::Header => stats.header_count += 1,
                BlockType::Para => stats.para_count += 1,
                BlockType::TableRow => stats.table_row_count += 1,
                BlockType::NumberedListItem => stats.numbered_item_count += 1,
                BlockType::ListItem => stats.list_item_count += 1,
            }
            if block.lines.len() > 1 {
                stats.merged_block_count += 1;
            }
            stats.sentence_count += block.block_sents.len();
            stats.count_text(&block.block_text);
        }

        stats.page_count = pages.len();
        stats
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count();
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count();
    }

    /// Merge another stats instance into this one.
    ///
    /// Page counts are summed, so merging stats of different files counts
    /// each file's pages separately.
    pub fn merge(&mut self, other: &ExtractionStats) {
        self.page_count += other.page_count;
        self.region_count += other.region_count;
        self.line_count += other.line_count;
        self.block_count += other.block_count;
        self.header_count += other.header_count;
        self.para_count += other.para_count;
        self.table_row_count += other.table_row_count;
        self.numbered_item_count += other.numbered_item_count;
        self.list_item_count += other.list_item_count;
        self.empty_block_count += other.empty_block_count;
        self.merged_block_count += other.merged_block_count;
        self.sentence_count += other.sentence_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
