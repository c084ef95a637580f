//! Output-side block types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::BBox;
use crate::parser::LineType;

/// Classification of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    /// A heading
    Header,
    /// A paragraph of running text
    Para,
    /// A row of a table
    TableRow,
    /// An item of a numbered list
    NumberedListItem,
    /// An item of a bulleted list
    ListItem,
}

impl BlockType {
    /// The snake_case name used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Header => "header",
            BlockType::Para => "para",
            BlockType::TableRow => "table_row",
            BlockType::NumberedListItem => "numbered_list_item",
            BlockType::ListItem => "list_item",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LineType> for BlockType {
    fn from(line_type: LineType) -> Self {
        match line_type {
            LineType::Header => BlockType::Header,
            LineType::Para => BlockType::Para,
            LineType::TableRow => BlockType::TableRow,
            LineType::NumberedListItem => BlockType::NumberedListItem,
        }
    }
}

/// A logical unit of content built from one or more consecutive lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Position of the block in its document
    pub block_idx: usize,

    /// Trimmed constituent lines joined by single spaces
    pub block_text: String,

    /// Sentences of the block text
    pub block_sents: Vec<String>,

    /// Block classification
    pub block_type: BlockType,

    /// Index of the closest preceding header block
    #[serde(default)]
    pub header_block_idx: Option<usize>,

    /// Text of that header block
    #[serde(default)]
    pub header_text: Option<String>,

    /// Trimmed source lines, in order
    #[serde(default)]
    pub lines: Vec<String>,

    /// Page of the first constituent line
    #[serde(default)]
    pub page_idx: usize,

    /// Union of the constituent line boxes
    #[serde(default)]
    pub bbox: Option<BBox>,
}

impl Block {
    /// Whether the block is a heading.
    pub fn is_header(&self) -> bool {
        self.block_type == BlockType::Header
    }

    /// Whether the block has no text.
    pub fn is_empty(&self) -> bool {
        self.block_text.is_empty()
    }

    /// Number of source lines merged into the block.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
