//! Document-level types.

use serde::{Deserialize, Serialize};

use super::{Block, BlockType};

/// The ordered blocks built from every region of an input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Blocks in reading order
    pub blocks: Vec<Block>,

    /// Number of regions the blocks were built from
    pub region_count: usize,

    /// Number of raw lines consumed
    pub line_count: usize,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of blocks in the document.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get a block by index.
    pub fn get_block(&self, idx: usize) -> Option<&Block> {
        self.blocks.get(idx)
    }

    /// Iterate over header blocks.
    pub fn headers(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.is_header())
    }

    /// Blocks whose closest preceding header is `header_idx`.
    pub fn blocks_under(&self, header_idx: usize) -> impl Iterator<Item = &Block> {
        self.blocks
            .iter()
            .filter(move |b| b.header_block_idx == Some(header_idx))
    }

    /// Count blocks of the given type.
    pub fn count_of(&self, block_type: BlockType) -> usize {
        self.blocks
            .iter()
            .filter(|b| b.block_type == block_type)
            .count()
    }

    /// Get plain text content: block texts separated by blank lines.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .filter(|b| !b.is_empty())
            .map(|b| b.block_text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
