//! Block building: consecutive classified lines to typed blocks.
//!
//! Each region is scanned once with a single pending accumulator. A line
//! merges into the pending block when the previous line left its sentence
//! open (`incomplete_line` / `continuing_line`) and the line itself is not a
//! header or a table row; anything else flushes the accumulator and starts a
//! new block. Header references are assigned afterwards in one forward pass
//! over the finished blocks.

use rayon::prelude::*;

use super::line::{Line, LineType};
use super::options::BuildOptions;
use super::sentence::split_sentences;
use crate::model::{BBox, Block, BlockType, Document, LineInput, Region};

/// Builds blocks from regions of raw lines.
#[derive(Debug, Clone, Default)]
pub struct BlockBuilder {
    options: BuildOptions,
}

impl BlockBuilder {
    /// Create a builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with the given options.
    pub fn with_options(options: BuildOptions) -> Self {
        Self { options }
    }

    /// The options this builder was created with.
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build the blocks of one region.
    ///
    /// Block indices start at 0 and header references point inside the
    /// region.
    pub fn build_region(&self, region: &Region) -> Vec<Block> {
        let mut blocks = self.region_blocks(region);
        reindex(&mut blocks);
        assign_headers(&mut blocks);
        blocks
    }

    /// Build every region and join the results into one document.
    ///
    /// Regions are independent, so with `parallel` set they are built on the
    /// rayon pool; the output is identical either way.
    pub fn build_document(&self, regions: &[Region]) -> Document {
        let per_region: Vec<Vec<Block>> = if self.options.parallel {
            regions.par_iter().map(|r| self.region_blocks(r)).collect()
        } else {
            regions.iter().map(|r| self.region_blocks(r)).collect()
        };
        let line_count = regions.iter().map(Region::len).sum();
        assemble_document(per_region, line_count)
    }

    /// Blocks of one region without indices or header references.
    pub(crate) fn region_blocks(&self, region: &Region) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut pending: Option<Pending> = None;

        for input in &region.lines {
            let line = Line::new(&input.text);
            let bbox = sanitize_bbox(input);

            pending = match pending.take() {
                None => Some(Pending::start(line, input, bbox)),
                Some(mut acc) => {
                    if acc.accepts(&line, input) {
                        acc.merge(line, input, bbox);
                        Some(acc)
                    } else {
                        blocks.push(acc.finish());
                        Some(Pending::start(line, input, bbox))
                    }
                }
            };
        }
        if let Some(acc) = pending {
            blocks.push(acc.finish());
        }

        if self.options.drop_empty_blocks {
            blocks.retain(|b| !b.is_empty());
        }
        log::trace!(
            "Built {} blocks from {} lines",
            blocks.len(),
            region.lines.len()
        );
        blocks
    }
}

/// Concatenate per-region blocks, number them and link headers.
pub(crate) fn assemble_document(per_region: Vec<Vec<Block>>, line_count: usize) -> Document {
    let region_count = per_region.len();
    let mut blocks: Vec<Block> = per_region.into_iter().flatten().collect();
    reindex(&mut blocks);
    assign_headers(&mut blocks);
    log::debug!(
        "Document: {} regions, {} lines, {} blocks",
        region_count,
        line_count,
        blocks.len()
    );
    Document {
        blocks,
        region_count,
        line_count,
    }
}

/// Point every non-header block at the closest preceding header block.
///
/// Header blocks themselves carry no reference. Blocks before the first
/// header keep `None`.
pub fn assign_headers(blocks: &mut [Block]) {
    let mut current: Option<(usize, String)> = None;
    for block in blocks.iter_mut() {
        if block.is_header() {
            block.header_block_idx = None;
            block.header_text = None;
            current = Some((block.block_idx, block.block_text.clone()));
        } else {
            block.header_block_idx = current.as_ref().map(|(idx, _)| *idx);
            block.header_text = current.as_ref().map(|(_, text)| text.clone());
        }
    }
}

fn reindex(blocks: &mut [Block]) {
    for (idx, block) in blocks.iter_mut().enumerate() {
        block.block_idx = idx;
    }
}

fn sanitize_bbox(input: &LineInput) -> Option<BBox> {
    match input.bbox {
        Some(bbox) if !bbox.is_valid() => {
            log::debug!(
                "Dropping malformed bbox {:?} for line {:?}",
                bbox,
                input.text
            );
            None
        }
        other => other,
    }
}

/// The block under construction.
struct Pending {
    /// Flags of the most recently added line
    last: Line,
    /// Type of the first line
    seed_type: LineType,
    seed_bullet: bool,
    lines: Vec<String>,
    page_idx: usize,
    bbox: Option<BBox>,
    /// Lines were merged as wrapped table cells
    cell_merge: bool,
}

impl Pending {
    fn start(line: Line, input: &LineInput, bbox: Option<BBox>) -> Self {
        Self {
            seed_type: line.line_type,
            seed_bullet: line.bullet_line,
            lines: vec![line.text.clone()],
            page_idx: input.page_idx,
            bbox,
            cell_merge: false,
            last: line,
        }
    }

    /// Whether `line` continues this block.
    fn accepts(&self, line: &Line, input: &LineInput) -> bool {
        if line.is_empty() || self.last.is_empty() {
            return false;
        }
        if input.continues_cell && self.seed_type == LineType::TableRow && self.merged_as_cells() {
            return true;
        }
        if line.bullet_line {
            return false;
        }
        if line.line_type == LineType::Header || line.line_type == LineType::TableRow {
            return false;
        }
        self.last.incomplete_line || self.last.continuing_line
    }

    /// A table row only absorbs cell continuations until it absorbs prose.
    fn merged_as_cells(&self) -> bool {
        self.lines.len() == 1 || self.cell_merge
    }

    fn merge(&mut self, line: Line, input: &LineInput, bbox: Option<BBox>) {
        if input.continues_cell && self.seed_type == LineType::TableRow && self.merged_as_cells() {
            self.cell_merge = true;
        }
        self.bbox = match (self.bbox, bbox) {
            (Some(a), Some(b)) => Some(a.union(&b)),
            (a, b) => a.or(b),
        };
        self.lines.push(line.text.clone());
        self.last = line;
    }

    fn finish(self) -> Block {
        let block_type = if self.cell_merge {
            BlockType::TableRow
        } else if self.lines.len() > 1 {
            BlockType::Para
        } else if self.seed_bullet && self.seed_type == LineType::Para {
            BlockType::ListItem
        } else {
            BlockType::from(self.seed_type)
        };

        let block_text = self.lines.join(" ");
        let block_sents = match block_type {
            _ if block_text.is_empty() => Vec::new(),
            BlockType::Header | BlockType::TableRow => vec![block_text.clone()],
            _ => split_sentences(&block_text),
        };

        Block {
            block_idx: 0,
            block_text,
            block_sents,
            block_type,
            header_block_idx: None,
            header_text: None,
            lines: self.lines,
            page_idx: self.page_idx,
            bbox: self.bbox,
        }
    }
}
