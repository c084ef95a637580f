//! Markdown rendering for block documents.

use crate::error::Result;
use crate::model::{Block, BlockType, Document};
use crate::parser::{Line, Word};

use super::RenderOptions;

/// Shallowest heading level used for header blocks.
const BASE_HEADING_LEVEL: usize = 2;

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Markdown renderer.
///
/// Header blocks become `##` headings (deeper for dotted section numbers),
/// bulleted items become list items, and runs of consecutive table rows
/// become one pipe table.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &Document) -> Result<String> {
        let mut output = String::new();
        let mut table: Vec<&Block> = Vec::new();

        let selected = doc.blocks.iter().filter(|b| {
            !b.is_empty() && self.options.page_selection.includes_index(b.page_idx)
        });
        for block in selected {
            if block.block_type == BlockType::TableRow {
                table.push(block);
                continue;
            }
            self.flush_table(&mut output, &mut table);
            self.render_block(&mut output, block);
        }
        self.flush_table(&mut output, &mut table);

        Ok(output.trim().to_string())
    }

    fn render_block(&self, output: &mut String, block: &Block) {
        match block.block_type {
            BlockType::Header => {
                let level = self.heading_level(block);
                output.push_str(&"#".repeat(level));
                output.push(' ');
                output.push_str(&self.inline(&block.block_text));
            }
            BlockType::ListItem => {
                let item = Line::new(&block.block_text).line_without_number;
                output.push(self.options.list_marker);
                output.push(' ');
                output.push_str(&self.inline(&item));
            }
            BlockType::NumberedListItem | BlockType::Para | BlockType::TableRow => {
                output.push_str(&self.inline(&block.block_text));
            }
        }
        output.push_str("\n\n");
    }

    /// `##` for plain headers, one level deeper per dotted number part
    /// ("3.15 Vacancies" -> `###`), capped at `max_heading_level`.
    fn heading_level(&self, block: &Block) -> usize {
        let line = Line::new(&block.block_text);
        let depth = match (&line.start_number, line.integer_numbered_line) {
            (Some(number), true) => number.split('.').count(),
            _ => 1,
        };
        let max = usize::from(self.options.max_heading_level.clamp(1, 6));
        (BASE_HEADING_LEVEL + depth - 1).min(max)
    }

    fn flush_table(&self, output: &mut String, rows: &mut Vec<&Block>) {
        if rows.is_empty() {
            return;
        }
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                split_cells(&row.block_text)
                    .iter()
                    .map(|cell| self.inline(cell))
                    .collect()
            })
            .collect();
        let col_count = cells.iter().map(Vec::len).max().unwrap_or(0);

        for (i, row) in cells.iter().enumerate() {
            output.push('|');
            for col in 0..col_count {
                let cell = row.get(col).map(String::as_str).unwrap_or("");
                output.push_str(&format!(" {} |", cell));
            }
            output.push('\n');

            if i == 0 {
                output.push('|');
                output.push_str(&" --- |".repeat(col_count));
                output.push('\n');
            }
        }
        output.push('\n');
        rows.clear();
    }

    fn inline(&self, text: &str) -> String {
        let text = self.options.apply(text);
        if self.options.escape_special_chars {
            escape_markdown(&text)
        } else {
            text
        }
    }
}

/// Split a table row into cells.
///
/// Runs of two or more spaces separate cells when present. Otherwise each
/// numeric token is its own cell and the words between them form one cell.
fn split_cells(text: &str) -> Vec<String> {
    let gapped: Vec<&str> = text
        .split("  ")
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    if gapped.len() > 1 {
        return gapped.into_iter().map(str::to_string).collect();
    }

    let mut cells = Vec::new();
    let mut label: Vec<&str> = Vec::new();
    for token in text.split_whitespace() {
        if Word::new(token).is_numeric() {
            if !label.is_empty() {
                cells.push(label.join(" "));
                label.clear();
            }
            cells.push(token.to_string());
        } else {
            label.push(token);
        }
    }
    if !label.is_empty() {
        cells.push(label.join(" "));
    }
    cells
}

/// Escape special Markdown characters.
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
