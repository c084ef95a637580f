//! Rendering module for converting block documents to output formats.

mod json;
mod markdown;
mod options;
mod stats;
mod text;

pub use json::{blocks_to_json, to_json, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::{PageSelection, RenderOptions};
pub use stats::ExtractionStats;
pub use text::to_text;
