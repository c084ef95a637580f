//! Document model types for classified line content.
//!
//! Input side: [`LineInput`] records grouped into [`Region`]s. Output side:
//! typed [`Block`]s collected into a [`Document`]. All types are serde
//! serializable so they can be read from and written to JSON.

mod block;
mod document;
mod input;

pub use block::{Block, BlockType};
pub use document::Document;
pub use input::{BBox, LineInput, Region};
