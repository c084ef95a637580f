//! Line classification and block building.
//!
//! Data flows one way: raw token to [`Word`], raw line to [`Line`], runs of
//! lines to [`crate::model::Block`]s via [`BlockBuilder`].

mod builder;
pub mod formatter;
pub mod lexicon;
mod line;
mod options;
mod sentence;
mod word;

pub use builder::{assign_headers, BlockBuilder};
pub(crate) use builder::assemble_document;
pub use line::{Line, LineType};
pub use options::{BuildOptions, DEFAULT_CACHE_CAPACITY};
pub use sentence::split_sentences;
pub use word::Word;
