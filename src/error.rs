//! Error types for unlines library.
//!
//! Line classification and block building never fail; these errors only
//! come from the edges: reading input, decoding line records and rendering.

use std::io;
use thiserror::Error;

/// Result type alias for unlines operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading or rendering documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is neither UTF-8 text nor JSON line records.
    #[error("Unknown input format")]
    UnknownFormat,

    /// The input was recognised but its content is unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error decoding or encoding JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No registered source handles the given extension.
    #[error("No source registered for extension: {0}")]
    UnsupportedExtension(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
