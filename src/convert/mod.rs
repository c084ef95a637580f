//! Line sources and the registry that picks one per input file.
//!
//! A [`LineSource`] turns the bytes of one input format into regions of
//! [`LineInput`](crate::model::LineInput)s. The [`SourceRegistry`] maps file
//! extensions to sources.

mod json;
mod text;

pub use json::JsonSource;
pub use text::TextSource;

use crate::detect::detect_format_from_bytes;
use crate::error::{Error, Result};
use crate::model::Region;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Trait for line sources.
///
/// Implement this trait to read lines from a new input format.
pub trait LineSource: Send + Sync {
    /// Get the supported file extensions for this source.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["json"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this source.
    fn name(&self) -> &str;

    /// Read regions from raw bytes.
    fn read_bytes(&self, bytes: &[u8]) -> Result<Vec<Region>>;

    /// Read regions from a file.
    fn read_path(&self, path: &Path) -> Result<Vec<Region>> {
        let bytes = std::fs::read(path)?;
        self.read_bytes(&bytes)
    }

    /// Check if this source supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry of line sources.
///
/// The registry maps file extensions to sources and provides convenient
/// methods for reading and converting inputs.
pub struct SourceRegistry {
    sources: HashMap<String, Arc<dyn LineSource>>,
    by_name: HashMap<String, Arc<dyn LineSource>>,
}

impl SourceRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the text and JSON sources.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(TextSource::new()));
        registry.register(Arc::new(JsonSource::new()));
        registry
    }

    /// Register a source for all its supported extensions.
    pub fn register(&mut self, source: Arc<dyn LineSource>) {
        for ext in source.supported_extensions() {
            self.sources.insert(ext.to_lowercase(), source.clone());
        }
        self.by_name.insert(source.name().to_lowercase(), source);
    }

    /// Get a source by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn LineSource>> {
        self.sources.get(&ext.to_lowercase()).cloned()
    }

    /// Get a source by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn LineSource>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.sources.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.sources.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Read the regions of a file.
    ///
    /// The extension picks the source. A file without an extension is
    /// sniffed instead.
    pub fn read_path(&self, path: &Path) -> Result<Vec<Region>> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => {
                let source = self
                    .get_by_extension(ext)
                    .ok_or_else(|| Error::UnsupportedExtension(ext.to_string()))?;
                log::debug!("Reading {} with the {} source", path.display(), source.name());
                source.read_path(path)
            }
            None => {
                let bytes = std::fs::read(path)?;
                self.read_detected(&bytes)
            }
        }
    }

    /// Read bytes using the given extension to choose the source.
    pub fn read_bytes(&self, bytes: &[u8], ext: &str) -> Result<Vec<Region>> {
        let source = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::UnsupportedExtension(ext.to_string()))?;
        source.read_bytes(bytes)
    }

    /// Read bytes of unknown format, choosing the source by content.
    pub fn read_detected(&self, bytes: &[u8]) -> Result<Vec<Region>> {
        let format = detect_format_from_bytes(bytes)?;
        log::debug!("Detected {} input", format);
        self.read_bytes(bytes, format.extension())
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_with_defaults() {
        let registry = SourceRegistry::with_defaults();
        assert!(registry.supports("txt"));
        assert!(registry.supports("JSON"));
        assert!(!registry.supports("pdf"));
        assert_eq!(registry.supported_extensions(), vec!["json", "text", "txt"]);
    }

    #[test]
    fn test_registry_get_by_extension() {
        let registry = SourceRegistry::with_defaults();
        let source = registry.get_by_extension("json");
        assert_eq!(source.map(|s| s.name().to_string()), Some("json".to_string()));
        assert!(registry.get_by_name("text").is_some());
    }

    #[test]
    fn test_unsupported_extension() {
        let registry = SourceRegistry::with_defaults();
        let result = registry.read_bytes(b"", "docx");
        assert!(matches!(result, Err(Error::UnsupportedExtension(ext)) if ext == "docx"));
    }

    #[test]
    fn test_read_detected() {
        let registry = SourceRegistry::with_defaults();
        let regions = registry.read_detected(b"[[\"a\", \"b\"], [\"c\"]]").unwrap();
        assert_eq!(regions.len(), 2);
        let regions = registry.read_detected(b"a\nb").unwrap();
        assert_eq!(regions.len(), 1);
    }
}
