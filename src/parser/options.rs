//! Block building options and configuration.

/// Default number of regions remembered by [`crate::cache::CachedBuilder`].
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Options for building blocks from regions of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Build regions on the rayon thread pool
    pub parallel: bool,

    /// Omit blocks made from empty or whitespace-only lines
    pub drop_empty_blocks: bool,

    /// Regions kept by the region cache (0 disables caching)
    pub cache_capacity: usize,
}

impl BuildOptions {
    /// Create new build options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable dropping of empty blocks.
    pub fn with_drop_empty_blocks(mut self, drop: bool) -> Self {
        self.drop_empty_blocks = drop;
        self
    }

    /// Drop blocks made from blank lines.
    pub fn drop_empty(mut self) -> Self {
        self.drop_empty_blocks = true;
        self
    }

    /// Set the region cache capacity.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Disable the region cache.
    pub fn without_cache(mut self) -> Self {
        self.cache_capacity = 0;
        self
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            drop_empty_blocks: false,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}
