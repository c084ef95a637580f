//! Bounded least-recently-used cache.
//!
//! [`LruCache`] keeps its entries in a fixed slot arena threaded by an
//! intrusive doubly linked list (most recent at the head) plus a hash index
//! from key to slot, so lookups, inserts and evictions are all O(1).
//!
//! [`CachedBuilder`] uses it to memoize region builds: documents produced by
//! the same extractor repeat page headers, footers and boilerplate regions.

use std::borrow::Borrow;
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

use rayon::prelude::*;

use crate::model::{Block, Document, Region};
use crate::parser::{assemble_document, BlockBuilder, BuildOptions, DEFAULT_CACHE_CAPACITY};

#[derive(Debug)]
struct Slot<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Fixed-capacity cache evicting the least recently used entry.
#[derive(Debug)]
pub struct LruCache<K, V> {
    slots: Vec<Slot<K, V>>,
    index: HashMap<K, usize>,
    /// Most recently used slot
    head: Option<usize>,
    /// Least recently used slot
    tail: Option<usize>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl<K: Hash + Eq + Clone, V> Default for LruCache<K, V> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl<K: Hash + Eq + Clone, V> LruCache<K, V> {
    /// Create a new cache with the specified capacity (at least 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            head: None,
            tail: None,
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a value and mark it most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.get(key).copied() {
            Some(slot) => {
                self.hits += 1;
                self.touch(slot);
                Some(&self.slots[slot].value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Look up a value without changing recency or statistics.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&slot| &self.slots[slot].value)
    }

    /// Insert or update an entry and mark it most recently used.
    ///
    /// Returns the entry evicted to make room, if any. Updating an existing
    /// key never evicts.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&slot) = self.index.get(&key) {
            self.slots[slot].value = value;
            self.touch(slot);
            return None;
        }

        if self.slots.len() < self.capacity {
            let slot = self.slots.len();
            self.slots.push(Slot {
                key: key.clone(),
                value,
                prev: None,
                next: None,
            });
            self.index.insert(key, slot);
            self.push_front(slot);
            return None;
        }

        // Full: recycle the least recently used slot.
        let slot = self.tail?;
        self.unlink(slot);
        let old_key = std::mem::replace(&mut self.slots[slot].key, key.clone());
        let old_value = std::mem::replace(&mut self.slots[slot].value, value);
        self.index.remove(&old_key);
        self.index.insert(key, slot);
        self.push_front(slot);
        Some((old_key, old_value))
    }

    /// Check whether a key is cached, without changing recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let slot = cursor?;
            cursor = self.slots[slot].next;
            Some(&self.slots[slot].key)
        })
    }

    /// Clear all cached entries. Statistics are kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
        self.head = None;
        self.tail = None;
    }

    /// Get the number of cached entries
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Get the cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get cache hit count
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Get cache miss count
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Get cache hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    fn touch(&mut self, slot: usize) {
        if self.head != Some(slot) {
            self.unlink(slot);
            self.push_front(slot);
        }
    }

    fn unlink(&mut self, slot: usize) {
        let (prev, next) = (self.slots[slot].prev, self.slots[slot].next);
        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.slots[n].prev = prev,
            None => self.tail = prev,
        }
        self.slots[slot].prev = None;
        self.slots[slot].next = None;
    }

    fn push_front(&mut self, slot: usize) {
        self.slots[slot].prev = None;
        self.slots[slot].next = self.head;
        if let Some(h) = self.head {
            self.slots[h].prev = Some(slot);
        }
        self.head = Some(slot);
        if self.tail.is_none() {
            self.tail = Some(slot);
        }
    }
}

/// Content hash of a region: every field of every line.
pub fn region_key(region: &Region) -> u64 {
    let mut hasher = DefaultHasher::new();
    region.lines.len().hash(&mut hasher);
    for line in &region.lines {
        line.text.hash(&mut hasher);
        line.page_idx.hash(&mut hasher);
        line.continues_cell.hash(&mut hasher);
        line.bbox
            .map(|b| [b.x0.to_bits(), b.y0.to_bits(), b.x1.to_bits(), b.y1.to_bits()])
            .hash(&mut hasher);
    }
    hasher.finish()
}

/// A [`BlockBuilder`] that remembers the blocks of recently built regions.
#[derive(Debug)]
pub struct CachedBuilder {
    builder: BlockBuilder,
    cache: Option<LruCache<u64, Vec<Block>>>,
}

impl CachedBuilder {
    /// Create a cached builder; `cache_capacity` 0 disables the cache.
    pub fn new(options: BuildOptions) -> Self {
        let cache = (options.cache_capacity > 0).then(|| LruCache::new(options.cache_capacity));
        Self {
            builder: BlockBuilder::with_options(options),
            cache,
        }
    }

    /// The region cache, if enabled.
    pub fn cache(&self) -> Option<&LruCache<u64, Vec<Block>>> {
        self.cache.as_ref()
    }

    /// Build the blocks of one region, reusing a cached result.
    pub fn build_region(&mut self, region: &Region) -> Vec<Block> {
        let blocks = self.region_blocks(region);
        let mut doc = assemble_document(vec![blocks], region.len());
        std::mem::take(&mut doc.blocks)
    }

    /// Build a document, building only regions missing from the cache.
    pub fn build_document(&mut self, regions: &[Region]) -> Document {
        let Some(cache) = self.cache.as_mut() else {
            return self.builder.build_document(regions);
        };

        let keys: Vec<u64> = regions.iter().map(region_key).collect();
        let mut per_region: Vec<Option<Vec<Block>>> =
            keys.iter().map(|key| cache.get(key).cloned()).collect();

        // Identical regions within one call are built once
        let mut seen = HashSet::new();
        let missing: Vec<usize> = (0..regions.len())
            .filter(|&i| per_region[i].is_none() && seen.insert(keys[i]))
            .collect();
        let builder = &self.builder;
        let built: Vec<(usize, Vec<Block>)> = if builder.options().parallel {
            missing
                .par_iter()
                .map(|&i| (i, builder.region_blocks(&regions[i])))
                .collect()
        } else {
            missing
                .iter()
                .map(|&i| (i, builder.region_blocks(&regions[i])))
                .collect()
        };
        log::debug!(
            "Region cache: {} of {} regions rebuilt",
            built.len(),
            regions.len()
        );

        let mut fresh: HashMap<u64, Vec<Block>> = HashMap::with_capacity(built.len());
        for (i, blocks) in built {
            cache.put(keys[i], blocks.clone());
            fresh.insert(keys[i], blocks);
        }
        for (slot, key) in per_region.iter_mut().zip(&keys) {
            if slot.is_none() {
                *slot = fresh.get(key).cloned();
            }
        }

        let line_count = regions.iter().map(Region::len).sum();
        assemble_document(per_region.into_iter().flatten().collect(), line_count)
    }

    fn region_blocks(&mut self, region: &Region) -> Vec<Block> {
        let Some(cache) = self.cache.as_mut() else {
            return self.builder.region_blocks(region);
        };
        let key = region_key(region);
        if let Some(blocks) = cache.get(&key) {
            return blocks.clone();
        }
        let blocks = self.builder.region_blocks(region);
        cache.put(key, blocks.clone());
        blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_basic() {
        let mut cache = LruCache::new(2);
        assert!(cache.put("a", 1).is_none());
        assert!(cache.put("b", 2).is_none());
        assert_eq!(cache.get("a"), Some(&1));
        assert_eq!(cache.len(), 2);
        assert!(cache.contains("b"));
    }

    #[test]
    fn test_eviction_order() {
        let mut cache = LruCache::new(3);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");
        // 1 becomes most recent, 2 is now the oldest
        cache.get(&1);
        assert_eq!(cache.put(4, "four"), Some((2, "two")));
        assert_eq!(cache.keys().copied().collect::<Vec<_>>(), vec![4, 1, 3]);
        assert_eq!(cache.put(5, "five"), Some((3, "three")));
        assert!(!cache.contains(&3));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_update_does_not_evict() {
        let mut cache = LruCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        assert!(cache.put("a", 10).is_none());
        assert_eq!(cache.peek("a"), Some(&10));
        assert_eq!(cache.put("c", 3), Some(("b", 2)));
    }

    #[test]
    fn test_peek_keeps_order() {
        let mut cache = LruCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.peek("a"), Some(&1));
        assert_eq!(cache.put("c", 3), Some(("a", 1)));
        assert_eq!(cache.hits() + cache.misses(), 0);
    }

    #[test]
    fn test_statistics_and_clear() {
        let mut cache: LruCache<String, u32> = LruCache::new(4);
        cache.put("x".to_string(), 1);
        assert!(cache.get("x").is_some());
        assert!(cache.get("y").is_none());
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
        assert!((cache.hit_rate() - 0.5).abs() < f64::EPSILON);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.keys().count(), 0);
        cache.put("z".to_string(), 2);
        assert_eq!(cache.get("z"), Some(&2));
    }

    #[test]
    fn test_minimum_capacity() {
        let mut cache = LruCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.put(1, 1);
        assert_eq!(cache.put(2, 2), Some((1, 1)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_region_key() {
        let a = Region::from_texts(["Risk Factors", "Markets fell."]);
        let b = Region::from_texts(["Risk Factors", "Markets fell."]);
        let c = Region::from_texts(["Risk Factors", "Markets rose."]);
        assert_eq!(region_key(&a), region_key(&b));
        assert_ne!(region_key(&a), region_key(&c));
    }

    #[test]
    fn test_cached_builder_matches_plain_builder() {
        let regions = vec![
            Region::from_texts(["Page Header", "The fund grew in", "the last year."]),
            Region::from_texts(["Page Header", "Rates rose."]),
            Region::from_texts(["Page Header", "The fund grew in", "the last year."]),
        ];
        let options = BuildOptions::new().with_cache_capacity(8);
        let mut cached = CachedBuilder::new(options.clone());

        let first = cached.build_document(&regions);
        let second = cached.build_document(&regions);
        let plain = BlockBuilder::with_options(options).build_document(&regions);

        assert_eq!(first, plain);
        assert_eq!(second, plain);
        let cache = cached.cache().map(|c| (c.len(), c.hits()));
        assert_eq!(cache, Some((2, 3)));
    }

    #[test]
    fn test_cached_region_build() {
        let mut cached = CachedBuilder::new(BuildOptions::new());
        let region = Region::from_texts(["Risk Factors", "Markets fell."]);
        let blocks = cached.build_region(&region);
        assert_eq!(blocks, BlockBuilder::new().build_region(&region));
        assert_eq!(cached.build_region(&region), blocks);
    }

    #[test]
    fn test_disabled_cache() {
        let mut cached = CachedBuilder::new(BuildOptions::new().without_cache());
        assert!(cached.cache().is_none());
        let doc = cached.build_document(&[Region::from_texts(["Markets fell."])]);
        assert_eq!(doc.block_count(), 1);
    }
}
