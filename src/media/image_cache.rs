// SPDX-License-Identifier: MPL-2.0
//! In-memory cache of fetched result images.
//!
//! # Design
//!
//! - **LRU eviction**: least recently displayed images are dropped first
//! - **Path-keyed**: entries are indexed by the backend path of the result
//! - **In-flight tracking**: a path being fetched is never requested twice
//!
//! Decoding is left to the image widget; the cache only stores handles built
//! from the raw bytes returned by the backend.

use crate::config::DEFAULT_IMAGE_CACHE_CAPACITY;
use iced::widget::image::Handle;
use lru::LruCache;
use std::collections::HashSet;
use std::num::NonZeroUsize;

pub struct ImageCache {
    cache: LruCache<String, Handle>,
    pending: HashSet<String>,
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_CACHE_CAPACITY)
    }
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("len", &self.cache.len())
            .field("cap", &self.cache.cap())
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl ImageCache {
    /// Creates a cache holding at most `capacity` images (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            pending: HashSet::new(),
        }
    }

    /// Stores the encoded bytes of `path` and clears its in-flight mark.
    pub fn insert(&mut self, path: String, bytes: Vec<u8>) -> Handle {
        self.pending.remove(&path);
        let handle = Handle::from_bytes(bytes);
        self.cache.put(path, handle.clone());
        handle
    }

    /// Gets the handle for `path`, marking it as recently used.
    pub fn get(&mut self, path: &str) -> Option<Handle> {
        self.cache.get(path).cloned()
    }

    /// Gets the handle for `path` without touching the LRU order.
    #[must_use]
    pub fn peek(&self, path: &str) -> Option<Handle> {
        self.cache.peek(path).cloned()
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.cache.contains(path)
    }

    #[must_use]
    pub fn is_pending(&self, path: &str) -> bool {
        self.pending.contains(path)
    }

    /// Returns the paths that are neither cached nor already being fetched,
    /// and marks them as in flight.
    ///
    /// Cached paths among `paths` are promoted so the images on screen are
    /// the last to be evicted.
    pub fn claim_missing<I>(&mut self, paths: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut missing = Vec::new();
        for path in paths {
            if self.cache.get(&path).is_some() || self.pending.contains(&path) {
                continue;
            }
            self.pending.insert(path.clone());
            missing.push(path);
        }
        missing
    }

    /// Clears the in-flight mark of a fetch that failed so it can be retried.
    pub fn release(&mut self, path: &str) {
        self.pending.remove(path);
    }

    /// Drops every cached image, e.g. when a new search replaces the results.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.pending.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn claim_missing_skips_cached_and_pending() {
        let mut cache = ImageCache::new(4);
        cache.insert("a".into(), vec![1, 2, 3]);

        let first = cache.claim_missing(paths(&["a", "b", "c"]));
        assert_eq!(first, paths(&["b", "c"]));
        assert!(cache.is_pending("b"));

        let second = cache.claim_missing(paths(&["b", "c", "d"]));
        assert_eq!(second, paths(&["d"]));
    }

    #[test]
    fn insert_clears_pending() {
        let mut cache = ImageCache::new(4);
        cache.claim_missing(paths(&["a"]));
        cache.insert("a".into(), vec![0]);
        assert!(!cache.is_pending("a"));
        assert!(cache.contains("a"));
        assert!(cache.peek("a").is_some());
    }

    #[test]
    fn release_allows_retry() {
        let mut cache = ImageCache::new(4);
        cache.claim_missing(paths(&["a"]));
        cache.release("a");
        assert_eq!(cache.claim_missing(paths(&["a"])), paths(&["a"]));
    }

    #[test]
    fn least_recently_used_is_evicted() {
        let mut cache = ImageCache::new(2);
        cache.insert("a".into(), vec![0]);
        cache.insert("b".into(), vec![0]);
        assert!(cache.get("a").is_some());
        cache.insert("c".into(), vec![0]);

        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn zero_capacity_still_holds_one_image() {
        let mut cache = ImageCache::new(0);
        cache.insert("a".into(), vec![0]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_empties_everything() {
        let mut cache = ImageCache::default();
        cache.insert("a".into(), vec![0]);
        cache.claim_missing(paths(&["b"]));
        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.is_pending("b"));
    }
}
