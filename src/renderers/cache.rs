//! Per-session formatter cache
//!
//! Formatters are keyed by output kind plus the sorted-key JSON of their
//! options. The map's insertion order doubles as recency order: a hit moves
//! the entry to the back, and when the cache is full the front entry is
//! evicted before inserting.

use indexmap::IndexMap;
use serde::Serialize;
use std::rc::Rc;

use super::{create_formatter, FormatOptions, Formatter, OutputKind};
use crate::error::Result;
use crate::models::SongModel;

/// Hit/miss counters, mainly for tests and the debug panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub size: usize,
}

/// Bounded LRU map of formatter instances
pub struct FormatterCache {
    entries: IndexMap<String, Rc<dyn Formatter>>,
    capacity: usize,
    stats: CacheStats,
}

impl Default for FormatterCache {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Cache key for a kind/options pair
pub fn cache_key(kind: OutputKind, options: &FormatOptions) -> String {
    format!("{}:{}", kind.as_str(), options.normalized_json())
}

impl FormatterCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            capacity: capacity.max(1),
            stats: CacheStats::default(),
        }
    }

    /// Cached formatter for `kind` and `options`, building it on a miss
    pub fn get_formatter(
        &mut self,
        kind: OutputKind,
        options: &FormatOptions,
    ) -> Result<Rc<dyn Formatter>> {
        let key = cache_key(kind, options);

        if let Some(index) = self.entries.get_index_of(&key) {
            let last = self.entries.len() - 1;
            self.entries.move_index(index, last);
            if let Some(formatter) = self.entries.get(&key) {
                self.stats.hits += 1;
                log::debug!("formatter cache hit: {}", key);
                return Ok(Rc::clone(formatter));
            }
        }

        self.stats.misses += 1;
        let formatter = create_formatter(kind, options.clone())?;
        if self.entries.len() >= self.capacity {
            if let Some((evicted, _)) = self.entries.shift_remove_index(0) {
                self.stats.evictions += 1;
                log::debug!("formatter cache evicted: {}", evicted);
            }
        }
        log::debug!("formatter cache miss: {}", key);
        self.entries.insert(key, Rc::clone(&formatter));
        Ok(formatter)
    }

    /// Render `model` with the cached formatter for `kind` and `options`
    pub fn format(
        &mut self,
        model: &SongModel,
        kind: OutputKind,
        options: &FormatOptions,
    ) -> Result<String> {
        self.get_formatter(kind, options)?.format(model)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains(&self, kind: OutputKind, options: &FormatOptions) -> bool {
        self.entries.contains_key(&cache_key(kind, options))
    }

    /// Keys from least to most recently used
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.len(),
            ..self.stats
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_transpose(n: i32) -> FormatOptions {
        FormatOptions {
            transpose: n,
            ..FormatOptions::default()
        }
    }

    #[test]
    fn test_hit_returns_same_instance() {
        let mut cache = FormatterCache::new(10);
        let options = FormatOptions {
            show_diagrams: true,
            ..FormatOptions::default()
        };
        let a = cache.get_formatter(OutputKind::Html, &options).unwrap();
        let b = cache.get_formatter(OutputKind::Html, &options).unwrap();
        assert!(Rc::ptr_eq(&a, &b));

        let c = cache.get_formatter(OutputKind::Html, &FormatOptions::default()).unwrap();
        assert!(!Rc::ptr_eq(&a, &c));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 2, evictions: 0, size: 2 });
    }

    #[test]
    fn test_kind_is_part_of_key() {
        let mut cache = FormatterCache::new(10);
        let options = FormatOptions::default();
        let text = cache.get_formatter(OutputKind::Text, &options).unwrap();
        let source = cache.get_formatter(OutputKind::Source, &options).unwrap();
        assert_eq!(text.kind(), OutputKind::Text);
        assert_eq!(source.kind(), OutputKind::Source);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lru_eviction_order() {
        let mut cache = FormatterCache::new(3);
        for n in 0..3 {
            cache.get_formatter(OutputKind::Text, &with_transpose(n)).unwrap();
        }
        // Touch 0 so 1 becomes least recently used
        cache.get_formatter(OutputKind::Text, &with_transpose(0)).unwrap();
        cache.get_formatter(OutputKind::Text, &with_transpose(3)).unwrap();

        assert_eq!(cache.len(), 3);
        assert!(!cache.contains(OutputKind::Text, &with_transpose(1)));
        assert!(cache.contains(OutputKind::Text, &with_transpose(0)));
        assert_eq!(cache.stats().evictions, 1);
        assert_eq!(cache.keys()[0], cache_key(OutputKind::Text, &with_transpose(2)));
    }
}
