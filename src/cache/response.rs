//! Response cache for completed provider output.
//!
//! [`ResponseCache`] stores successful provider responses keyed by a
//! [`CacheKey`](super::CacheKey) string. Freshness is judged lazily at read
//! time against an injected [`Clock`]: an entry is served only while
//! `now - stored_at < ttl`. Stale entries are treated as absent and are
//! left in place until overwritten, evicted for capacity, or removed by
//! [`ResponseCache::purge_expired`].
//!
//! # Architecture
//!
//! The cache sits in [`Tutor`](crate::Tutor), above the
//! [`ProviderChain`](crate::providers::ProviderChain). A hit bypasses the
//! chain entirely. Only provider successes are written; canned fallbacks
//! never are, so a recovering provider is picked up on the next request.
//!
//! Storage is a bounded moka cache with the LRU eviction policy, so a new
//! write is always admitted and the least recently used entry goes when
//! full. moka's own TTL is not used because it reads a private clock;
//! expiry here must follow the injected one.

use std::sync::Arc;
use std::time::Duration;

use moka::policy::EvictionPolicy;
use moka::sync::Cache;
use tracing::debug;

use crate::clock::Clock;
use crate::telemetry;

/// Configuration for a response cache.
///
/// ```rust
/// # use scholia::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(1_000)
///     .ttl(Duration::from_secs(120));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached entries before LRU eviction. Default: 10,000.
    pub max_entries: u64,
    /// Time-to-live for cached entries. Default: 5 minutes.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            ttl: Duration::from_secs(5 * 60),
        }
    }
}

impl CacheConfig {
    /// Create a new config with default capacity and TTL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached entries.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the time-to-live for cached entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// A cached provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub key: String,
    pub content: String,
    pub stored_at_ms: i64,
}

/// In-memory, clock-driven response cache.
pub struct ResponseCache {
    name: &'static str,
    entries: Cache<String, CacheEntry>,
    ttl_ms: i64,
    clock: Arc<dyn Clock>,
}

impl ResponseCache {
    /// Create a cache. `name` labels its hit/miss metrics.
    pub fn new(name: &'static str, config: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            name,
            entries: Cache::builder()
                .max_capacity(config.max_entries)
                .eviction_policy(EvictionPolicy::lru())
                .build(),
            ttl_ms: i64::try_from(config.ttl.as_millis()).unwrap_or(i64::MAX),
            clock,
        }
    }

    /// Look up a fresh entry.
    ///
    /// Returns `None` when the key is absent or the entry is stale.
    /// Emits cache hit/miss metrics.
    pub fn get_entry(&self, key: &str) -> Option<CacheEntry> {
        let now = self.clock.now_millis();
        match self.entries.get(key) {
            Some(entry) if self.is_fresh(&entry, now) => {
                debug!(cache = self.name, key, "cache hit");
                metrics::counter!(telemetry::CACHE_HITS_TOTAL, "cache" => self.name).increment(1);
                Some(entry)
            }
            _ => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "cache" => self.name)
                    .increment(1);
                None
            }
        }
    }

    /// Look up fresh content for `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.get_entry(key).map(|e| e.content)
    }

    /// Store `content` under `key`, overwriting any previous entry.
    pub fn put(&self, key: impl Into<String>, content: impl Into<String>) {
        let key = key.into();
        let entry = CacheEntry {
            key: key.clone(),
            content: content.into(),
            stored_at_ms: self.clock.now_millis(),
        };
        self.entries.insert(key, entry);
    }

    /// Remove every stale entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now_millis();
        let stale: Vec<Arc<String>> = self
            .entries
            .iter()
            .filter(|(_, entry)| !self.is_fresh(entry, now))
            .map(|(key, _)| key)
            .collect();
        for key in &stale {
            self.entries.invalidate(key.as_str());
        }
        stale.len()
    }

    /// Number of stored entries, fresh or stale.
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evict all entries.
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    fn is_fresh(&self, entry: &CacheEntry, now: i64) -> bool {
        now.saturating_sub(entry.stored_at_ms) < self.ttl_ms
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("name", &self.name)
            .field("ttl_ms", &self.ttl_ms)
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn cache_with_clock(ttl: Duration) -> (ResponseCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(10_000));
        let cache = ResponseCache::new("test", &CacheConfig::new().ttl(ttl), clock.clone());
        (cache, clock)
    }

    #[test]
    fn put_then_get() {
        let (cache, _) = cache_with_clock(Duration::from_secs(60));
        cache.put("k", "v");
        assert_eq!(cache.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn entry_records_store_time() {
        let (cache, clock) = cache_with_clock(Duration::from_secs(60));
        cache.put("k", "v");
        clock.advance(Duration::from_millis(5));
        let entry = cache.get_entry("k").unwrap();
        assert_eq!(entry.stored_at_ms, 10_000);
        assert_eq!(entry.key, "k");
    }

    #[test]
    fn put_overwrites_and_restamps() {
        let (cache, clock) = cache_with_clock(Duration::from_millis(100));
        cache.put("k", "old");
        clock.advance(Duration::from_millis(90));
        cache.put("k", "new");
        clock.advance(Duration::from_millis(90));
        assert_eq!(cache.get("k").as_deref(), Some("new"));
    }

    #[test]
    fn purge_removes_only_stale_entries() {
        let (cache, clock) = cache_with_clock(Duration::from_millis(100));
        cache.put("old", "a");
        clock.advance(Duration::from_millis(150));
        cache.put("young", "b");
        assert_eq!(cache.purge_expired(), 1);
        assert_eq!(cache.get("young").as_deref(), Some("b"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn full_cache_admits_newest_write() {
        let clock = Arc::new(ManualClock::new(0));
        let cache = ResponseCache::new("test", &CacheConfig::new().max_entries(2), clock);
        cache.put("a", "1");
        cache.put("b", "2");
        for _ in 0..20 {
            cache.get("a");
            cache.get("b");
        }
        cache.put("c", "3");

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("c").as_deref(), Some("3"));
        let survivors = ["a", "b"].iter().filter(|k| cache.get(k).is_some()).count();
        assert_eq!(survivors, 1);
    }

    #[test]
    fn clear_empties_cache() {
        let (cache, _) = cache_with_clock(Duration::from_secs(1));
        cache.put("a", "1");
        cache.put("b", "2");
        cache.clear();
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_none());
    }
}
