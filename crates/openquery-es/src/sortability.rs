//! Field-sortability cache and check
//!
//! Sortability depends on engine-side field mappings, which are expensive to
//! query per request. [`SortChecker`] memoizes the boolean answer per
//! `(index, field)` pair in a process-wide [`SortabilityCache`], shared by
//! all concurrent sort validations. Mappings change only on operationally
//! coordinated schema changes, so the staleness risk is small.
//!
//! Failure policy is fail-closed: an unknown sortability is "not sortable"
//! rather than risking an engine-side sort error. A lookup failure also
//! clears the whole cache — the metadata source may be unreliable or the
//! index may have changed — and the failure-path false is never cached, so
//! a transient fault is not remembered as permanent.
//!
//! Concurrent requests may race on populating the same key; the occasional
//! duplicate mapping fetch is accepted over a single-flight gate.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::mapping::MappingLookup;

/// Environment variable toggling the sortability cache.
pub const SORT_CACHE_ENABLED_ENV: &str = "OPENQUERY_SORT_CACHE_ENABLED";

/// Engine types whose index representation supports exact-value ordering:
/// keyword-like exact strings, small integral numerics, and dates. Analyzed
/// text types are absent on purpose — sorting them errors engine-side.
pub const SORTABLE_TYPES: &[&str] = &["keyword", "integer", "short", "byte", "date"];

/// Configuration for the sortability cache.
#[derive(Debug, Clone, Copy)]
pub struct SortabilityCacheConfig {
    /// Enable the cache (can be disabled for debugging).
    pub enabled: bool,
}

impl Default for SortabilityCacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl SortabilityCacheConfig {
    /// Load config from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let enabled = std::env::var(SORT_CACHE_ENABLED_ENV)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(true);
        Self { enabled }
    }
}

/// Counters for cache behavior, for operational visibility.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortabilityMetrics {
    /// Checks answered from the cache.
    pub hits: u64,
    /// Checks that missed the cache.
    pub misses: u64,
    /// Mapping lookups issued.
    pub lookups: u64,
    /// Mapping lookups that failed.
    pub failures: u64,
    /// Full-cache clears triggered by failures.
    pub clears: u64,
}

/// Shared boolean cache keyed by `index.field`.
///
/// Thread-safe via `RwLock`; the lock is never held across an await.
#[derive(Debug)]
pub struct SortabilityCache {
    config: SortabilityCacheConfig,
    entries: RwLock<HashMap<String, bool>>,
    metrics: RwLock<SortabilityMetrics>,
}

impl SortabilityCache {
    /// Create a cache with the given config.
    #[must_use]
    pub fn new(config: SortabilityCacheConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(HashMap::new()),
            metrics: RwLock::new(SortabilityMetrics::default()),
        }
    }

    /// Create a cache with default config.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(SortabilityCacheConfig::default())
    }

    /// Cached sortability for a key, if present.
    pub fn get(&self, key: &str) -> Option<bool> {
        if !self.config.enabled {
            return None;
        }
        let cached = self.entries.read().ok().and_then(|e| e.get(key).copied());
        if let Ok(mut metrics) = self.metrics.write() {
            match cached {
                Some(_) => metrics.hits += 1,
                None => metrics.misses += 1,
            }
        }
        cached
    }

    /// Record a confirmed (type-based) sortability result.
    pub fn put(&self, key: impl Into<String>, sortable: bool) {
        if !self.config.enabled {
            return;
        }
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.into(), sortable);
        }
    }

    /// Drop every entry. Called after a mapping lookup failure so a possibly
    /// unreliable metadata source cannot serve stale answers.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
        if let Ok(mut metrics) = self.metrics.write() {
            metrics.clears += 1;
        }
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Metrics snapshot.
    #[must_use]
    pub fn metrics(&self) -> SortabilityMetrics {
        self.metrics.read().map(|m| *m).unwrap_or_default()
    }

    fn record_lookup(&self, failed: bool) {
        if let Ok(mut metrics) = self.metrics.write() {
            metrics.lookups += 1;
            if failed {
                metrics.failures += 1;
            }
        }
    }
}

/// Sortability decisions backed by a mapping lookup and a shared cache.
///
/// Owns both the collaborator handle and the cache instance, so tests can
/// construct one deterministically with a stub lookup.
pub struct SortChecker {
    mapping: Arc<dyn MappingLookup>,
    cache: SortabilityCache,
}

impl SortChecker {
    /// Create a checker with default cache config.
    #[must_use]
    pub fn new(mapping: Arc<dyn MappingLookup>) -> Self {
        Self::with_cache(mapping, SortabilityCache::with_defaults())
    }

    /// Create a checker around an explicit cache instance.
    #[must_use]
    pub fn with_cache(mapping: Arc<dyn MappingLookup>, cache: SortabilityCache) -> Self {
        Self { mapping, cache }
    }

    /// The shared cache (for metrics and coordinated invalidation).
    #[must_use]
    pub const fn cache(&self) -> &SortabilityCache {
        &self.cache
    }

    /// Whether `field` within `index` may be sorted on.
    ///
    /// Empty `index` or `field` is unsortable by definition and creates no
    /// cache entry. Confirmed type-based answers (true or false) are cached;
    /// a lookup failure logs, clears the whole cache, and returns an
    /// uncached false.
    pub async fn is_sortable_field(&self, index: &str, field: &str) -> bool {
        if index.is_empty() || field.is_empty() {
            return false;
        }

        let key = format!("{index}.{field}");
        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }

        match self.mapping.field_type(index, field).await {
            Ok(field_type) => {
                self.cache.record_lookup(false);
                let sortable = SORTABLE_TYPES.contains(&field_type.as_str());
                self.cache.put(key, sortable);
                sortable
            }
            Err(error) => {
                self.cache.record_lookup(true);
                tracing::warn!(
                    error = %error,
                    index,
                    field,
                    "mapping lookup failed; clearing sortability cache"
                );
                self.cache.clear();
                false
            }
        }
    }
}
