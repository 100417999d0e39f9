// SPDX-FileCopyrightText: 2026 Cleo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded TTL + LRU cache of routing decisions.
//!
//! Maps normalized message text to the agent previously chosen for it so
//! repeated or near-identical queries skip suggestion lookups. Entries are
//! refreshed on every hit (sliding expiry), evicted when older than the TTL,
//! and the single oldest entry is dropped when an insert would exceed the
//! size limit. Only decisions at or above the confidence floor are stored.
//!
//! The cache is per-process and owned by whoever constructs it. Each call
//! is atomic; a check-then-act sequence spanning an `.await` is not, so two
//! concurrent identical queries may both miss and both compute.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use cleo_config::model::RoutingConfig;
use cleo_core::{Clock, SystemClock};
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Maximum length, in characters, of a normalized cache key.
pub const MAX_KEY_CHARS: usize = 200;

/// Maximum length, in characters, of the original input kept for diagnostics.
pub const MAX_ORIGINAL_CHARS: usize = 100;

/// Shortest period accepted by [`spawn_cleanup_task`].
pub const MIN_CLEANUP_INTERVAL: Duration = Duration::from_secs(1);

/// Cache limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutingCacheConfig {
    pub ttl: Duration,
    pub max_size: usize,
    pub min_confidence: f64,
}

impl Default for RoutingCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
            max_size: 1000,
            min_confidence: 0.7,
        }
    }
}

impl From<&RoutingConfig> for RoutingCacheConfig {
    fn from(config: &RoutingConfig) -> Self {
        Self {
            ttl: Duration::from_secs(config.cache_ttl_secs),
            max_size: config.cache_max_size,
            min_confidence: config.cache_min_confidence,
        }
    }
}

/// One cached routing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutingCacheEntry {
    pub normalized_input: String,
    /// Truncated copy of the first input that produced this entry.
    pub original_input: String,
    pub agent_id: String,
    /// Delegate tool the agent declared when the entry was stored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    pub confidence: f64,
    /// Epoch milliseconds of insertion or last hit.
    pub timestamp: i64,
    pub hit_count: u64,
}

/// Running counters exposed by [`RoutingCache::get_stats`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub total_queries: u64,
    /// `hits / total_queries`, or 0 with no queries.
    pub hit_rate: f64,
    pub size: usize,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<String, RoutingCacheEntry>,
    hits: u64,
    misses: u64,
}

/// In-memory routing cache. Share it behind an `Arc`.
pub struct RoutingCache {
    config: RoutingCacheConfig,
    clock: Arc<dyn Clock>,
    inner: Mutex<Inner>,
}

impl RoutingCache {
    pub fn new(config: RoutingCacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Cache with default limits on the system clock.
    pub fn with_defaults() -> Self {
        Self::new(RoutingCacheConfig::default(), Arc::new(SystemClock))
    }

    pub fn config(&self) -> &RoutingCacheConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Every critical section leaves the map consistent, so a poisoned
        // lock is still safe to use.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn ttl_millis(&self) -> i64 {
        i64::try_from(self.config.ttl.as_millis()).unwrap_or(i64::MAX)
    }

    /// Look up the agent cached for `input`.
    ///
    /// A hit refreshes the entry's timestamp and bumps its hit count. An
    /// expired entry is removed and counted as a miss.
    pub fn get_cached(&self, input: &str) -> Option<String> {
        let key = normalize_input(input);
        let now = self.clock.now_millis();
        let ttl = self.ttl_millis();
        let mut inner = self.lock();

        let expired = match inner.entries.get(&key) {
            Some(entry) => now.saturating_sub(entry.timestamp) > ttl,
            None => {
                inner.misses += 1;
                return None;
            }
        };

        if expired {
            inner.entries.remove(&key);
            inner.misses += 1;
            debug!(key = key.as_str(), "routing cache entry expired");
            return None;
        }

        inner.hits += 1;
        let entry = inner.entries.get_mut(&key)?;
        entry.timestamp = now;
        entry.hit_count += 1;
        debug!(
            key = key.as_str(),
            agent = entry.agent_id.as_str(),
            hit_count = entry.hit_count,
            "routing cache hit"
        );
        Some(entry.agent_id.clone())
    }

    /// Cache `agent_id` for `input`.
    ///
    /// Returns `false` without storing anything when `confidence` is below
    /// the floor or not a number, or when `max_size` is zero. Inserting a new
    /// key into a full cache first evicts the entry with the oldest timestamp.
    pub fn set(&self, input: &str, agent_id: &str, confidence: f64) -> bool {
        self.set_with_tool(input, agent_id, None, confidence)
    }

    /// [`set`](Self::set), also recording the agent's declared delegate tool.
    pub fn set_with_tool(
        &self,
        input: &str,
        agent_id: &str,
        tool: Option<&str>,
        confidence: f64,
    ) -> bool {
        // NaN fails every comparison, so test for the accepted range.
        if !(confidence >= self.config.min_confidence) {
            debug!(
                agent = agent_id,
                confidence,
                min_confidence = self.config.min_confidence,
                "routing below confidence floor, not cached"
            );
            return false;
        }
        if self.config.max_size == 0 {
            return false;
        }

        let key = normalize_input(input);
        let now = self.clock.now_millis();
        let mut inner = self.lock();

        if !inner.entries.contains_key(&key) && inner.entries.len() >= self.config.max_size {
            let oldest = inner
                .entries
                .values()
                .min_by_key(|e| e.timestamp)
                .map(|e| e.normalized_input.clone());
            if let Some(oldest) = oldest {
                inner.entries.remove(&oldest);
                debug!(evicted = oldest.as_str(), "routing cache full, evicted oldest entry");
            }
        }

        let hit_count = inner.entries.get(&key).map_or(0, |e| e.hit_count);
        inner.entries.insert(
            key.clone(),
            RoutingCacheEntry {
                normalized_input: key,
                original_input: input.chars().take(MAX_ORIGINAL_CHARS).collect(),
                agent_id: agent_id.to_string(),
                tool: tool.map(str::to_string),
                confidence,
                timestamp: now,
                hit_count,
            },
        );
        true
    }

    /// Remove every entry older than the TTL. Returns how many were removed.
    pub fn cleanup(&self) -> usize {
        let now = self.clock.now_millis();
        let ttl = self.ttl_millis();
        let mut inner = self.lock();

        let before = inner.entries.len();
        inner
            .entries
            .retain(|_, e| now.saturating_sub(e.timestamp) <= ttl);
        let removed = before - inner.entries.len();
        if removed > 0 {
            debug!(removed, remaining = inner.entries.len(), "routing cache cleanup");
        }
        removed
    }

    pub fn get_stats(&self) -> CacheStats {
        let inner = self.lock();
        let total_queries = inner.hits + inner.misses;
        let hit_rate = if total_queries == 0 {
            0.0
        } else {
            inner.hits as f64 / total_queries as f64
        };
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            total_queries,
            hit_rate,
            size: inner.entries.len(),
        }
    }

    /// Copy of the entry for `input`, without counting a query.
    pub fn entry(&self, input: &str) -> Option<RoutingCacheEntry> {
        self.lock().entries.get(&normalize_input(input)).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all entries and reset counters.
    pub fn clear(&self) {
        *self.lock() = Inner::default();
    }
}

/// Normalize text into a cache key: lowercase, punctuation dropped,
/// whitespace collapsed, capped at [`MAX_KEY_CHARS`] characters.
pub fn normalize_input(input: &str) -> String {
    let cleaned: String = input
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(MAX_KEY_CHARS)
        .collect()
}

/// Run [`RoutingCache::cleanup`] every `interval` until `cancel` fires.
///
/// Intervals shorter than [`MIN_CLEANUP_INTERVAL`] are raised to it.
pub fn spawn_cleanup_task(
    cache: Arc<RoutingCache>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    let interval = interval.max(MIN_CLEANUP_INTERVAL);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("routing cache cleanup task stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let removed = cache.cleanup();
                    if removed > 0 {
                        info!(removed, "expired routing cache entries swept");
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cleo_core::ManualClock;
    use proptest::prelude::*;

    fn cache_with(max_size: usize) -> (RoutingCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let config = RoutingCacheConfig {
            ttl: Duration::from_secs(3600),
            max_size,
            min_confidence: 0.7,
        };
        (RoutingCache::new(config, clock.clone()), clock)
    }

    #[test]
    fn normalize_strips_punctuation_and_whitespace() {
        assert_eq!(normalize_input("  Fix   THIS bug!!  "), "fix this bug");
        assert_eq!(normalize_input("What's up?"), "what s up");
        assert_eq!(normalize_input("¿Qué tal?"), "qué tal");
    }

    #[test]
    fn normalize_caps_length() {
        let long = "a ".repeat(500);
        assert_eq!(normalize_input(&long).chars().count(), MAX_KEY_CHARS);
    }

    #[test]
    fn round_trip_then_ttl_expiry() {
        let (cache, clock) = cache_with(10);
        assert!(cache.set("Fix the login bug", "agent-x", 0.9));
        assert_eq!(cache.get_cached("Fix the login bug").as_deref(), Some("agent-x"));

        clock.advance(Duration::from_secs(3601));
        assert_eq!(cache.get_cached("Fix the login bug"), None);
        assert!(cache.is_empty(), "expired entry should be removed on read");
    }

    #[test]
    fn punctuation_variants_share_an_entry() {
        let (cache, _) = cache_with(10);
        cache.set("fix the login bug", "toby-technical", 0.9);
        assert_eq!(
            cache.get_cached("Fix the LOGIN bug!").as_deref(),
            Some("toby-technical")
        );
    }

    #[test]
    fn low_confidence_is_not_cached() {
        let (cache, _) = cache_with(10);
        assert!(!cache.set("query", "agent-x", 0.5));
        assert!(cache.is_empty());
        assert_eq!(cache.get_cached("query"), None);
    }

    #[test]
    fn nan_confidence_is_not_cached() {
        let (cache, _) = cache_with(10);
        assert!(!cache.set("query", "agent-x", f64::NAN));
        assert!(cache.is_empty());
        assert_eq!(cache.get_cached("query"), None);
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let (cache, _) = cache_with(0);
        assert!(!cache.set("first", "agent-x", 0.9));
        assert!(!cache.set("second", "agent-y", 0.9));
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn declared_tool_is_stored_with_entry() {
        let (cache, _) = cache_with(10);
        assert!(cache.set_with_tool("book me a flight", "nova-travel", Some("book_trip"), 0.75));
        let entry = cache.entry("Book me a flight!").unwrap();
        assert_eq!(entry.tool.as_deref(), Some("book_trip"));

        assert!(cache.set("fix the build", "toby-technical", 0.85));
        assert_eq!(cache.entry("fix the build").unwrap().tool, None);
    }

    #[test]
    fn confidence_at_floor_is_cached() {
        let (cache, _) = cache_with(10);
        assert!(cache.set("query", "agent-x", 0.7));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn hit_refreshes_timestamp() {
        let (cache, clock) = cache_with(10);
        cache.set("query", "agent-x", 0.9);

        clock.advance(Duration::from_secs(3000));
        assert!(cache.get_cached("query").is_some());

        // 3000s after the hit: still inside the sliding window.
        clock.advance(Duration::from_secs(3000));
        assert!(cache.get_cached("query").is_some());
        assert_eq!(cache.entry("query").unwrap().hit_count, 2);
    }

    #[test]
    fn evicts_oldest_when_full() {
        let (cache, clock) = cache_with(3);
        for i in 0..3 {
            cache.set(&format!("query {i}"), "agent-x", 0.9);
            clock.advance(Duration::from_secs(1));
        }
        // Touch query 0 so query 1 becomes the oldest.
        cache.get_cached("query 0");
        clock.advance(Duration::from_secs(1));

        cache.set("query 3", "agent-y", 0.9);
        assert_eq!(cache.len(), 3);
        assert!(cache.entry("query 1").is_none());
        assert!(cache.entry("query 0").is_some());
        assert!(cache.entry("query 3").is_some());
    }

    #[test]
    fn overwriting_existing_key_does_not_evict() {
        let (cache, clock) = cache_with(2);
        cache.set("a", "agent-x", 0.9);
        clock.advance(Duration::from_secs(1));
        cache.set("b", "agent-x", 0.9);
        clock.advance(Duration::from_secs(1));
        cache.set("a", "agent-z", 0.95);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.entry("a").unwrap().agent_id, "agent-z");
        assert!(cache.entry("b").is_some());
    }

    #[test]
    fn original_input_is_truncated() {
        let (cache, _) = cache_with(2);
        let long = "x".repeat(300);
        cache.set(&long, "agent-x", 0.9);
        assert_eq!(
            cache.entry(&long).unwrap().original_input.chars().count(),
            MAX_ORIGINAL_CHARS
        );
    }

    #[test]
    fn cleanup_removes_only_expired() {
        let (cache, clock) = cache_with(10);
        cache.set("old", "agent-x", 0.9);
        clock.advance(Duration::from_secs(3000));
        cache.set("fresh", "agent-x", 0.9);
        clock.advance(Duration::from_secs(700));

        assert_eq!(cache.cleanup(), 1);
        assert!(cache.entry("old").is_none());
        assert!(cache.entry("fresh").is_some());
    }

    #[test]
    fn stats_track_hits_and_misses() {
        let (cache, _) = cache_with(10);
        assert_eq!(cache.get_stats().hit_rate, 0.0);

        cache.set("query", "agent-x", 0.9);
        cache.get_cached("query");
        cache.get_cached("query");
        cache.get_cached("other");
        cache.get_cached("another");

        let stats = cache.get_stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.total_queries, 4);
        assert_eq!(stats.hit_rate, 0.5);
        assert_eq!(stats.size, 1);

        cache.clear();
        assert_eq!(cache.get_stats(), CacheStats::default());
    }

    #[test]
    fn config_from_routing_section() {
        let routing = RoutingConfig {
            cache_ttl_secs: 60,
            cache_max_size: 5,
            cache_min_confidence: 0.8,
            ..RoutingConfig::default()
        };
        let config = RoutingCacheConfig::from(&routing);
        assert_eq!(config.ttl, Duration::from_secs(60));
        assert_eq!(config.max_size, 5);
        assert_eq!(config.min_confidence, 0.8);
    }

    #[tokio::test(start_paused = true)]
    async fn cleanup_task_sweeps_until_cancelled() {
        let clock = Arc::new(ManualClock::new(0));
        let config = RoutingCacheConfig {
            ttl: Duration::from_secs(10),
            ..RoutingCacheConfig::default()
        };
        let cache = Arc::new(RoutingCache::new(config, clock.clone()));
        cache.set("query", "agent-x", 0.9);
        clock.advance(Duration::from_secs(11));

        let cancel = CancellationToken::new();
        let handle = spawn_cleanup_task(cache.clone(), Duration::from_secs(300), cancel.clone());

        tokio::time::sleep(Duration::from_secs(301)).await;
        assert!(cache.is_empty());

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn zero_cleanup_interval_is_clamped() {
        let clock = Arc::new(ManualClock::new(0));
        let config = RoutingCacheConfig {
            ttl: Duration::from_secs(10),
            ..RoutingCacheConfig::default()
        };
        let cache = Arc::new(RoutingCache::new(config, clock.clone()));
        cache.set("query", "agent-x", 0.9);
        clock.advance(Duration::from_secs(11));

        let cancel = CancellationToken::new();
        let handle = spawn_cleanup_task(cache.clone(), Duration::ZERO, cancel.clone());

        tokio::time::sleep(MIN_CLEANUP_INTERVAL + Duration::from_millis(10)).await;
        assert!(cache.is_empty());

        cancel.cancel();
        handle.await.unwrap();
    }

    proptest! {
        #[test]
        fn size_never_exceeds_max(
            max_size in 0usize..8,
            keys in proptest::collection::vec("[a-z]{1,6}", 1..60),
        ) {
            let (cache, clock) = cache_with(max_size);
            for key in &keys {
                cache.set(key, "agent-x", 0.9);
                clock.advance(Duration::from_millis(5));
                prop_assert!(cache.len() <= max_size);
            }
        }
    }
}
