//! In-memory resolution cache keyed by chain and node
//!
//! Entries are never swept: an expired entry reads as a miss and is
//! overwritten by the next successful resolution.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{hex, Address, B256};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::types::{CacheEntry, CacheStats};

/// Default lower bound for cached TTLs (1 hour)
pub const DEFAULT_MIN_TTL: Duration = Duration::from_millis(60 * 60 * 1000);
/// Default upper bound for cached TTLs (2^53 - 1 ms, effectively unbounded)
pub const DEFAULT_MAX_TTL: Duration = Duration::from_millis(9_007_199_254_740_991);

/// Resolved addresses by chain id, then node
pub struct ResolutionCache {
    entries: RwLock<HashMap<String, HashMap<String, CacheEntry>>>,
    min_ttl_ms: AtomicU64,
    max_ttl_ms: AtomicU64,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResolutionCache {
    /// Create an empty cache on the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty cache that reads time from `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            min_ttl_ms: AtomicU64::new(duration_ms(DEFAULT_MIN_TTL)),
            max_ttl_ms: AtomicU64::new(duration_ms(DEFAULT_MAX_TTL)),
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Current time according to the cache's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Lower bound applied to registry TTLs
    pub fn min_ttl(&self) -> Duration {
        Duration::from_millis(self.min_ttl_ms.load(Ordering::Relaxed))
    }

    /// Change the lower bound; existing entries keep their expiry
    pub fn set_min_ttl(&self, ttl: Duration) {
        self.min_ttl_ms.store(duration_ms(ttl), Ordering::Relaxed);
    }

    /// Upper bound applied to registry TTLs
    pub fn max_ttl(&self) -> Duration {
        Duration::from_millis(self.max_ttl_ms.load(Ordering::Relaxed))
    }

    /// Change the upper bound; existing entries keep their expiry
    pub fn set_max_ttl(&self, ttl: Duration) {
        self.max_ttl_ms.store(duration_ms(ttl), Ordering::Relaxed);
    }

    /// Clamp a TTL into `[min_ttl, max_ttl]`
    ///
    /// When the bounds cross, the upper bound wins.
    pub fn clamp_ttl(&self, ttl: Duration) -> Duration {
        ttl.max(self.min_ttl()).min(self.max_ttl())
    }

    /// Fresh entry for `(chain_id, node)`, counting the hit or miss
    pub async fn get(&self, chain_id: u64, node: &B256) -> Option<CacheEntry> {
        let now = self.clock.now();
        let entry = self.entry(chain_id, node).await;

        match entry {
            Some(entry) if entry.is_fresh(now) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(chain_id, node = %node_key(node), "Resolution cache hit");
                Some(entry)
            }
            Some(entry) => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(
                    chain_id,
                    node = %node_key(node),
                    expired_at = %entry.expires,
                    "Resolution cache entry expired"
                );
                None
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Stored entry for `(chain_id, node)` whether or not it has expired
    pub async fn entry(&self, chain_id: u64, node: &B256) -> Option<CacheEntry> {
        let entries = self.entries.read().await;
        entries
            .get(&chain_id.to_string())
            .and_then(|nodes| nodes.get(&node_key(node)))
            .cloned()
    }

    /// Store an entry, replacing any previous one for the same key
    pub async fn put(&self, chain_id: u64, node: &B256, entry: CacheEntry) {
        let mut entries = self.entries.write().await;
        entries
            .entry(chain_id.to_string())
            .or_default()
            .insert(node_key(node), entry);
    }

    /// Store `address` until `now + ttl`, saturating at the latest representable time
    pub async fn insert_with_ttl(
        &self,
        chain_id: u64,
        node: &B256,
        address: Address,
        ttl: Duration,
    ) -> CacheEntry {
        let now = self.clock.now();
        let expires = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let entry = CacheEntry { address, expires };
        self.put(chain_id, node, entry.clone()).await;
        debug!(chain_id, node = %node_key(node), %expires, "Cached resolution");
        entry
    }

    /// Remove the entry for `(chain_id, node)`, returning it if present
    pub async fn invalidate(&self, chain_id: u64, node: &B256) -> Option<CacheEntry> {
        let mut entries = self.entries.write().await;
        let key = chain_id.to_string();
        let removed = entries.get_mut(&key)?.remove(&node_key(node));
        if entries.get(&key).is_some_and(|nodes| nodes.is_empty()) {
            entries.remove(&key);
        }
        removed
    }

    /// Remove every entry
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Current entry count and hit/miss counters
    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        CacheStats {
            entries: entries.values().map(HashMap::len).sum(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}

fn node_key(node: &B256) -> String {
    hex::encode_prefixed(node.as_slice())
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use alloy_primitives::address;

    const ADDR: Address = address!("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");

    fn cache_with_clock() -> (ResolutionCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        (ResolutionCache::with_clock(clock.clone()), clock)
    }

    #[test]
    fn test_default_bounds() {
        let cache = ResolutionCache::new();
        assert_eq!(cache.min_ttl(), Duration::from_secs(3600));
        assert_eq!(cache.max_ttl().as_millis(), 9_007_199_254_740_991);
    }

    #[test]
    fn test_clamp_ttl() {
        let cache = ResolutionCache::new();
        assert_eq!(cache.clamp_ttl(Duration::from_secs(60)), Duration::from_secs(3600));
        assert_eq!(cache.clamp_ttl(Duration::from_secs(7200)), Duration::from_secs(7200));

        cache.set_max_ttl(Duration::from_secs(5000));
        assert_eq!(cache.clamp_ttl(Duration::from_secs(7200)), Duration::from_secs(5000));

        cache.set_min_ttl(Duration::ZERO);
        assert_eq!(cache.clamp_ttl(Duration::ZERO), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let (cache, _) = cache_with_clock();
        let node = B256::repeat_byte(1);

        assert!(cache.get(1, &node).await.is_none());
        let entry = cache.insert_with_ttl(1, &node, ADDR, Duration::from_secs(10)).await;

        assert_eq!(cache.get(1, &node).await, Some(entry));
        // Keyed by chain as well as node
        assert!(cache.get(3, &node).await.is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss_but_kept() {
        let (cache, clock) = cache_with_clock();
        let node = B256::repeat_byte(2);

        cache.insert_with_ttl(1, &node, ADDR, Duration::from_secs(10)).await;
        clock.advance(chrono::Duration::seconds(10));

        assert!(cache.get(1, &node).await.is_none());
        assert!(cache.entry(1, &node).await.is_some());
        assert_eq!(cache.stats().await.entries, 1);

        // Overwritten by the next write
        let entry = cache.insert_with_ttl(1, &node, Address::ZERO, Duration::from_secs(10)).await;
        assert_eq!(cache.get(1, &node).await, Some(entry));
        assert_eq!(cache.stats().await.entries, 1);
    }

    #[tokio::test]
    async fn test_huge_ttl_saturates() {
        let (cache, _) = cache_with_clock();
        let node = B256::repeat_byte(3);

        let entry = cache.insert_with_ttl(1, &node, ADDR, DEFAULT_MAX_TTL).await;
        assert_eq!(entry.expires, DateTime::<Utc>::MAX_UTC);
        assert!(cache.get(1, &node).await.is_some());
    }

    #[tokio::test]
    async fn test_invalidate_and_clear() {
        let (cache, _) = cache_with_clock();
        let a = B256::repeat_byte(4);
        let b = B256::repeat_byte(5);

        cache.insert_with_ttl(1, &a, ADDR, Duration::from_secs(10)).await;
        cache.insert_with_ttl(42, &b, ADDR, Duration::from_secs(10)).await;

        assert!(cache.invalidate(1, &a).await.is_some());
        assert!(cache.invalidate(1, &a).await.is_none());
        assert_eq!(cache.stats().await.entries, 1);

        cache.clear().await;
        assert_eq!(cache.stats().await.entries, 0);
    }

    #[tokio::test]
    async fn test_hit_miss_counters() {
        let (cache, _) = cache_with_clock();
        let node = B256::repeat_byte(6);

        cache.get(1, &node).await;
        cache.insert_with_ttl(1, &node, ADDR, Duration::from_secs(10)).await;
        cache.get(1, &node).await;

        let stats = cache.stats().await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
    }
}
