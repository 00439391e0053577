//! Short-TTL in-memory response cache.
//!
//! Keyed by the case-normalized nickname. Entries are overwritten on
//! every miss and never evicted; staleness is decided by timestamp
//! comparison at read time, so the map grows with the set of distinct
//! nicknames seen over the process lifetime. A per-key single-flight
//! lock collapses concurrent misses for the same nickname into one
//! upstream fetch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::models::PlayerSummary;

/// How long a cached summary is considered fresh.
pub const CACHE_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CacheEntry {
    summary: PlayerSummary,
    inserted_at: Instant,
}

/// Process-wide lookup cache.
pub struct LookupCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
    inflight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Default for LookupCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupCache {
    pub fn new() -> Self {
        Self::with_ttl(CACHE_TTL)
    }

    /// Cache with a custom TTL, for tests.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Fresh summary for a nickname, if any. Stale entries are left in
    /// place; they are overwritten by the next insert.
    pub async fn get(&self, nickname: &str) -> Option<PlayerSummary> {
        let key = normalize(nickname);
        let entries = self.entries.read().await;
        let entry = entries.get(&key)?;

        if entry.inserted_at.elapsed() < self.ttl {
            debug!("Cache hit for {}", key);
            Some(entry.summary.clone())
        } else {
            debug!("Cache entry for {} expired", key);
            None
        }
    }

    /// Store a summary under the normalized nickname, stamping it now.
    pub async fn insert(&self, nickname: &str, summary: PlayerSummary) {
        let key = normalize(nickname);
        self.entries.write().await.insert(
            key,
            CacheEntry {
                summary,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Per-key single-flight lock. Callers hold the returned mutex while
    /// fetching so that concurrent misses for the same nickname wait and
    /// re-check the cache instead of duplicating the upstream fan-out.
    pub async fn key_lock(&self, nickname: &str) -> Arc<Mutex<()>> {
        let key = normalize(nickname);
        let mut inflight = self.inflight.lock().await;
        inflight.entry(key).or_default().clone()
    }

    /// Number of cached nicknames, fresh or stale.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

fn normalize(nickname: &str) -> String {
    nickname.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Elo;
    use pretty_assertions::assert_eq;

    fn summary(nickname: &str, kd: &str) -> PlayerSummary {
        PlayerSummary {
            nickname: nickname.to_string(),
            elo: Elo::Rating(2000),
            skill_level: 8,
            average_kd: kd.to_string(),
        }
    }

    #[tokio::test]
    async fn test_fresh_entry_is_returned() {
        let cache = LookupCache::new();
        cache.insert("s1mple", summary("s1mple", "1.40")).await;

        let hit = cache.get("s1mple").await.unwrap();
        assert_eq!(hit.average_kd, "1.40");
    }

    #[tokio::test]
    async fn test_key_is_case_normalized() {
        let cache = LookupCache::new();
        cache.insert("S1MPLE", summary("s1mple", "1.40")).await;

        assert!(cache.get("s1mple").await.is_some());
        assert!(cache.get("s1MpLe").await.is_some());
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_miss_for_unknown_nickname() {
        let cache = LookupCache::new();
        assert!(cache.get("nobody").await.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss_but_stays_counted() {
        let cache = LookupCache::with_ttl(Duration::from_millis(10));
        cache.insert("s1mple", summary("s1mple", "1.40")).await;

        tokio::time::sleep(Duration::from_millis(25)).await;

        assert!(cache.get("s1mple").await.is_none());
        // Expiry is by timestamp comparison, not eviction.
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_insert_overwrites_and_refreshes() {
        let cache = LookupCache::with_ttl(Duration::from_millis(50));
        cache.insert("s1mple", summary("s1mple", "1.40")).await;
        tokio::time::sleep(Duration::from_millis(30)).await;

        cache.insert("s1mple", summary("s1mple", "1.55")).await;
        tokio::time::sleep(Duration::from_millis(30)).await;

        // 60ms after the first insert, but only 30ms after the second.
        let hit = cache.get("s1mple").await.unwrap();
        assert_eq!(hit.average_kd, "1.55");
    }

    #[tokio::test]
    async fn test_key_lock_is_shared_per_key() {
        let cache = LookupCache::new();

        let a = cache.key_lock("S1mple").await;
        let b = cache.key_lock("s1mple").await;
        let other = cache.key_lock("niko").await;

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &other));
    }

    #[tokio::test]
    async fn test_key_lock_serializes_holders() {
        let cache = Arc::new(LookupCache::new());

        let lock = cache.key_lock("s1mple").await;
        let guard = lock.lock().await;

        let contender = cache.key_lock("s1mple").await;
        assert!(contender.try_lock().is_err());

        drop(guard);
        assert!(contender.try_lock().is_ok());
    }
}
