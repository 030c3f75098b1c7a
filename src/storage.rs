use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    hash::Hash,
    sync::Mutex,
    time::Duration,
};
use tokio::time::Instant;

use crate::{
    config::Settings,
    ncaa::{
        categories::StatCategory, normalize::StatLeaders, rankings::RankingsSnapshot,
        scoreboard::{GameDate, Scoreboard},
    },
};

#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
    // Monotonic twin of cached_at, used for freshness checks
    stored: Instant,
}

/// Result of a cache lookup. Stale entries are still handed out so that
/// callers may fall back on them.
#[derive(Debug, Clone)]
pub struct Lookup<T> {
    pub entry: CacheEntry<T>,
    pub fresh: bool,
}

/// One kind of cached response, keyed by `K`. Entries are only ever
/// replaced wholesale, never evicted.
pub struct CacheSlot<K, T> {
    entries: Mutex<HashMap<K, CacheEntry<T>>>,
    ttl: Duration,
    enabled: bool,
}

impl<K: Eq + Hash, T: Clone> CacheSlot<K, T> {
    fn new(ttl: Duration, enabled: bool) -> Self {
        CacheSlot {
            entries: Mutex::new(HashMap::new()),
            ttl,
            enabled,
        }
    }

    /// An entry is fresh while younger than the TTL. A disabled cache never
    /// reports fresh entries.
    pub fn get(&self, key: &K) -> Option<Lookup<T>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(key).map(|entry| Lookup {
            fresh: self.enabled && entry.stored.elapsed() < self.ttl,
            entry: entry.clone(),
        })
    }

    pub fn put(&self, key: K, data: T) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(
            key,
            CacheEntry {
                data,
                cached_at: Utc::now(),
                stored: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory copies of the last successful upstream responses.
pub struct ResponseCache {
    pub rankings: CacheSlot<(), RankingsSnapshot>,
    pub stats: CacheSlot<StatCategory, StatLeaders>,
    pub games: CacheSlot<GameDate, Scoreboard>,
}

impl ResponseCache {
    pub fn new(ttl: Duration, enabled: bool) -> ResponseCache {
        ResponseCache {
            rankings: CacheSlot::new(ttl, enabled),
            stats: CacheSlot::new(ttl, enabled),
            games: CacheSlot::new(ttl, enabled),
        }
    }

    pub fn from_settings(settings: &Settings) -> ResponseCache {
        ResponseCache::new(settings.cache_ttl(), settings.cache_enabled)
    }
}
