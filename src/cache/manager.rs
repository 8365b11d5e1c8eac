//! In-memory response cache with lazy expiry
//!
//! Provides a `ResponseCache` that stores JSON payloads under a string key
//! together with the time they were stored. Entries older than `CACHE_TTL`
//! read as absent but stay in the map until overwritten.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::clock::{Clock, SystemClock};

/// How long a cached payload is considered fresh
pub const CACHE_TTL: std::time::Duration = std::time::Duration::from_secs(5 * 60);

/// A single cached payload
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The cached payload
    payload: Value,
    /// When the payload was stored
    stored_at: DateTime<Utc>,
}

/// Caches API payloads keyed by logical resource name
///
/// The cache is unbounded: keys come from a small fixed set known at the call
/// sites. Share it between tasks with `Arc<ResponseCache>`.
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("entries", &self.entry_count())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl ResponseCache {
    /// Creates an empty cache using the wall clock and the default TTL
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty cache driven by a custom clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            ttl: Duration::seconds(CACHE_TTL.as_secs() as i64),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns the cached payload for `key` if it is still fresh
    ///
    /// Returns `None` both when the key was never stored and when the entry
    /// has outlived the TTL.
    pub fn get(&self, key: &str) -> Option<Value> {
        let now = self.clock.now();
        let entries = self.lock();
        let entry = entries.get(key)?;

        if now - entry.stored_at < self.ttl {
            Some(entry.payload.clone())
        } else {
            None
        }
    }

    /// Stores `payload` under `key`, replacing any previous entry
    pub fn set(&self, key: &str, payload: Value) {
        let entry = CacheEntry {
            payload,
            stored_at: self.clock.now(),
        };
        self.lock().insert(key.to_string(), entry);
    }

    /// Number of entries physically held, expired ones included
    pub fn entry_count(&self) -> usize {
        self.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use serde_json::json;

    fn ttl() -> Duration {
        Duration::seconds(CACHE_TTL.as_secs() as i64)
    }

    fn create_test_cache() -> (ResponseCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let cache = ResponseCache::with_clock(clock.clone());
        (cache, clock)
    }

    #[test]
    fn test_get_returns_none_for_missing_key() {
        let (cache, _clock) = create_test_cache();

        assert!(cache.get("never-set").is_none(), "Should return None for missing key");
    }

    #[test]
    fn test_set_then_get_returns_payload() {
        let (cache, _clock) = create_test_cache();
        let payload = json!([{ "id": 1, "status": "open" }]);

        cache.set("my-tickets", payload.clone());

        assert_eq!(cache.get("my-tickets"), Some(payload));
    }

    #[test]
    fn test_entry_is_fresh_just_before_ttl() {
        let (cache, clock) = create_test_cache();
        cache.set("my-tickets", json!(["a"]));

        clock.advance(ttl() - Duration::milliseconds(1));

        assert_eq!(cache.get("my-tickets"), Some(json!(["a"])));
    }

    #[test]
    fn test_entry_expires_at_ttl_but_stays_present() {
        let (cache, clock) = create_test_cache();
        cache.set("my-tickets", json!(["a"]));

        clock.advance(ttl());

        assert!(cache.get("my-tickets").is_none(), "Entry at TTL should read as absent");
        assert_eq!(cache.entry_count(), 1, "Expired entry is not evicted");
    }

    #[test]
    fn test_set_overwrites_and_restarts_ttl() {
        let (cache, clock) = create_test_cache();
        cache.set("my-tickets", json!("first"));

        clock.advance(Duration::minutes(4));
        cache.set("my-tickets", json!("second"));
        clock.advance(Duration::minutes(4));

        assert_eq!(cache.get("my-tickets"), Some(json!("second")));
        assert_eq!(cache.entry_count(), 1);
    }

    #[test]
    fn test_keys_are_independent() {
        let (cache, clock) = create_test_cache();
        cache.set("my-tickets", json!(1));
        clock.advance(Duration::minutes(3));
        cache.set("search", json!(2));
        clock.advance(Duration::minutes(3));

        assert!(cache.get("my-tickets").is_none());
        assert_eq!(cache.get("search"), Some(json!(2)));
    }

    #[test]
    fn test_new_uses_wall_clock() {
        let cache = ResponseCache::new();
        cache.set("k", json!({ "x": true }));

        assert_eq!(cache.get("k"), Some(json!({ "x": true })));
    }
}
