//! In-memory response cache with time-based expiration
//!
//! This module provides the cache primitives used by the catalog client:
//! a single-entry slot for the full catalog response and a keyed map for
//! per-id and per-query responses. Entries carry the instant they were
//! stored and are considered valid only while `now - stored_at < ttl`.
//! Stale entries are never proactively evicted; they are bypassed on read
//! and overwritten by the next store.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// A cached payload together with its capture timestamp.
#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    stored_at: Instant,
}

impl<V> Entry<V> {
    fn new(value: V) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
        }
    }

    fn is_valid(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }
}

/// A single-entry cache namespace.
///
/// Used for query shapes that have exactly one result per process, such
/// as the full catalog listing.
#[derive(Debug)]
pub struct CacheSlot<V> {
    ttl: Duration,
    entry: Option<Entry<V>>,
}

impl<V: Clone> CacheSlot<V> {
    /// Creates an empty slot whose entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// Returns the cached value if present and not expired.
    pub fn get(&self) -> Option<V> {
        self.entry
            .as_ref()
            .filter(|e| e.is_valid(self.ttl))
            .map(|e| e.value.clone())
    }

    /// Stores a value with the current timestamp, replacing any previous
    /// entry regardless of its validity.
    pub fn insert(&mut self, value: V) {
        self.entry = Some(Entry::new(value));
    }

    /// Empties the slot.
    pub fn clear(&mut self) {
        self.entry = None;
    }
}

/// A keyed cache namespace.
///
/// Used for query shapes parameterized by an id or a query string.
#[derive(Debug)]
pub struct CacheMap<K, V> {
    ttl: Duration,
    entries: HashMap<K, Entry<V>>,
}

impl<K: Eq + Hash, V: Clone> CacheMap<K, V> {
    /// Creates an empty map whose entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Returns the cached value for `key` if present and not expired.
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries
            .get(key)
            .filter(|e| e.is_valid(self.ttl))
            .map(|e| e.value.clone())
    }

    /// Stores a value under `key` with the current timestamp. A stale
    /// entry under the same key is simply overwritten.
    pub fn insert(&mut self, key: K, value: V) {
        self.entries.insert(key, Entry::new(value));
    }

    /// Removes every entry, valid or not.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_round_trip() {
        let mut slot = CacheSlot::new(Duration::from_secs(60));
        assert_eq!(slot.get(), None);

        slot.insert(vec![1, 2, 3]);
        assert_eq!(slot.get(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn slot_entry_expires() {
        // A zero TTL means `elapsed < ttl` can never hold.
        let mut slot = CacheSlot::new(Duration::ZERO);
        slot.insert("payload");
        assert_eq!(slot.get(), None);
    }

    #[test]
    fn slot_insert_replaces_previous_entry() {
        let mut slot = CacheSlot::new(Duration::from_secs(60));
        slot.insert("first");
        slot.insert("second");
        assert_eq!(slot.get(), Some("second"));
    }

    #[test]
    fn slot_clear_empties() {
        let mut slot = CacheSlot::new(Duration::from_secs(60));
        slot.insert(42);
        slot.clear();
        assert_eq!(slot.get(), None);
    }

    #[test]
    fn map_round_trip_per_key() {
        let mut map = CacheMap::new(Duration::from_secs(60));
        map.insert(1u32, "one");
        map.insert(2u32, "two");

        assert_eq!(map.get(&1), Some("one"));
        assert_eq!(map.get(&2), Some("two"));
        assert_eq!(map.get(&3), None);
    }

    #[test]
    fn map_entry_expires() {
        let mut map = CacheMap::new(Duration::ZERO);
        map.insert("key", 1);
        assert_eq!(map.get(&"key"), None);
    }

    #[test]
    fn map_clear_empties_all_keys() {
        let mut map = CacheMap::new(Duration::from_secs(60));
        map.insert(1u32, "one");
        map.insert(2u32, "two");
        map.clear();
        assert_eq!(map.get(&1), None);
        assert_eq!(map.get(&2), None);
    }
}
