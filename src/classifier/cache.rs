//! Bounded verdict cache.
//!
//! Fixed-capacity map plus an access-order queue of sequence-stamped
//! entries. Eviction pops the queue front and drops keys whose stamp is
//! still current: oldest-inserted-and-least-recently-touched goes first.
//! Not a strict LRU; the goal is hit-rate amortization over repeated
//! comment bodies, not eviction precision.
use std::collections::{HashMap, VecDeque};
use std::hash::Hasher;

use twox_hash::XxHash64;

/// Cache key for a text: 64-bit content hash.
pub fn text_key(text: &str) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(text.as_bytes());
    hasher.finish()
}

#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug)]
pub struct BoundedCache<V> {
    map: HashMap<u64, (V, u64)>,
    order: VecDeque<(u64, u64)>,
    capacity: usize,
    seq: u64,
    hits: u64,
    misses: u64,
}

impl<V: Clone> BoundedCache<V> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "cache capacity must be nonzero");
        Self {
            map: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
            seq: 0,
            hits: 0,
            misses: 0,
        }
    }

    fn touch(&mut self, key: u64) {
        self.seq += 1;
        let seq = self.seq;
        if let Some((_, stamp)) = self.map.get_mut(&key) {
            *stamp = seq;
        }
        self.order.push_back((key, seq));

        // stale stamps accumulate on hot keys; compact before the queue
        // outgrows the map by too much
        if self.order.len() > self.capacity.saturating_mul(4) {
            let map = &self.map;
            self.order
                .retain(|(k, s)| map.get(k).map_or(false, |(_, stamp)| stamp == s));
        }
    }

    pub fn get(&mut self, key: u64) -> Option<V> {
        if self.map.contains_key(&key) {
            self.hits += 1;
            self.touch(key);
            self.map.get(&key).map(|(v, _)| v.clone())
        } else {
            self.misses += 1;
            None
        }
    }

    pub fn insert(&mut self, key: u64, value: V) {
        if !self.map.contains_key(&key) {
            while self.map.len() >= self.capacity {
                match self.order.pop_front() {
                    Some((k, s)) => {
                        if self.map.get(&k).map_or(false, |(_, stamp)| *stamp == s) {
                            self.map.remove(&k);
                        }
                    }
                    None => break,
                }
            }
        }
        self.map.insert(key, (value, 0));
        self.touch(key);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            len: self.map.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_and_miss_counting() {
        let mut cache = BoundedCache::new(4);
        assert_eq!(cache.get(1), None::<u32>);
        cache.insert(1, 10u32);
        assert_eq!(cache.get(1), Some(10));
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.len, 1);
    }

    #[test]
    fn capacity_is_bounded() {
        let mut cache = BoundedCache::new(8);
        for i in 0..100u64 {
            cache.insert(i, i);
        }
        assert!(cache.len() <= 8);
        // the most recent insert always survives
        assert_eq!(cache.get(99), Some(99));
    }

    #[test]
    fn touched_entries_outlive_untouched_ones() {
        let mut cache = BoundedCache::new(3);
        cache.insert(1, 1u32);
        cache.insert(2, 2);
        cache.insert(3, 3);
        // touch 1 so 2 becomes the stalest entry
        cache.get(1);
        cache.insert(4, 4);
        assert_eq!(cache.get(1), Some(1));
        assert_eq!(cache.get(2), None);
    }

    #[test]
    fn same_text_same_key() {
        assert_eq!(text_key("salam"), text_key("salam"));
        assert_ne!(text_key("salam"), text_key("Salam"));
    }
}
