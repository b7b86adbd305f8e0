//! Sharded map for concurrent in-place accumulation.
//!
//! The key space is split into a fixed number of buckets, each guarded by
//! its own lock. Workers touching different buckets never contend, so lock
//! contention is bounded by the bucket count rather than serialised through
//! a single mutex.
//!
//! # Examples
//!
//! ```
//! use spyglass::util::ConcurrentMap;
//!
//! let map: ConcurrentMap<i32, f64> = ConcurrentMap::new(4);
//! *map.access(7) += 0.5;
//! *map.access(7) += 0.25;
//! map.erase(&3);
//!
//! let merged = map.build_ordinary_map();
//! assert_eq!(merged[&7], 0.75);
//! ```

use std::collections::BTreeMap;
use std::hash::Hash;

use ahash::RandomState;
use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

/// A key → value map split into independently locked buckets.
pub struct ConcurrentMap<K, V> {
    buckets: Vec<Mutex<BTreeMap<K, V>>>,
    hasher: RandomState,
}

impl<K, V> ConcurrentMap<K, V>
where
    K: Ord + Hash,
{
    /// Create a map with `bucket_count` buckets (at least one).
    pub fn new(bucket_count: usize) -> Self {
        let bucket_count = bucket_count.max(1);
        ConcurrentMap {
            buckets: (0..bucket_count)
                .map(|_| Mutex::new(BTreeMap::new()))
                .collect(),
            hasher: RandomState::new(),
        }
    }

    /// Number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn bucket(&self, key: &K) -> &Mutex<BTreeMap<K, V>> {
        let index = self.hasher.hash_one(key) % self.buckets.len() as u64;
        &self.buckets[index as usize]
    }

    /// Exclusive access to the value for `key`, inserting `V::default()` first
    /// if the key is absent.
    ///
    /// The owning bucket stays locked until the returned guard is dropped.
    /// Holding a guard while accessing another key from the same thread can
    /// deadlock if both keys share a bucket.
    pub fn access(&self, key: K) -> MappedMutexGuard<'_, V>
    where
        V: Default,
    {
        let guard = self.bucket(&key).lock();
        MutexGuard::map(guard, |bucket| bucket.entry(key).or_default())
    }

    /// Remove `key` if present, returning its value.
    pub fn erase(&self, key: &K) -> Option<V> {
        self.bucket(key).lock().remove(key)
    }

    /// Total number of keys. Locks every bucket in turn, so the count is only
    /// exact when no other thread is writing.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merge all buckets into one ordered map.
    ///
    /// Consumes the map, so it can only be called once every worker has let
    /// go of it.
    pub fn build_ordinary_map(self) -> BTreeMap<K, V> {
        let mut result = BTreeMap::new();
        for bucket in self.buckets {
            result.extend(bucket.into_inner());
        }
        result
    }
}

impl<K, V> Default for ConcurrentMap<K, V>
where
    K: Ord + Hash,
{
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rayon::prelude::*;

    #[test]
    fn test_access_inserts_default() {
        let map: ConcurrentMap<i32, f64> = ConcurrentMap::new(3);
        assert!(map.is_empty());

        {
            let value = map.access(5);
            assert_eq!(*value, 0.0);
        }
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_zero_buckets_clamped() {
        let map: ConcurrentMap<i32, i32> = ConcurrentMap::new(0);
        assert_eq!(map.bucket_count(), 1);
        *map.access(1) += 1;
        assert_eq!(map.build_ordinary_map()[&1], 1);
    }

    #[test]
    fn test_erase() {
        let map: ConcurrentMap<i32, i32> = ConcurrentMap::new(4);
        *map.access(1) += 10;
        *map.access(2) += 20;

        assert_eq!(map.erase(&1), Some(10));
        assert_eq!(map.erase(&1), None);
        assert_eq!(map.erase(&99), None);

        let merged = map.build_ordinary_map();
        assert_eq!(merged.into_iter().collect::<Vec<_>>(), vec![(2, 20)]);
    }

    #[test]
    fn test_build_ordinary_map_is_sorted() {
        let map: ConcurrentMap<i32, i32> = ConcurrentMap::new(7);
        for key in [42, -3, 17, 0, 99, 5] {
            *map.access(key) += key;
        }
        let keys: Vec<i32> = map.build_ordinary_map().into_keys().collect();
        assert_eq!(keys, vec![-3, 0, 5, 17, 42, 99]);
    }

    #[test]
    fn test_concurrent_increments() {
        let map: ConcurrentMap<i32, u64> = ConcurrentMap::new(8);

        (0..10_000u64).into_par_iter().for_each(|i| {
            *map.access((i % 100) as i32) += 1;
        });

        let merged = map.build_ordinary_map();
        assert_eq!(merged.len(), 100);
        assert!(merged.values().all(|&count| count == 100));
    }

    #[test]
    fn test_concurrent_erase_and_access() {
        let map: ConcurrentMap<i32, u64> = ConcurrentMap::new(4);

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for key in 0..1000 {
                    *map.access(key) += 1;
                }
            });
            scope.spawn(|| {
                for key in 1000..2000 {
                    *map.access(key) += 1;
                    map.erase(&key);
                }
            });
        });

        let merged = map.build_ordinary_map();
        assert_eq!(merged.len(), 1000);
        assert!(merged.keys().all(|&key| key < 1000));
    }
}
