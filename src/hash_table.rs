//! HashTable: string keys, separate chaining, growth by doubling.

use crate::bucket::{Bucket, Chain};
use crate::hash::{hash_key, FnvBuildHasher};
use crate::reentrancy::BusyFlag;
use crate::value::{Custom, Value};
use core::fmt;
use core::hash::BuildHasher;

/// Slot count of a freshly created table.
pub const INITIAL_CAPACITY: usize = 8;

/// Growth threshold on `count / capacity`, checked before each insert.
pub const MAX_LOAD_FACTOR: f64 = 0.5;

/// String-keyed hash table with separate chaining.
///
/// Keys are copied in on first insertion; values are small `Copy` tagged
/// unions. Growth doubles the bucket array and the table never shrinks.
pub struct HashTable<S = FnvBuildHasher> {
    hasher: S,
    buckets: Box<[Chain]>,
    count: usize,
    reentrancy: BusyFlag,
}

fn empty_buckets(size: usize) -> Box<[Chain]> {
    (0..size).map(|_| Chain::new()).collect()
}

#[inline]
fn bucket_index<S: BuildHasher>(hasher: &S, key: &str, size: usize) -> usize {
    (hash_key(hasher, key) % size as u64) as usize
}

/// Double `buckets` and relink every node into the new array.
///
/// Nodes move as-is: no key or value is reallocated. Every key is hashed
/// before the first node is unlinked, so a hasher that panics leaves the
/// old array intact and `count` accurate.
fn grow<S: BuildHasher>(buckets: &mut Box<[Chain]>, hasher: &S) {
    let new_size = buckets.len() * 2;
    let targets: Vec<usize> = buckets
        .iter()
        .flat_map(Chain::iter)
        .map(|node| bucket_index(hasher, &node.key, new_size))
        .collect();

    // No user code runs past this point. Nodes come off in the same order
    // `targets` was built in.
    let mut grown = empty_buckets(new_size);
    let mut moved = 0;
    for chain in buckets.iter_mut() {
        while let Some(node) = chain.pop_front() {
            grown[targets[moved]].push_back(node);
            moved += 1;
        }
    }
    debug_assert_eq!(moved, targets.len());
    *buckets = grown;
}

impl HashTable {
    /// Empty table with [`INITIAL_CAPACITY`] buckets and the FNV hasher.
    pub fn new() -> Self {
        Self::with_hasher(FnvBuildHasher)
    }
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: BuildHasher> HashTable<S> {
    /// Empty table using `hasher` to place keys.
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            buckets: empty_buckets(INITIAL_CAPACITY),
            count: 0,
            reentrancy: BusyFlag::new(),
        }
    }

    /// Number of live keys.
    pub fn count(&self) -> usize {
        self.count
    }

    /// `true` when no key is stored.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Current number of buckets. Exposed for diagnostics; it only grows.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// `count / capacity`, the ratio the growth check compares against
    /// [`MAX_LOAD_FACTOR`].
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.buckets.len() as f64
    }

    #[inline]
    fn index_of(&self, key: &str) -> usize {
        bucket_index(&self.hasher, key, self.buckets.len())
    }

    /// Store `value` under `key`, copying the key on first insertion.
    ///
    /// Returns `true` if the key was new and `false` if an existing value
    /// was overwritten. Growth is decided on the count before this insert,
    /// so it can happen even when the key already exists.
    pub fn insert(&mut self, key: &str, value: Value) -> bool {
        let _g = self.reentrancy.enter();
        if self.load_factor() >= MAX_LOAD_FACTOR {
            let old_capacity = self.buckets.len();
            grow(&mut self.buckets, &self.hasher);
            tracing::debug!(
                count = self.count,
                old_capacity,
                new_capacity = self.buckets.len(),
                "hash table grown"
            );
        }

        let index = self.index_of(key);
        let slot = self.buckets[index].slot_mut(key);
        match slot {
            Some(node) => {
                node.value = value;
                false
            }
            None => {
                *slot = Some(Bucket::new(key, value));
                self.count += 1;
                true
            }
        }
    }

    pub fn set_nil(&mut self, key: &str) -> bool {
        self.insert(key, Value::nil())
    }

    pub fn set_boolean(&mut self, key: &str, b: bool) -> bool {
        self.insert(key, Value::boolean(b))
    }

    pub fn set_integer(&mut self, key: &str, i: i64) -> bool {
        self.insert(key, Value::integer(i))
    }

    pub fn set_real(&mut self, key: &str, r: f64) -> bool {
        self.insert(key, Value::real(r))
    }

    /// Store a non-owning handle. The table never frees what it points to,
    /// not on overwrite, `remove`, or drop.
    pub fn set_custom(&mut self, key: &str, c: Custom) -> bool {
        self.insert(key, Value::custom(c))
    }

    /// Remove `key`; `false` if it was not present.
    pub fn remove(&mut self, key: &str) -> bool {
        let _g = self.reentrancy.enter();
        let index = self.index_of(key);
        match self.buckets[index].remove(key) {
            Some(_node) => {
                self.count -= 1;
                true
            }
            None => {
                tracing::trace!(key, "remove: key not present");
                false
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        let _g = self.reentrancy.enter();
        let index = self.index_of(key);
        self.buckets[index].find(key).is_some()
    }

    /// Copy of the value stored under `key`, or `Value::Nil` when absent.
    ///
    /// Absence and a stored `Nil` read the same; use [`contains`](Self::contains)
    /// to tell them apart.
    pub fn get(&self, key: &str) -> Value {
        let _g = self.reentrancy.enter();
        let index = self.index_of(key);
        self.buckets[index]
            .find(key)
            .map_or(Value::Nil, |node| node.value)
    }
}

impl<S> fmt::Debug for HashTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("count", &self.count)
            .field("capacity", &self.buckets.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
impl<S: BuildHasher> HashTable<S> {
    /// Walk every chain and assert the structural invariants: each key sits
    /// in the bucket its hash selects, appears once overall, and `count`
    /// matches the number of nodes.
    pub(crate) fn assert_invariants(&self) {
        let mut seen = std::collections::HashSet::new();
        for (i, chain) in self.buckets.iter().enumerate() {
            for key in chain.keys() {
                assert_eq!(
                    self.index_of(key),
                    i,
                    "key {key:?} in wrong bucket"
                );
                assert!(seen.insert(key.to_owned()), "key {key:?} linked twice");
            }
        }
        assert_eq!(seen.len(), self.count, "count out of sync with chains");
        assert!(self.buckets.len().is_power_of_two());
    }

    pub(crate) fn chain_keys(&self, index: usize) -> Vec<&str> {
        self.buckets[index].keys()
    }
}
