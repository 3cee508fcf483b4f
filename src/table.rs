//! Separate-chaining hash table whose collision chains are [`Bst`] trees.
//!
//! The table owns a fixed-length array of bucket slots, each either empty or
//! holding one tree. A value's bucket index is its 64-bit hash reduced modulo
//! the current capacity; the hash function is injected through
//! [`BuildHasher`] and defaults to FNV-1a so placement is deterministic.
//!
//! Capacity management:
//! - the capacity floor is 2 (requests below it are raised to the floor);
//! - after a successful insert, a load of 80% or more doubles the capacity;
//! - [`ChainedHashTable::rehash`] accepts an arbitrary target and keeps
//!   doubling it until the load would drop below 80%, failing without any
//!   mutation if the target is below the floor or doubling would overflow.
//!
//! A rehash drains the old buckets in ascending index order, each tree in
//! pre-order, and re-inserts every value under the new capacity. Replaying
//! pre-order means values that land in the same bucket again rebuild the
//! same tree shape.

use std::fmt::{self, Write as _};
use std::hash::{BuildHasher, Hash, Hasher};

use fnv::FnvBuildHasher;

use crate::pair::Pair;
use crate::tree::{self, Bst};

/// Smallest allowed bucket-array length.
const MIN_CAPACITY: usize = 2;

/// Growth threshold, in percent of capacity.
const LOAD_LIMIT_PERCENT: u128 = 80;

/// A hash table using separate chaining with one binary search tree per
/// bucket.
///
/// Values must be totally ordered (for the per-bucket trees) and hashable
/// (for bucket addressing). All failure modes are boolean no-op results;
/// no operation panics.
///
/// # Example
///
/// ```rust
/// use forest_chain::ChainedHashTable;
///
/// let mut table: ChainedHashTable<&str> = ChainedHashTable::new(10);
/// assert!(table.add("a"));
/// assert!(table.add("computer"));
/// assert!(!table.add("a")); // duplicate
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.capacity(), 10);
/// assert!(table.contains(&"computer"));
/// assert!(table.remove(&"a"));
/// ```
pub struct ChainedHashTable<T, S = FnvBuildHasher> {
    buckets: Vec<Option<Bst<T>>>,
    len: usize,
    hasher: S,
}

impl<T> ChainedHashTable<T, FnvBuildHasher> {
    /// Creates a table with the requested capacity (raised to the floor of 2
    /// if below it) and the default FNV hasher.
    pub fn new(capacity: usize) -> Self {
        Self::with_hasher(capacity, FnvBuildHasher::default())
    }
}

impl<T, S> ChainedHashTable<T, S> {
    /// Creates a table with the requested capacity and an explicit hasher.
    pub fn with_hasher(capacity: usize, hasher: S) -> Self {
        let capacity = capacity.max(MIN_CAPACITY);
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, || None);
        Self {
            buckets,
            len: 0,
            hasher,
        }
    }

    /// Total number of values across all buckets.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the table holds no values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current bucket-array length.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Iterates all values: ascending bucket index, pre-order within each
    /// bucket. This is the same order [`ChainedHashTable::to_vec`] produces
    /// and the order a rehash replays.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buckets: self.buckets.iter(),
            current: None,
        }
    }

    /// All values in iteration order. The result length equals
    /// [`ChainedHashTable::len`].
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Per-bucket report. Each line is `[index]: ` followed by the bucket
    /// tree's in-order values, the word `empty` for a slot holding a tree
    /// with no values, or `null` for a slot with no tree at all. With
    /// `verbose`, each live bucket also reports its tree's size, height,
    /// and leaf count.
    pub fn debug_string(&self, verbose: bool) -> String
    where
        T: fmt::Display,
    {
        let mut out = String::new();
        for (index, slot) in self.buckets.iter().enumerate() {
            match slot {
                Some(bst) if !bst.is_empty() => {
                    let rendered = bst.to_string();
                    let _ = writeln!(out, "[{index}]: {}", rendered.trim());
                    if verbose {
                        let _ = writeln!(out, "\t tree size:{}", bst.len());
                        let _ = writeln!(out, "\t tree height:{}", bst.height());
                        let _ = writeln!(out, "\t number of leaves:{}", bst.num_leaves());
                    }
                }
                Some(_) => {
                    let _ = writeln!(out, "[{index}]: empty");
                }
                None => {
                    let _ = writeln!(out, "[{index}]: null");
                }
            }
        }
        out.trim().to_string()
    }

    /// Average bucket-tree height. With `non_empty_only`, buckets without
    /// values are skipped and −1.0 is returned when no bucket qualifies;
    /// otherwise every bucket counts and an empty one contributes −1.
    pub fn avg_tree_height(&self, non_empty_only: bool) -> f64 {
        self.bucket_average(non_empty_only, -1, -1.0, |bst| i64::from(bst.height()))
    }

    /// Average bucket-tree size. With `non_empty_only`, 0.0 is returned when
    /// no bucket qualifies; otherwise an empty bucket contributes 0.
    pub fn avg_tree_size(&self, non_empty_only: bool) -> f64 {
        self.bucket_average(non_empty_only, 0, 0.0, |bst| bst.len() as i64)
    }

    /// Average bucket-tree leaf count, with the same conventions as
    /// [`ChainedHashTable::avg_tree_size`].
    pub fn avg_num_leaves(&self, non_empty_only: bool) -> f64 {
        self.bucket_average(non_empty_only, 0, 0.0, |bst| bst.num_leaves() as i64)
    }

    /// Minimum and maximum bucket-tree size across buckets.
    pub fn min_max_tree_size(&self, non_empty_only: bool) -> Pair<usize, usize> {
        let (min, max) = self.bucket_min_max(non_empty_only, 0, |bst| bst.len() as i64);
        Pair::new(min as usize, max as usize)
    }

    /// Minimum and maximum bucket-tree height across buckets. An empty
    /// bucket counts as height −1 unless `non_empty_only` is set.
    pub fn min_max_tree_height(&self, non_empty_only: bool) -> Pair<i32, i32> {
        let (min, max) = self.bucket_min_max(non_empty_only, -1, |bst| i64::from(bst.height()));
        Pair::new(min as i32, max as i32)
    }

    /// Minimum and maximum bucket-tree leaf count across buckets.
    pub fn min_max_num_leaves(&self, non_empty_only: bool) -> Pair<usize, usize> {
        let (min, max) = self.bucket_min_max(non_empty_only, 0, |bst| bst.num_leaves() as i64);
        Pair::new(min as usize, max as usize)
    }

    fn bucket_average(
        &self,
        non_empty_only: bool,
        empty_value: i64,
        sentinel: f64,
        metric: impl Fn(&Bst<T>) -> i64,
    ) -> f64 {
        let mut count = 0usize;
        let mut total = 0i64;
        for slot in &self.buckets {
            match slot {
                Some(bst) if !bst.is_empty() => {
                    count += 1;
                    total += metric(bst);
                }
                _ if non_empty_only => {}
                _ => {
                    count += 1;
                    total += empty_value;
                }
            }
        }
        if count == 0 {
            sentinel
        } else {
            total as f64 / count as f64
        }
    }

    fn bucket_min_max(
        &self,
        non_empty_only: bool,
        empty_value: i64,
        metric: impl Fn(&Bst<T>) -> i64,
    ) -> (i64, i64) {
        let mut bounds: Option<(i64, i64)> = None;
        for slot in &self.buckets {
            let current = match slot {
                Some(bst) if !bst.is_empty() => metric(bst),
                _ if non_empty_only => continue,
                _ => empty_value,
            };
            bounds = Some(match bounds {
                None => (current, current),
                Some((min, max)) => (min.min(current), max.max(current)),
            });
        }
        bounds.unwrap_or((empty_value, empty_value))
    }
}

impl<T: Ord + Hash, S: BuildHasher> ChainedHashTable<T, S> {
    /// Adds a value. Returns false (and changes nothing) if the value's
    /// bucket tree already contains it.
    ///
    /// A successful insert that pushes the load to 80% or more of capacity
    /// doubles the capacity. The growth result is ignored: a table that
    /// cannot grow keeps accepting values at the old capacity.
    pub fn add(&mut self, value: T) -> bool {
        let index = Self::bucket_of(&self.hasher, &value, self.buckets.len());
        if !self.buckets[index].get_or_insert_with(Bst::new).insert(value) {
            return false;
        }
        self.len += 1;
        if Self::over_load_limit(self.len, self.buckets.len()) {
            let _ = self.rehash(self.buckets.len() * 2);
        }
        true
    }

    /// Returns true if the value is present. An empty bucket slot answers
    /// false without allocating a tree.
    pub fn contains(&self, value: &T) -> bool {
        let index = Self::bucket_of(&self.hasher, value, self.buckets.len());
        self.buckets[index]
            .as_ref()
            .is_some_and(|bst| bst.contains(value))
    }

    /// Removes a value. Returns false (and changes nothing) if absent.
    pub fn remove(&mut self, value: &T) -> bool {
        let index = Self::bucket_of(&self.hasher, value, self.buckets.len());
        match self.buckets[index].as_mut() {
            Some(bst) => {
                if bst.remove(value) {
                    self.len -= 1;
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// Rebuilds the table at a new capacity, re-addressing every value.
    ///
    /// Fails (returning false, with the table untouched) if `new_capacity`
    /// is below the floor of 2, or if satisfying the load limit would
    /// require doubling past `usize::MAX`. While the load at the target
    /// capacity would be 80% or more, the target is doubled.
    ///
    /// Values are re-inserted in ascending old-bucket order, each tree
    /// drained in pre-order. The value count is unchanged.
    pub fn rehash(&mut self, new_capacity: usize) -> bool {
        if new_capacity < MIN_CAPACITY {
            return false;
        }
        let mut capacity = new_capacity;
        while Self::over_load_limit(self.len, capacity) {
            capacity = match capacity.checked_mul(2) {
                Some(doubled) => doubled,
                None => return false,
            };
        }

        let mut fresh: Vec<Option<Bst<T>>> = Vec::with_capacity(capacity);
        fresh.resize_with(capacity, || None);
        let old = std::mem::replace(&mut self.buckets, fresh);
        for bst in old.into_iter().flatten() {
            for value in bst.into_preorder() {
                let index = Self::bucket_of(&self.hasher, &value, capacity);
                // Duplicates cannot occur here, and the load was settled
                // above, so plain tree inserts suffice.
                self.buckets[index].get_or_insert_with(Bst::new).insert(value);
            }
        }
        true
    }

    fn bucket_of(hasher: &S, value: &T, capacity: usize) -> usize {
        let mut state = hasher.build_hasher();
        value.hash(&mut state);
        // Unsigned modulo cannot invert sign, unlike abs-of-hash schemes
        // which break on the most negative representable hash.
        (state.finish() % capacity as u64) as usize
    }

    fn over_load_limit(len: usize, capacity: usize) -> bool {
        len as u128 * 100 / capacity as u128 >= LOAD_LIMIT_PERCENT
    }
}

impl<T: Ord + Hash, S: BuildHasher + Default> Default for ChainedHashTable<T, S> {
    fn default() -> Self {
        Self::with_hasher(MIN_CAPACITY, S::default())
    }
}

impl<T: Clone, S: Clone> Clone for ChainedHashTable<T, S> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            len: self.len,
            hasher: self.hasher.clone(),
        }
    }
}

impl<T: fmt::Debug, S> fmt::Debug for ChainedHashTable<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, S> fmt::Display for ChainedHashTable<T, S> {
    /// Concatenation of every bucket tree's in-order rendering (ascending
    /// bucket index), trimmed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for bst in self.buckets.iter().flatten() {
            write!(out, "{bst}")?;
        }
        f.write_str(out.trim())
    }
}

/// Iterator over a table's values: ascending bucket index, pre-order within
/// each bucket.
pub struct Iter<'a, T> {
    buckets: std::slice::Iter<'a, Option<Bst<T>>>,
    current: Option<tree::Iter<'a, T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        loop {
            if let Some(current) = self.current.as_mut() {
                if let Some(value) = current.next() {
                    return Some(value);
                }
            }
            match self.buckets.next()? {
                Some(bst) => self.current = Some(bst.iter()),
                None => continue,
            }
        }
    }
}
