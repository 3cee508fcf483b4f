//! Set with boolean algebra, backed by a [`ChainedHashTable`].
//!
//! Every operation goes through the table's public API; the set never
//! reaches into buckets or trees.

use std::fmt;
use std::hash::{BuildHasher, Hash};

use fnv::FnvBuildHasher;

use crate::table::{self, ChainedHashTable};

/// Initial capacity of a freshly created set's table.
const INITIAL_CAPACITY: usize = 5;

/// A set of totally ordered, hashable values.
///
/// # Example
///
/// ```rust
/// use forest_chain::ForestSet;
///
/// let a: ForestSet<i32> = [1, 2, 3, 5, 7].into_iter().collect();
/// let b: ForestSet<i32> = [2, 4, 5, 6].into_iter().collect();
///
/// let common = a.intersection(&b);
/// assert_eq!(common.len(), 2);
/// assert!(common.contains(&2) && common.contains(&5));
/// assert!(common.is_subset(&b));
/// ```
pub struct ForestSet<T, S = FnvBuildHasher> {
    table: ChainedHashTable<T, S>,
}

impl<T> ForestSet<T, FnvBuildHasher> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::with_hasher(FnvBuildHasher::default())
    }
}

impl<T, S> ForestSet<T, S> {
    /// Creates an empty set with an explicit hasher.
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            table: ChainedHashTable::with_hasher(INITIAL_CAPACITY, hasher),
        }
    }

    /// Number of values in the set.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if the set holds no values.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Iterates the set's values in the table's storage order.
    pub fn iter(&self) -> table::Iter<'_, T> {
        self.table.iter()
    }

    /// All values, in the table's storage order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.table.to_vec()
    }
}

impl<T: Ord + Hash, S: BuildHasher> ForestSet<T, S> {
    /// Adds a value; false if it was already present.
    pub fn add(&mut self, value: T) -> bool {
        self.table.add(value)
    }

    /// Returns true if the value is present.
    pub fn contains(&self, value: &T) -> bool {
        self.table.contains(value)
    }

    /// Removes a value; false if it was absent.
    pub fn remove(&mut self, value: &T) -> bool {
        self.table.remove(value)
    }

    /// Adds every value from the iterator, returning how many were newly
    /// inserted (duplicates are not counted).
    pub fn add_all(&mut self, values: impl IntoIterator<Item = T>) -> usize {
        let mut added = 0;
        for value in values {
            if self.add(value) {
                added += 1;
            }
        }
        added
    }

    /// Returns true if every value of `self` is in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.iter().all(|value| other.contains(value))
    }

    /// Returns true if the two sets share no value.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.iter().all(|value| !other.contains(value))
    }
}

impl<T: Ord + Hash + Clone, S: BuildHasher + Default> ForestSet<T, S> {
    /// Values present in both sets. Operands are untouched.
    pub fn intersection(&self, other: &Self) -> Self {
        let mut out = Self::with_hasher(S::default());
        for value in other.iter() {
            if self.contains(value) {
                out.add(value.clone());
            }
        }
        out
    }

    /// Values present in either set. Operands are untouched.
    pub fn union(&self, other: &Self) -> Self {
        let mut out = Self::with_hasher(S::default());
        for value in self.iter().chain(other.iter()) {
            out.add(value.clone());
        }
        out
    }

    /// Values of `self` not in `other`. Operands are untouched.
    pub fn difference(&self, other: &Self) -> Self {
        let mut out = Self::with_hasher(S::default());
        for value in self.iter() {
            if !other.contains(value) {
                out.add(value.clone());
            }
        }
        out
    }

    /// Values in exactly one of the two sets. Operands are untouched.
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let mut out = self.difference(other);
        for value in other.iter() {
            if !self.contains(value) {
                out.add(value.clone());
            }
        }
        out
    }
}

impl<T> Default for ForestSet<T, FnvBuildHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Hash, S: BuildHasher + Default> FromIterator<T> for ForestSet<T, S> {
    fn from_iter<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut set = Self::with_hasher(S::default());
        set.add_all(values);
        set
    }
}

impl<T: Clone, S: Clone> Clone for ForestSet<T, S> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

impl<T: fmt::Debug, S> fmt::Debug for ForestSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, S> fmt::Display for ForestSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.table.fmt(f)
    }
}
