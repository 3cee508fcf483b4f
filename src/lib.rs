//! # forest-chain
//!
//! A hash table using separate chaining where every collision chain is an
//! unbalanced binary search tree (a "forest" of per-bucket trees), plus a
//! set with boolean algebra built on top of it.
//!
//! The table grows when an insert pushes the load to 80% of capacity, and
//! supports rehashing to an arbitrary capacity; a rehash drains buckets in
//! ascending index order, each tree in pre-order, so values that collide
//! again rebuild the same tree shape. Bucket addressing is `hash mod
//! capacity` over an injected [`std::hash::BuildHasher`], defaulting to
//! FNV-1a for reproducible placement.
//!
//! ## Example
//!
//! ```rust
//! use forest_chain::ChainedHashTable;
//!
//! let mut table: ChainedHashTable<i64> = ChainedHashTable::new(5);
//! assert!(table.add(105));
//! assert!(table.add(26));
//! assert!(table.add(11));
//! assert_eq!(table.capacity(), 5);
//!
//! // The fourth value reaches 80% load and the table doubles.
//! assert!(table.add(55));
//! assert_eq!(table.capacity(), 10);
//! assert_eq!(table.len(), 4);
//! ```

#![deny(unsafe_op_in_unsafe_fn)]

pub mod pair;
pub mod set;
pub mod table;
pub mod tree;

pub use pair::Pair;
pub use set::ForestSet;
pub use table::ChainedHashTable;
pub use tree::Bst;

#[cfg(test)]
mod proptests;
