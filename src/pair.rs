//! Two-value helper used by the table's min/max statistics.

use std::fmt;

/// An ordered pair rendered as `<first,second>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pair<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> Pair<A, B> {
    /// Creates a pair from its two values.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: fmt::Display, B: fmt::Display> fmt::Display for Pair<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{},{}>", self.first, self.second)
    }
}
