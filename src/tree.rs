//! Unbalanced binary search tree used as a collision chain.
//!
//! Each bucket of [`crate::ChainedHashTable`] holds one of these trees. The
//! tree owns its nodes exclusively (`Option<Box<Node>>` links, no sharing)
//! and performs no rebalancing: its shape is entirely determined by the
//! insertion order. Duplicates are rejected by comparison, so the tree
//! doubles as a set of its bucket's values.
//!
//! Two traversal orders are part of the contract:
//! - **in-order** (ascending) for the `Display` rendering, and
//! - **pre-order** (root, left, right) for extraction via [`Bst::to_vec`] /
//!   [`Bst::into_preorder`], which is the order the table replays when it
//!   rehashes.

use std::cmp::Ordering;
use std::fmt;

struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

type Link<T> = Option<Box<Node<T>>>;

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

/// An unbalanced binary search tree with a cached node count.
///
/// # Example
///
/// ```rust
/// use forest_chain::Bst;
///
/// let mut tree = Bst::new();
/// assert!(tree.insert(2));
/// assert!(tree.insert(1));
/// assert!(tree.insert(3));
/// assert!(!tree.insert(2)); // duplicate
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.to_string(), "1 2 3 ");
/// assert_eq!(tree.to_vec(), vec![2, 1, 3]); // pre-order
/// ```
pub struct Bst<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Bst<T> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of values in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the tree: −1 when empty, 0 for a single node.
    ///
    /// The −1 convention for empty trees is relied upon by the table's
    /// bucket statistics; do not change it to 0.
    pub fn height(&self) -> i32 {
        Self::height_of(&self.root)
    }

    fn height_of(link: &Link<T>) -> i32 {
        match link {
            None => -1,
            Some(node) => 1 + Self::height_of(&node.left).max(Self::height_of(&node.right)),
        }
    }

    /// Number of nodes with at least one missing child.
    ///
    /// This deliberately counts nodes with exactly one child as leaves
    /// (and does not descend into their subtree), matching the statistic
    /// the table reports per bucket.
    pub fn num_leaves(&self) -> usize {
        Self::leaves_of(&self.root)
    }

    fn leaves_of(link: &Link<T>) -> usize {
        match link {
            None => 0,
            Some(node) if node.left.is_none() || node.right.is_none() => 1,
            Some(node) => Self::leaves_of(&node.left) + Self::leaves_of(&node.right),
        }
    }

    /// The largest value in the tree, or `None` when empty.
    pub fn max(&self) -> Option<&T> {
        Self::max_of(&self.root)
    }

    fn max_of(link: &Link<T>) -> Option<&T> {
        let mut current = link.as_deref()?;
        while let Some(right) = current.right.as_deref() {
            current = right;
        }
        Some(&current.value)
    }

    /// The in-order predecessor of the root value: the largest value in the
    /// root's left subtree, or `None` when there is none.
    pub fn predecessor(&self) -> Option<&T> {
        Self::max_of(&self.root.as_deref()?.left)
    }

    /// Borrowing pre-order traversal (root, then left subtree, then right).
    pub fn iter(&self) -> Iter<'_, T> {
        let mut stack = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push(root);
        }
        Iter { stack }
    }

    /// All values in pre-order. The result length equals [`Bst::len`].
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Consumes the tree, draining its values in pre-order.
    ///
    /// This is the extraction order the table replays during a rehash:
    /// re-inserting the result into an empty tree reproduces the shape.
    pub fn into_preorder(self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        if let Some(root) = self.root {
            stack.push(root);
        }
        while let Some(mut node) = stack.pop() {
            if let Some(right) = node.right.take() {
                stack.push(right);
            }
            if let Some(left) = node.left.take() {
                stack.push(left);
            }
            out.push(node.value);
        }
        out
    }
}

impl<T: Ord> Bst<T> {
    /// Inserts a value. Returns false (and changes nothing) if an equal
    /// value is already present.
    pub fn insert(&mut self, value: T) -> bool {
        let mut inserted = false;
        self.root = Self::insert_node(self.root.take(), value, &mut inserted);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    fn insert_node(link: Link<T>, value: T, inserted: &mut bool) -> Link<T> {
        match link {
            None => {
                *inserted = true;
                Some(Box::new(Node::new(value)))
            }
            Some(mut node) => {
                match value.cmp(&node.value) {
                    Ordering::Less => {
                        node.left = Self::insert_node(node.left.take(), value, inserted)
                    }
                    Ordering::Greater => {
                        node.right = Self::insert_node(node.right.take(), value, inserted)
                    }
                    Ordering::Equal => {}
                }
                Some(node)
            }
        }
    }

    /// Returns true if an equal value is present.
    pub fn contains(&self, value: &T) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Removes a value. Returns false (and changes nothing) if absent.
    ///
    /// A node with two children is replaced by its in-order predecessor:
    /// the maximum of the left subtree is detached and overwrites the
    /// removed value.
    pub fn remove(&mut self, value: &T) -> bool {
        let mut removed = false;
        self.root = Self::remove_node(self.root.take(), value, &mut removed);
        if removed {
            self.len -= 1;
        }
        removed
    }

    fn remove_node(link: Link<T>, value: &T, removed: &mut bool) -> Link<T> {
        let mut node = link?;
        match value.cmp(&node.value) {
            Ordering::Less => {
                node.left = Self::remove_node(node.left.take(), value, removed);
                Some(node)
            }
            Ordering::Greater => {
                node.right = Self::remove_node(node.right.take(), value, removed);
                Some(node)
            }
            Ordering::Equal => {
                *removed = true;
                match (node.left.take(), node.right.take()) {
                    (None, None) => None,
                    (Some(left), None) => Some(left),
                    (None, Some(right)) => Some(right),
                    (Some(left), Some(right)) => {
                        let (new_left, predecessor) = Self::detach_max(left);
                        node.value = predecessor;
                        node.left = new_left;
                        node.right = Some(right);
                        Some(node)
                    }
                }
            }
        }
    }

    /// Detaches the rightmost node of a subtree, returning the remaining
    /// subtree and the detached value.
    fn detach_max(mut node: Box<Node<T>>) -> (Link<T>, T) {
        match node.right.take() {
            Some(right) => {
                let (new_right, max) = Self::detach_max(right);
                node.right = new_right;
                (Some(node), max)
            }
            None => {
                let Node { value, left, .. } = *node;
                (left, value)
            }
        }
    }
}

impl<T> Default for Bst<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Bst<T> {
    fn clone(&self) -> Self {
        let mut tree = Self::new();
        Self::clone_into_link(&self.root, &mut tree.root);
        tree.len = self.len;
        tree
    }
}

impl<T: Clone> Bst<T> {
    fn clone_into_link(from: &Link<T>, to: &mut Link<T>) {
        if let Some(node) = from.as_deref() {
            let mut copy = Box::new(Node::new(node.value.clone()));
            Self::clone_into_link(&node.left, &mut copy.left);
            Self::clone_into_link(&node.right, &mut copy.right);
            *to = Some(copy);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Bst<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bst")
            .field("len", &self.len)
            .field("root", &self.root)
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for Bst<T> {
    /// In-order rendering, one space after each value (so a non-empty tree
    /// ends with a trailing space and an empty tree renders as "").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::write_in_order(&self.root, f)
    }
}

impl<T: fmt::Display> Bst<T> {
    fn write_in_order(link: &Link<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(node) = link.as_deref() {
            Self::write_in_order(&node.left, f)?;
            write!(f, "{} ", node.value)?;
            Self::write_in_order(&node.right, f)?;
        }
        Ok(())
    }
}

/// Pre-order iterator over a [`Bst`].
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.stack.pop()?;
        if let Some(right) = node.right.as_deref() {
            self.stack.push(right);
        }
        if let Some(left) = node.left.as_deref() {
            self.stack.push(left);
        }
        Some(&node.value)
    }
}
