//! An ordered set backed by an AVL tree.
//!
//! [`AvlSet`] stores unique keys in a binary search tree whose shape is kept height-balanced: for
//! every node, the heights of its two subtrees differ by at most one. This bounds the height of a
//! tree holding `n` keys by roughly `1.44 * log2(n + 2)`, so lookups, insertions and removals all
//! complete in _O(log(n))_ time.
//!
//! Nodes are exclusively owned by their parent. Insertion and removal recurse down to the affected
//! position and restore balance on the way back up by replacing each subtree with a rebalanced one,
//! so no node ever holds a pointer to its parent.
//!
//! Besides the usual set operations, the tree shape itself is exposed read-only through
//! [`AvlSet::root`] and [`AvlSet::preorder`], for callers that want to draw or serialize it.
//!
//! ```
//! use avl_set::AvlSet;
//!
//! let mut set = AvlSet::new();
//! set.insert(10);
//! set.insert(20);
//! set.insert(30);
//!
//! // Inserting in ascending order triggers a single left rotation.
//! let root = set.root().unwrap();
//! assert_eq!(*root.key(), 20);
//! assert_eq!(root.left().map(|n| *n.key()), Some(10));
//! assert_eq!(root.right().map(|n| *n.key()), Some(30));
//! ```

// Conventions used in comments:
// - The height of an empty subtree is 0 and the height of a leaf is 1.
// - The balance factor of a node is `height(left) - height(right)`.
//
// Invariants that hold whenever no `&mut AvlSet` method is executing:
// 1. Every key in a node's left subtree is less than the node's key, and every key in its right
//    subtree is greater.
// 2. Every node's balance factor is -1, 0 or 1.
// 3. Every node's cached `height` is the true height of its subtree.
// 4. `len` is the number of nodes.

use core::fmt;
use std::borrow::Borrow;

mod error;
mod iter;
mod node;
mod view;

#[cfg(any(test, feature = "model"))]
pub mod model;


pub use error::InvariantViolation;
pub use iter::{IntoIter, Iter};
pub use view::{NodeRef, NodeView, Preorder};

use node::{Insertion, Link};

/// An ordered set of unique keys, stored in an AVL tree.
pub struct AvlSet<K> {
    root: Link<K>,
    len: usize,
}

impl<K> AvlSet<K> {
    /// Returns a new empty set.
    pub const fn new() -> AvlSet<K> {
        AvlSet { root: None, len: 0 }
    }

    /// Returns `true` if the set contains no elements.
    pub const fn is_empty(&self) -> bool {
        let empty = self.len() == 0;

        if cfg!(debug_assertions) {
            // Can't use assert_eq!() in const fn.
            assert!(empty == self.root.is_none());
        }

        empty
    }

    /// Returns the number of elements in the set.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the height of the tree: 0 when empty, 1 for a single key.
    pub fn height(&self) -> usize {
        usize::from(node::height(&self.root))
    }

    /// Returns the minimum key in the set.
    pub fn first(&self) -> Option<&K> {
        self.root.as_deref().map(|root| &node::leftmost(root).key)
    }

    /// Returns the maximum key in the set.
    pub fn last(&self) -> Option<&K> {
        self.root.as_deref().map(|root| &node::rightmost(root).key)
    }

    /// Removes and returns the minimum key in the set.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn pop_first(&mut self) -> Option<K> {
        let root = self.root.take()?;
        let (root, first) = node::take_min(root);

        self.root = root;
        self.len -= 1;

        Some(first)
    }

    /// Removes and returns the maximum key in the set.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn pop_last(&mut self) -> Option<K> {
        let root = self.root.take()?;
        let (root, last) = node::take_max(root);

        self.root = root;
        self.len -= 1;

        Some(last)
    }

    /// Clears the set, removing all elements.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Returns an iterator over the keys of the set, in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.root, self.len)
    }

    /// Returns a read-only view of the root node, or `None` if the set is empty.
    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        self.root.as_deref().map(NodeRef::new)
    }

    /// Returns an iterator over every node of the tree in pre-order: each node is yielded before
    /// its left subtree, which is yielded before its right subtree.
    pub fn preorder(&self) -> Preorder<'_, K> {
        Preorder::new(&self.root, self.len)
    }
}

impl<K: Ord> AvlSet<K> {
    /// Returns `true` if the set contains `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        node::find(&self.root, key).is_some()
    }

    /// Returns a reference to the key in the set equal to `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        node::find(&self.root, key).map(|node| &node.key)
    }

    /// Inserts a key into the set.
    ///
    /// Returns `true` if the key was not already present. Inserting a key that is already present
    /// leaves the set, including the shape of its tree, unchanged.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn insert(&mut self, key: K) -> bool {
        let (root, outcome) = node::insert(self.root.take(), key);
        self.root = Some(root);

        let inserted = outcome != Insertion::Duplicate;
        if inserted {
            self.len += 1;
        }

        inserted
    }

    /// Removes `key` from the set.
    ///
    /// Returns `true` if the key was present. Removing a missing key is a no-op.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.take(key).is_some()
    }

    /// Removes and returns the key in the set equal to `key`.
    pub fn take<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (root, removed) = node::remove(self.root.take(), key);
        self.root = root;

        if removed.is_some() {
            self.len -= 1;
        }

        removed
    }
}

impl<K> Default for AvlSet<K> {
    fn default() -> Self {
        AvlSet::new()
    }
}

impl<K: Clone> Clone for AvlSet<K> {
    fn clone(&self) -> Self {
        AvlSet {
            root: self.root.clone(),
            len: self.len,
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for AvlSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

// Two sets are equal if they hold the same keys, whatever the shape of their trees.
impl<K: PartialEq> PartialEq for AvlSet<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq> Eq for AvlSet<K> {}

impl<K: Ord> FromIterator<K> for AvlSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = AvlSet::new();
        set.extend(iter);
        set
    }
}

impl<K: Ord> Extend<K> for AvlSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a AvlSet<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K> IntoIterator for AvlSet<K> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.root, self.len)
    }
}
