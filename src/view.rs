//! Read-only views of the tree's structure, for renderers and serializers.

use core::{fmt, iter::FusedIterator};

use crate::node::{Link, Node};

/// A borrowed, read-only handle to one node of an [`AvlSet`](crate::AvlSet).
pub struct NodeRef<'tree, K> {
    node: &'tree Node<K>,
}

impl<'tree, K> NodeRef<'tree, K> {
    pub(crate) fn new(node: &'tree Node<K>) -> Self {
        NodeRef { node }
    }

    pub fn key(&self) -> &'tree K {
        &self.node.key
    }

    pub fn left(&self) -> Option<NodeRef<'tree, K>> {
        self.node.left.as_deref().map(NodeRef::new)
    }

    pub fn right(&self) -> Option<NodeRef<'tree, K>> {
        self.node.right.as_deref().map(NodeRef::new)
    }

    /// Returns the height of the subtree rooted at this node. A leaf has height 1.
    pub fn height(&self) -> usize {
        usize::from(self.node.height)
    }

    /// Returns the height of the left subtree minus the height of the right subtree.
    ///
    /// This is always -1, 0 or 1.
    pub fn balance_factor(&self) -> isize {
        self.node.balance_factor() as isize
    }

    /// Flattens this node into a [`NodeView`].
    pub fn view(&self) -> NodeView<'tree, K> {
        NodeView::of(self.node)
    }
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeRef<'_, K> {}

impl<K: fmt::Debug> fmt::Debug for NodeRef<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("height", &self.height())
            .finish()
    }
}

/// One node of the tree, described by its key, its children's keys and its height.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeView<'tree, K> {
    pub key: &'tree K,
    pub left: Option<&'tree K>,
    pub right: Option<&'tree K>,
    pub height: usize,
}

impl<'tree, K> NodeView<'tree, K> {
    fn of(node: &'tree Node<K>) -> Self {
        NodeView {
            key: &node.key,
            left: node.left.as_ref().map(|left| &left.key),
            right: node.right.as_ref().map(|right| &right.key),
            height: usize::from(node.height),
        }
    }
}

impl<K> Clone for NodeView<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeView<'_, K> {}

/// A pre-order iterator over the nodes of an [`AvlSet`](crate::AvlSet).
///
/// Created by [`AvlSet::preorder`](crate::AvlSet::preorder).
pub struct Preorder<'tree, K> {
    stack: Vec<&'tree Node<K>>,
    len: usize,
}

impl<'tree, K> Preorder<'tree, K> {
    pub(crate) fn new(root: &'tree Link<K>, len: usize) -> Self {
        Preorder {
            stack: root.as_deref().into_iter().collect(),
            len,
        }
    }
}

impl<'tree, K> Iterator for Preorder<'tree, K> {
    type Item = NodeView<'tree, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.stack.pop()?;

        // Right goes on first so that the left subtree is visited first.
        self.stack.extend(cur.right.as_deref());
        self.stack.extend(cur.left.as_deref());
        self.len -= 1;

        Some(NodeView::of(cur))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K> ExactSizeIterator for Preorder<'_, K> {}

impl<K> FusedIterator for Preorder<'_, K> {}
