//! Owned AVL nodes and the recursive algorithms that restructure them.
//!
//! Every mutating function takes ownership of a subtree and hands back the subtree that replaces
//! it; the caller writes the result into its own child link. There are no parent pointers.

use core::{cmp::Ordering, mem};
use std::borrow::Borrow;

pub(crate) type Link<K> = Option<Box<Node<K>>>;

#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
    // Height of the subtree rooted here. A leaf has height 1.
    pub(crate) height: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Dir {
    Left,
    Right,
}

/// What an insertion did to the subtree it was applied to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Insertion {
    /// The key was already present; nothing changed.
    Duplicate,
    /// The subtree was empty and is now a single leaf holding the key.
    Leaf,
    /// The key went into the subtree on the given side of the (pre-rebalance) root.
    Descended(Dir),
}

impl<K> Node<K> {
    fn leaf(key: K) -> Box<Node<K>> {
        Box::new(Node {
            key,
            left: None,
            right: None,
            height: 1,
        })
    }

    #[inline]
    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    #[inline]
    pub(crate) fn balance_factor(&self) -> i32 {
        i32::from(height(&self.left)) - i32::from(height(&self.right))
    }
}

#[inline]
pub(crate) fn height<K>(link: &Link<K>) -> u8 {
    link.as_ref().map_or(0, |node| node.height)
}

#[inline]
fn balance_factor<K>(link: &Link<K>) -> i32 {
    link.as_ref().map_or(0, |node| node.balance_factor())
}

// Promotes the left child of `y`, which becomes the right child of the promoted node.
fn rotate_right<K>(mut y: Box<Node<K>>) -> Box<Node<K>> {
    let mut x = y.left.take().expect("right rotation requires a left child");

    y.left = x.right.take();
    y.update_height();

    x.right = Some(y);
    x.update_height();

    x
}

// Mirror image of `rotate_right`.
fn rotate_left<K>(mut x: Box<Node<K>>) -> Box<Node<K>> {
    let mut y = x.right.take().expect("left rotation requires a right child");

    x.right = y.left.take();
    x.update_height();

    y.left = Some(x);
    y.update_height();

    y
}

/// Inserts `key` into the subtree rooted at `link`, returning the new subtree root.
pub(crate) fn insert<K: Ord>(link: Link<K>, key: K) -> (Box<Node<K>>, Insertion) {
    let Some(mut node) = link else {
        return (Node::leaf(key), Insertion::Leaf);
    };

    let (dir, below) = match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, below) = insert(node.left.take(), key);
            node.left = Some(left);
            (Dir::Left, below)
        }
        Ordering::Greater => {
            let (right, below) = insert(node.right.take(), key);
            node.right = Some(right);
            (Dir::Right, below)
        }
        Ordering::Equal => return (node, Insertion::Duplicate),
    };

    if below == Insertion::Duplicate {
        return (node, Insertion::Duplicate);
    }

    node.update_height();

    (rebalance_inserted(node, dir, below), Insertion::Descended(dir))
}

// `dir` is the side of `node` the new key went to, and `below` is where it went inside that child.
//
// A child whose height grew did not rotate, so `below` still describes the key's position relative
// to the current child root.
fn rebalance_inserted<K>(mut node: Box<Node<K>>, dir: Dir, below: Insertion) -> Box<Node<K>> {
    let balance = node.balance_factor();

    if balance > 1 {
        debug_assert_eq!(dir, Dir::Left);

        match below {
            Insertion::Descended(Dir::Left) => {
                tracing::trace!(case = "left-left", "rebalancing after insert");
                rotate_right(node)
            }
            Insertion::Descended(Dir::Right) => {
                tracing::trace!(case = "left-right", "rebalancing after insert");
                node.left = node.left.take().map(rotate_left);
                rotate_right(node)
            }
            _ => unreachable!("a fresh leaf cannot unbalance its grandparent"),
        }
    } else if balance < -1 {
        debug_assert_eq!(dir, Dir::Right);

        match below {
            Insertion::Descended(Dir::Right) => {
                tracing::trace!(case = "right-right", "rebalancing after insert");
                rotate_left(node)
            }
            Insertion::Descended(Dir::Left) => {
                tracing::trace!(case = "right-left", "rebalancing after insert");
                node.right = node.right.take().map(rotate_right);
                rotate_left(node)
            }
            _ => unreachable!("a fresh leaf cannot unbalance its grandparent"),
        }
    } else {
        node
    }
}

/// Removes `key` from the subtree rooted at `link`.
///
/// Returns the replacement subtree and the removed key, if it was present.
pub(crate) fn remove<K, Q>(link: Link<K>, key: &Q) -> (Link<K>, Option<K>)
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    let Some(mut node) = link else {
        return (None, None);
    };

    let removed = match key.cmp(node.key.borrow()) {
        Ordering::Less => {
            let (left, removed) = remove(node.left.take(), key);
            node.left = left;
            removed
        }
        Ordering::Greater => {
            let (right, removed) = remove(node.right.take(), key);
            node.right = right;
            removed
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, right) => return (right, Some(node.key)),
            (left, None) => return (left, Some(node.key)),
            (Some(left), Some(right)) => {
                // Promote the in-order successor into this node.
                let (right, successor) = take_min(right);
                node.left = Some(left);
                node.right = right;
                Some(mem::replace(&mut node.key, successor))
            }
        },
    };

    if removed.is_none() {
        return (Some(node), None);
    }

    node.update_height();

    (Some(rebalance_removed(node)), removed)
}

/// Detaches the minimum key of a subtree, rebalancing every level on the way back up.
pub(crate) fn take_min<K>(mut node: Box<Node<K>>) -> (Link<K>, K) {
    match node.left.take() {
        None => {
            let Node { key, right, .. } = *node;
            (right, key)
        }
        Some(left) => {
            let (left, min) = take_min(left);
            node.left = left;
            node.update_height();
            (Some(rebalance_removed(node)), min)
        }
    }
}

/// Detaches the maximum key of a subtree, rebalancing every level on the way back up.
pub(crate) fn take_max<K>(mut node: Box<Node<K>>) -> (Link<K>, K) {
    match node.right.take() {
        None => {
            let Node { key, left, .. } = *node;
            (left, key)
        }
        Some(right) => {
            let (right, max) = take_max(right);
            node.right = right;
            node.update_height();
            (Some(rebalance_removed(node)), max)
        }
    }
}

// After a removal the removed key gives no hint about direction, so the child's own balance
// factor picks between a single and a double rotation.
fn rebalance_removed<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    let balance = node.balance_factor();

    if balance > 1 {
        if balance_factor(&node.left) >= 0 {
            tracing::trace!(case = "left-left", "rebalancing after removal");
        } else {
            tracing::trace!(case = "left-right", "rebalancing after removal");
            node.left = node.left.take().map(rotate_left);
        }

        rotate_right(node)
    } else if balance < -1 {
        if balance_factor(&node.right) <= 0 {
            tracing::trace!(case = "right-right", "rebalancing after removal");
        } else {
            tracing::trace!(case = "right-left", "rebalancing after removal");
            node.right = node.right.take().map(rotate_right);
        }

        rotate_left(node)
    } else {
        node
    }
}

/// Returns the node holding `key`, if any.
pub(crate) fn find<'a, K, Q>(mut link: &'a Link<K>, key: &Q) -> Option<&'a Node<K>>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    loop {
        let node = link.as_deref()?;

        match key.cmp(node.key.borrow()) {
            Ordering::Less => link = &node.left,
            Ordering::Equal => return Some(node),
            Ordering::Greater => link = &node.right,
        }
    }
}

#[inline]
pub(crate) fn leftmost<K>(mut node: &Node<K>) -> &Node<K> {
    while let Some(left) = node.left.as_deref() {
        node = left;
    }

    node
}

#[inline]
pub(crate) fn rightmost<K>(mut node: &Node<K>) -> &Node<K> {
    while let Some(right) = node.right.as_deref() {
        node = right;
    }

    node
}
