use core::iter::FusedIterator;

use crate::node::{Link, Node};

/// An in-order iterator over the keys of an [`AvlSet`](crate::AvlSet).
///
/// Created by [`AvlSet::iter`](crate::AvlSet::iter).
pub struct Iter<'tree, K> {
    // Nodes whose left subtree has been (or is being) exhausted but which have not been yielded.
    // The top of the stack is the next node to yield.
    stack: Vec<&'tree Node<K>>,
    len: usize,
}

impl<'tree, K> Iter<'tree, K> {
    pub(crate) fn new(root: &'tree Link<K>, len: usize) -> Self {
        let mut iter = Iter {
            stack: Vec::new(),
            len,
        };

        iter.descend(root.as_deref());
        iter
    }

    // Upon entering a new subtree, stack the path to its minimum element.
    fn descend(&mut self, mut opt_cur: Option<&'tree Node<K>>) {
        while let Some(cur) = opt_cur {
            self.stack.push(cur);
            opt_cur = cur.left.as_deref();
        }
    }
}

impl<'tree, K> Iterator for Iter<'tree, K> {
    type Item = &'tree K;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.stack.pop()?;

        // The left subtree is exhausted and this node is up next. Its successor is the minimum of
        // its right subtree, if it has one, and otherwise the node below it on the stack.
        self.descend(cur.right.as_deref());
        self.len -= 1;

        Some(&cur.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Iter {
            stack: self.stack.clone(),
            len: self.len,
        }
    }
}

/// An owning in-order iterator over the keys of an [`AvlSet`](crate::AvlSet).
pub struct IntoIter<K> {
    stack: Vec<Box<Node<K>>>,
    len: usize,
}

impl<K> IntoIter<K> {
    pub(crate) fn new(root: Link<K>, len: usize) -> Self {
        let mut iter = IntoIter {
            stack: Vec::new(),
            len,
        };

        iter.descend(root);
        iter
    }

    // Stacked nodes have their left links detached, so each one owns only its key and right
    // subtree.
    fn descend(&mut self, mut opt_cur: Link<K>) {
        while let Some(mut cur) = opt_cur {
            opt_cur = cur.left.take();
            self.stack.push(cur);
        }
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        let Node { key, right, .. } = *self.stack.pop()?;

        self.descend(right);
        self.len -= 1;

        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {}

impl<K> FusedIterator for IntoIter<K> {}

#[cfg(test)]
mod tests {
    use crate::AvlSet;

    #[test]
    fn iter_is_sorted() {
        let set: AvlSet<u32> = [5, 3, 9, 1, 4, 8, 7, 2, 6].into_iter().collect();

        let keys: Vec<u32> = set.iter().copied().collect();
        assert_eq!(keys, (1..=9).collect::<Vec<_>>());
    }

    #[test]
    fn iter_reports_exact_len() {
        let set: AvlSet<u32> = (0..10).collect();
        let mut iter = set.iter();

        assert_eq!(iter.len(), 10);
        iter.next();
        iter.next();
        assert_eq!(iter.len(), 8);
        assert_eq!(iter.count(), 8);
    }

    #[test]
    fn into_iter_yields_owned_keys() {
        let set: AvlSet<String> = ["pear", "apple", "fig"].iter().map(|s| s.to_string()).collect();

        let mut iter = set.into_iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next().as_deref(), Some("apple"));
        assert_eq!(iter.collect::<Vec<_>>(), ["fig", "pear"]);
    }

    #[test]
    fn empty_iter() {
        let set: AvlSet<u32> = AvlSet::new();

        assert_eq!(set.iter().next(), None);
        assert_eq!(set.into_iter().next(), None);
    }
}
