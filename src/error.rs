use crate::{node::Link, AvlSet};

/// A broken structural invariant, reported by [`AvlSet::validate`].
///
/// No public operation of [`AvlSet`] can produce one of these; a violation means a bug in the
/// rebalancing code.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("node at depth {depth} is out of search order")]
    OutOfOrder { depth: usize },
    #[error("node at depth {depth} has balance factor {balance}")]
    Unbalanced { depth: usize, balance: isize },
    #[error("node at depth {depth} caches height {cached} but has height {actual}")]
    StaleHeight {
        depth: usize,
        cached: usize,
        actual: usize,
    },
    #[error("set records {len} elements but holds {counted}")]
    LengthMismatch { len: usize, counted: usize },
}

impl<K: Ord> AvlSet<K> {
    /// Checks every structural invariant of the tree.
    ///
    /// This walks the whole tree and completes in _O(n)_ time.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let (_, counted) = validate_at(&self.root, None, None, 0)?;

        if counted != self.len {
            return Err(InvariantViolation::LengthMismatch {
                len: self.len,
                counted,
            });
        }

        Ok(())
    }

    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        if let Err(violation) = self.validate() {
            panic!("{violation}");
        }
    }
}

// Returns the true height and the number of nodes of the subtree at `link`. Every key in the
// subtree must lie strictly between `lower` and `upper`, which also rules out duplicates.
fn validate_at<K: Ord>(
    link: &Link<K>,
    lower: Option<&K>,
    upper: Option<&K>,
    depth: usize,
) -> Result<(usize, usize), InvariantViolation> {
    let Some(node) = link.as_deref() else {
        return Ok((0, 0));
    };

    if lower.is_some_and(|lower| node.key <= *lower) || upper.is_some_and(|upper| node.key >= *upper)
    {
        return Err(InvariantViolation::OutOfOrder { depth });
    }

    let (left_height, left_count) = validate_at(&node.left, lower, Some(&node.key), depth + 1)?;
    let (right_height, right_count) = validate_at(&node.right, Some(&node.key), upper, depth + 1)?;

    let actual = 1 + left_height.max(right_height);
    if usize::from(node.height) != actual {
        return Err(InvariantViolation::StaleHeight {
            depth,
            cached: usize::from(node.height),
            actual,
        });
    }

    let balance = left_height as isize - right_height as isize;
    if balance.abs() > 1 {
        return Err(InvariantViolation::Unbalanced { depth, balance });
    }

    Ok((actual, 1 + left_count + right_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    fn node(key: u32, left: Link<u32>, right: Link<u32>, height: u8) -> Link<u32> {
        Some(Box::new(Node {
            key,
            left,
            right,
            height,
        }))
    }

    fn leaf(key: u32) -> Link<u32> {
        node(key, None, None, 1)
    }

    fn set(root: Link<u32>, len: usize) -> AvlSet<u32> {
        AvlSet { root, len }
    }

    #[test]
    fn valid_tree() {
        let set = set(node(2, leaf(1), leaf(3), 2), 3);
        assert_eq!(set.validate(), Ok(()));
    }

    #[test]
    fn detects_out_of_order() {
        // 4 sits in the left subtree of 3.
        let set = set(node(3, node(1, None, leaf(4), 2), leaf(5), 3), 4);
        assert_eq!(
            set.validate(),
            Err(InvariantViolation::OutOfOrder { depth: 2 })
        );
    }

    #[test]
    fn detects_duplicates() {
        let set = set(node(2, leaf(2), None, 2), 2);
        assert_eq!(
            set.validate(),
            Err(InvariantViolation::OutOfOrder { depth: 1 })
        );
    }

    #[test]
    fn detects_stale_height() {
        let set = set(node(2, leaf(1), leaf(3), 3), 3);
        assert_eq!(
            set.validate(),
            Err(InvariantViolation::StaleHeight {
                depth: 0,
                cached: 3,
                actual: 2,
            })
        );
    }

    #[test]
    fn detects_imbalance() {
        let set = set(node(1, None, node(2, None, leaf(3), 2), 3), 3);
        assert_eq!(
            set.validate(),
            Err(InvariantViolation::Unbalanced {
                depth: 0,
                balance: -2,
            })
        );
    }

    #[test]
    fn detects_length_mismatch() {
        let set = set(leaf(1), 2);
        assert_eq!(
            set.validate(),
            Err(InvariantViolation::LengthMismatch { len: 2, counted: 1 })
        );
    }

    #[test]
    #[should_panic(expected = "has balance factor -2")]
    fn assert_invariants_panics_with_violation() {
        set(node(1, None, node(2, None, leaf(3), 2), 3), 3).assert_invariants();
    }
}
