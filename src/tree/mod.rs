//! Derivation trees for the grammar S → aSb | ε.
//!
//! Every member aⁿbⁿ has exactly one leftmost derivation: apply S → aSb n times, then
//! S → ε. Its tree is a chain of n internal nodes, each holding the terminals `a` and `b`
//! around a single child, ending in one ε leaf.

// ============================================================================
// IMPORTS
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{unspanned, AnbnError, ErrorReporting, PhaseContext};
use crate::symbol::Symbol;

pub mod arena;
pub mod render;

pub use arena::{ArenaNode, DerivationArena, NodeId};
pub use render::{render, TreeRenderer};

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// The grammar's only non-terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NonTerminal {
    #[default]
    S,
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NonTerminal::S => write!(f, "S"),
        }
    }
}

/// A leftmost derivation tree for aⁿbⁿ.
///
/// # Examples
///
/// ```rust
/// use anbn::tree::{build, DerivationTree};
/// assert_eq!(build(0), DerivationTree::Leaf);
/// assert_eq!(build(1), DerivationTree::internal(DerivationTree::Leaf));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum DerivationTree {
    /// S → ε
    Leaf,
    /// S → a S b
    Internal {
        label: NonTerminal,
        left: Symbol,
        child: Box<DerivationTree>,
        right: Symbol,
    },
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

impl DerivationTree {
    /// Wraps `child` in one application of S → aSb.
    pub fn internal(child: DerivationTree) -> Self {
        DerivationTree::Internal {
            label: NonTerminal::S,
            left: Symbol::A,
            child: Box::new(child),
            right: Symbol::B,
        }
    }

    /// The subtree below this node, `None` for the leaf.
    pub fn child(&self) -> Option<&DerivationTree> {
        match self {
            DerivationTree::Leaf => None,
            DerivationTree::Internal { child, .. } => Some(child),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, DerivationTree::Leaf)
    }

    /// Walks the chain from this node down to the leaf, this node first.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes { next: Some(self) }
    }

    // ------------------------------------------------------------------------
    // Structural queries
    // ------------------------------------------------------------------------

    pub fn internal_count(&self) -> usize {
        self.nodes().filter(|node| !node.is_leaf()).count()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes().filter(|node| node.is_leaf()).count()
    }

    /// Nesting depth: the number of internal nodes above the leaf.
    pub fn depth(&self) -> usize {
        self.nodes().count() - 1
    }

    /// The n of the aⁿbⁿ this tree derives.
    pub fn pairs(&self) -> usize {
        self.internal_count()
    }

    /// The derived terminal string, read off the tree left to right.
    pub fn frontier(&self) -> String {
        let mut left = String::new();
        let mut right = Vec::new();
        for node in self.nodes() {
            if let DerivationTree::Internal {
                left: l, right: r, ..
            } = node
            {
                left.push(l.as_char());
                right.push(r.as_char());
            }
        }
        left.extend(right.into_iter().rev());
        left
    }
}

/// Iterator over the nodes of a derivation chain, see [`DerivationTree::nodes`].
pub struct Nodes<'a> {
    next: Option<&'a DerivationTree>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a DerivationTree;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.child();
        Some(current)
    }
}

/// Builds the derivation tree of aⁿbⁿ.
///
/// Equivalent to the recursive definition (`build(0)` is the leaf, `build(n)` wraps
/// `build(n - 1)`) but constructed bottom-up in a loop. Rendering, cloning and dropping the
/// result still recurse once per level; use [`DerivationArena`] when n is unbounded.
pub fn build(n: usize) -> DerivationTree {
    (0..n).fold(DerivationTree::Leaf, |child, _| DerivationTree::internal(child))
}

/// Builds from a signed pair count, failing fast on negative input.
pub fn try_build(n: i64) -> Result<DerivationTree, AnbnError> {
    checked_pairs(n).map(build)
}

/// Converts a signed pair count, rejecting negatives with `InvalidArgument`.
pub fn checked_pairs(n: i64) -> Result<usize, AnbnError> {
    usize::try_from(n).map_err(|_| {
        PhaseContext::detached("tree").invalid_argument(
            "n",
            &format!("pair count must be a non-negative integer, got {n}"),
            unspanned(),
        )
    })
}

/// Like [`build`], refusing counts above `limit`.
pub fn build_bounded(n: usize, limit: usize) -> Result<DerivationTree, AnbnError> {
    if n > limit {
        return Err(PhaseContext::detached("tree").pair_limit_exceeded(n, limit));
    }
    Ok(build(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_build_zero_is_leaf() {
        let tree = build(0);
        assert!(tree.is_leaf());
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn test_build_matches_recursive_definition() {
        let mut expected = DerivationTree::Leaf;
        for n in 0..6 {
            assert_eq!(build(n), expected);
            expected = DerivationTree::internal(expected);
        }
    }

    #[test]
    fn test_frontier() {
        assert_eq!(build(0).frontier(), "");
        assert_eq!(build(3).frontier(), "aaabbb");
    }

    #[test]
    fn test_try_build_rejects_negative() {
        let err = try_build(-1).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidArgument { .. }));
        assert_eq!(try_build(2).unwrap(), build(2));
    }

    #[test]
    fn test_build_bounded() {
        assert!(build_bounded(3, 3).is_ok());
        let err = build_bounded(4, 3).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::PairLimitExceeded {
                requested: 4,
                limit: 3
            }
        );
    }
}
