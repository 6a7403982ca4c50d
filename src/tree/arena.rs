//! Index-addressed derivation trees.
//!
//! Nodes live in one `Vec`; children are referenced by [`NodeId`]. Construction, traversal
//! and drop are all iterative, so the pair count is bounded only by memory.
//! [`DerivationArena::try_build`] reports an allocation that cannot succeed as an error.
//!
//! Layout: the leaf is node 0 and internal node `k` points at node `k - 1`, which makes the
//! root the last node.

use serde::Serialize;

use super::{DerivationTree, NonTerminal};
use crate::errors::{unspanned, AnbnError, ErrorReporting, PhaseContext};
use crate::symbol::Symbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum ArenaNode {
    Leaf,
    Internal {
        label: NonTerminal,
        left: Symbol,
        child: NodeId,
        right: Symbol,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivationArena {
    nodes: Vec<ArenaNode>,
    root: NodeId,
}

impl DerivationArena {
    /// Builds the derivation of aⁿbⁿ without recursion.
    ///
    /// Aborts if the nodes cannot be allocated; see [`DerivationArena::try_build`].
    pub fn build(n: usize) -> Self {
        let mut nodes = Vec::with_capacity(n.saturating_add(1));
        Self::fill(&mut nodes, n);
        Self {
            nodes,
            root: NodeId(n),
        }
    }

    /// Like [`DerivationArena::build`], returning an error instead of aborting when `n + 1`
    /// nodes overflow or cannot be allocated.
    pub fn try_build(n: usize) -> Result<Self, AnbnError> {
        let context = PhaseContext::detached("arena");
        let len = n
            .checked_add(1)
            .ok_or_else(|| context.pair_limit_exceeded(n, usize::MAX - 1))?;

        let mut nodes = Vec::new();
        nodes.try_reserve_exact(len).map_err(|error| {
            context.invalid_argument(
                "n",
                &format!("cannot allocate {len} arena nodes: {error}"),
                unspanned(),
            )
        })?;
        Self::fill(&mut nodes, n);
        Ok(Self {
            nodes,
            root: NodeId(n),
        })
    }

    fn fill(nodes: &mut Vec<ArenaNode>, n: usize) {
        nodes.push(ArenaNode::Leaf);
        for k in 1..=n {
            nodes.push(ArenaNode::Internal {
                label: NonTerminal::S,
                left: Symbol::A,
                child: NodeId(k - 1),
                right: Symbol::B,
            });
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&ArenaNode> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: an arena holds at least the leaf.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids from the root down to the leaf.
    pub fn walk(&self) -> impl Iterator<Item = (NodeId, &ArenaNode)> + '_ {
        let mut next = Some(self.root);
        std::iter::from_fn(move || {
            let id = next?;
            let node = self.get(id)?;
            next = match node {
                ArenaNode::Leaf => None,
                ArenaNode::Internal { child, .. } => Some(*child),
            };
            Some((id, node))
        })
    }

    pub fn internal_count(&self) -> usize {
        self.walk()
            .filter(|(_, node)| matches!(node, ArenaNode::Internal { .. }))
            .count()
    }

    pub fn depth(&self) -> usize {
        self.walk().count().saturating_sub(1)
    }

    /// Converts to the boxed representation. The result recurses on render and drop, so
    /// only do this for counts the caller is prepared to handle.
    pub fn to_tree(&self) -> DerivationTree {
        let mut tree = DerivationTree::Leaf;
        for _ in 0..self.internal_count() {
            tree = DerivationTree::internal(tree);
        }
        tree
    }
}

impl From<&DerivationTree> for DerivationArena {
    fn from(tree: &DerivationTree) -> Self {
        DerivationArena::build(tree.internal_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::tree::build;

    #[test]
    fn test_layout() {
        let arena = DerivationArena::build(2);
        assert_eq!(arena.len(), 3);
        assert_eq!(arena.root(), NodeId(2));
        assert_eq!(arena.get(NodeId(0)), Some(&ArenaNode::Leaf));
        assert!(matches!(
            arena.get(NodeId(2)),
            Some(ArenaNode::Internal {
                child: NodeId(1),
                ..
            })
        ));
    }

    #[test]
    fn test_matches_boxed_tree() {
        for n in 0..5 {
            let arena = DerivationArena::build(n);
            assert_eq!(arena.to_tree(), build(n));
            assert_eq!(DerivationArena::from(&build(n)), arena);
        }
    }

    #[test]
    fn test_large_arena_does_not_recurse() {
        let arena = DerivationArena::build(1_000_000);
        assert_eq!(arena.depth(), 1_000_000);
        assert_eq!(arena.internal_count(), 1_000_000);
    }

    #[test]
    fn test_try_build_matches_build() {
        assert_eq!(DerivationArena::try_build(3).unwrap(), DerivationArena::build(3));
    }

    #[test]
    fn test_try_build_reports_overflow() {
        let err = DerivationArena::try_build(usize::MAX).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::PairLimitExceeded { .. }));
    }

    #[test]
    fn test_try_build_reports_impossible_allocation() {
        let err = DerivationArena::try_build(usize::MAX / 2).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidArgument { .. }));
        assert_eq!(err.diagnostic_info.error_code, "anbn::arena::invalid_argument");
    }
}
