//! Indented text rendering of derivation trees.
//!
//! Preorder, one node or terminal per line. An internal node prints its label at the current
//! indentation, then `a`, the child subtree and `b` one level deeper; the leaf prints ε.
//!
//! ```text
//! S
//!   a
//!   S
//!     a
//!     ε
//!     b
//!   b
//! ```
//!
//! A tree with n internal nodes renders to 3n + 1 lines.

use super::{ArenaNode, DerivationArena, DerivationTree};
use crate::config::Config;

pub const DEFAULT_INDENT: &str = "  ";
pub const EPSILON: &str = "ε";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRenderer {
    indent_unit: String,
    epsilon: String,
}

impl Default for TreeRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT, EPSILON)
    }
}

impl TreeRenderer {
    pub fn new(indent_unit: impl Into<String>, epsilon: impl Into<String>) -> Self {
        Self {
            indent_unit: indent_unit.into(),
            epsilon: epsilon.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.indent_unit.clone(), config.epsilon.clone())
    }

    pub fn indent_unit(&self) -> &str {
        &self.indent_unit
    }

    pub fn epsilon(&self) -> &str {
        &self.epsilon
    }

    pub fn render(&self, tree: &DerivationTree) -> Vec<String> {
        let mut lines = Vec::new();
        self.render_into(tree, 0, &mut lines);
        lines
    }

    /// The rendered lines joined with newlines, no trailing newline.
    pub fn render_text(&self, tree: &DerivationTree) -> String {
        self.render(tree).join("\n")
    }

    fn render_into(&self, tree: &DerivationTree, depth: usize, lines: &mut Vec<String>) {
        match tree {
            DerivationTree::Leaf => lines.push(self.line(depth, &self.epsilon)),
            DerivationTree::Internal {
                label,
                left,
                child,
                right,
            } => {
                lines.push(self.line(depth, label));
                lines.push(self.line(depth + 1, left));
                self.render_into(child, depth + 1, lines);
                lines.push(self.line(depth + 1, right));
            }
        }
    }

    /// Renders an arena tree; output is identical to [`TreeRenderer::render`] on the
    /// equivalent boxed tree.
    pub fn render_arena(&self, arena: &DerivationArena) -> Vec<String> {
        let mut lines = Vec::with_capacity(3 * arena.len());
        let mut closing = Vec::new();
        let mut depth = 0;

        for (_, node) in arena.walk() {
            match node {
                ArenaNode::Leaf => lines.push(self.line(depth, &self.epsilon)),
                ArenaNode::Internal {
                    label, left, right, ..
                } => {
                    lines.push(self.line(depth, label));
                    lines.push(self.line(depth + 1, left));
                    closing.push(self.line(depth + 1, right));
                    depth += 1;
                }
            }
        }

        lines.extend(closing.into_iter().rev());
        lines
    }

    fn line(&self, depth: usize, text: impl std::fmt::Display) -> String {
        format!("{}{}", self.indent_unit.repeat(depth), text)
    }
}

/// Renders with the default two-space indentation and ε leaf.
pub fn render(tree: &DerivationTree) -> Vec<String> {
    TreeRenderer::default().render(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build;

    #[test]
    fn test_render_leaf() {
        assert_eq!(render(&build(0)), vec!["ε"]);
    }

    #[test]
    fn test_render_one_pair() {
        assert_eq!(render(&build(1)), vec!["S", "  a", "  ε", "  b"]);
    }

    #[test]
    fn test_custom_indent_and_epsilon() {
        let renderer = TreeRenderer::new("..", "<eps>");
        assert_eq!(
            renderer.render(&build(1)),
            vec!["S", "..a", "..<eps>", "..b"]
        );
    }

    #[test]
    fn test_arena_rendering_matches_boxed() {
        let renderer = TreeRenderer::default();
        for n in 0..6 {
            assert_eq!(
                renderer.render_arena(&DerivationArena::build(n)),
                renderer.render(&build(n))
            );
        }
    }
}
