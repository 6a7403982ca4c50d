// tests/tree_tests.rs

use anbn::errors::ErrorKind;
use anbn::generate::pair_string;
use anbn::pairs::{leading_pairs, pair_count};
use anbn::syntax::parse_derivation;
use anbn::tree::{build, render, try_build, DerivationArena, DerivationTree, TreeRenderer};

#[test]
fn test_build_shape() {
    for n in 0..20 {
        let tree = build(n);
        assert_eq!(tree.internal_count(), n);
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.depth(), n);
        assert_eq!(tree.frontier(), pair_string(n));
    }
}

#[test]
fn test_render_leaf() {
    assert_eq!(render(&build(0)), vec!["ε"]);
    assert_eq!(render(&DerivationTree::Leaf), vec!["ε"]);
}

#[test]
fn test_render_line_count_follows_recursive_definition() {
    // Each S contributes itself, its `a` and its `b`; the leaf contributes one line.
    for n in 0..30 {
        assert_eq!(render(&build(n)).len(), 3 * n + 1, "n = {n}");
    }
}

#[test]
fn test_render_indentation_grows_per_level() {
    let lines = render(&build(4));
    let s_lines: Vec<_> = lines
        .iter()
        .filter(|line| line.trim_start() == "S")
        .collect();
    for (level, line) in s_lines.iter().enumerate() {
        assert_eq!(line.len() - line.trim_start().len(), 2 * level);
    }
    assert_eq!(lines.iter().find(|l| l.trim_start() == "ε").unwrap(), &"        ε");
}

#[test]
fn test_scenario_ab() {
    assert_eq!(render(&build(1)), vec!["S", "  a", "  ε", "  b"]);
}

#[test]
fn test_scenario_aabb() {
    let tree = build(pair_count("aabb").unwrap());
    assert_eq!(
        render(&tree),
        vec!["S", "  a", "  S", "    a", "    ε", "    b", "  b"]
    );
}

#[test]
fn test_scenario_empty() {
    assert_eq!(pair_count("").unwrap(), 0);
    assert_eq!(build(0), DerivationTree::Leaf);
}

#[test]
fn test_grammar_tree_equals_built_tree() {
    for n in 0..12 {
        assert_eq!(parse_derivation(&pair_string(n)).unwrap(), build(n));
    }
}

#[test]
fn test_negative_pair_count_fails_fast() {
    let err = try_build(-1).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidArgument { .. }));
    assert!(try_build(3).is_ok());
}

#[test]
fn test_lenient_and_strict_pair_count() {
    assert_eq!(leading_pairs("aab"), 2);
    assert!(pair_count("aab").is_err());
    assert_eq!(pair_count("aaabbb").unwrap(), 3);
}

#[test]
fn test_arena_rendering_matches_boxed() {
    let renderer = TreeRenderer::default();
    for n in 0..10 {
        assert_eq!(
            renderer.render_arena(&DerivationArena::build(n)),
            renderer.render(&build(n))
        );
    }
}

#[test]
fn test_custom_renderer() {
    let renderer = TreeRenderer::new("\t", "<e>");
    assert_eq!(renderer.render(&build(1)), vec!["S", "\ta", "\t<e>", "\tb"]);
}
