//! Grammar-driven recognition with pest.
//!
//! Parses candidates directly against S → aSb | ε. This is an independent route to the same
//! answers the pushdown recognizer gives, and the parse itself is the derivation: every
//! nested `sentence` pair is one application of S → aSb.

use pest::{
    error::{Error, InputLocation},
    iterators::Pair,
    Parser,
};
use pest_derive::Parser;

use crate::errors::{unspanned, AnbnError, ErrorKind, ErrorReporting, PhaseContext};
use crate::tree::DerivationTree;

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct PairGrammar;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Membership according to the grammar.
pub fn grammar_accepts(input: &str) -> bool {
    PairGrammar::parse(Rule::input, input).is_ok()
}

/// Parses `input` and returns its leftmost derivation tree.
pub fn parse_derivation(input: &str) -> Result<DerivationTree, AnbnError> {
    let context = PhaseContext::for_input(input, "grammar");

    let mut pairs = PairGrammar::parse(Rule::input, input)
        .map_err(|error| convert_parse_error(error, input, &context))?;

    let sentence = pairs
        .next()
        .and_then(|program| {
            program
                .into_inner()
                .find(|pair| pair.as_rule() == Rule::sentence)
        })
        .ok_or_else(|| {
            context.report(
                ErrorKind::GrammarMismatch {
                    input: input.to_string(),
                    message: "parse produced no start symbol".into(),
                },
                unspanned(),
            )
        })?;

    Ok(build_tree(sentence))
}

// ============================================================================
// TREE BUILDING
// ============================================================================

/// Follows the chain of nested `sentence` pairs, then wraps the ε leaf once per level.
fn build_tree(sentence: Pair<Rule>) -> DerivationTree {
    let mut applications = 0;
    let mut current = Some(sentence);
    while let Some(pair) = current {
        current = pair
            .into_inner()
            .find(|inner| inner.as_rule() == Rule::sentence);
        if current.is_some() {
            applications += 1;
        }
    }

    (0..applications).fold(DerivationTree::Leaf, |child, _| {
        DerivationTree::internal(child)
    })
}

fn convert_parse_error(error: Error<Rule>, input: &str, context: &PhaseContext) -> AnbnError {
    let span = match error.location {
        InputLocation::Pos(pos) => miette::SourceSpan::from(pos..pos),
        InputLocation::Span((start, end)) => miette::SourceSpan::from(start..end),
    };

    context.report(
        ErrorKind::GrammarMismatch {
            input: input.to_string(),
            message: error.variant.message().into_owned(),
        },
        span,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build;

    #[test]
    fn test_empty_input() {
        assert!(grammar_accepts(""));
        assert_eq!(parse_derivation("").unwrap(), DerivationTree::Leaf);
    }

    #[test]
    fn test_members() {
        for n in 1..6 {
            let s = format!("{}{}", "a".repeat(n), "b".repeat(n));
            assert!(grammar_accepts(&s));
            assert_eq!(parse_derivation(&s).unwrap(), build(n));
        }
    }

    #[test]
    fn test_non_members() {
        for s in ["a", "b", "ba", "aab", "abb", "abab", "ac"] {
            assert!(!grammar_accepts(s), "{s:?} should not parse");
        }
    }

    #[test]
    fn test_parse_error_is_grammar_mismatch() {
        let err = parse_derivation("abab").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::GrammarMismatch { .. }));
        assert_eq!(err.diagnostic_info.error_code, "anbn::grammar::grammar_mismatch");
    }
}
