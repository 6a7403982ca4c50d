//! Pushdown recognition of aⁿbⁿ.
//!
//! The automaton reads its input once, left to right. While it is still in the a-phase each
//! `a` pushes one marker; the first `b` switches it to the b-phase for good, and every `b`
//! pops one marker. It rejects as soon as
//!
//! - a character outside {a, b} is read,
//! - an `a` follows any `b`,
//! - a `b` finds the stack empty,
//!
//! and otherwise accepts exactly when the stack is empty at the end of the input.
//!
//! [`accepts`] is the plain membership test. [`scan`] runs the same automaton and reports
//! which check fired; [`trace`] additionally records every step. Each call owns a fresh
//! [`Pda`], so nothing carries over between inputs.

use std::fmt;

use miette::SourceSpan;
use serde::Serialize;

use crate::errors::char_span;
use crate::symbol::Symbol;

// ============================================================================
// VERDICTS
// ============================================================================

/// Why an input was rejected. `index` is a character index into the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// A character outside the alphabet.
    ForeignSymbol { index: usize, found: char },
    /// An `a` read after a `b`.
    OutOfOrder { index: usize },
    /// A `b` read with an empty stack.
    UnmatchedB { index: usize },
    /// Markers left on the stack at the end of the input.
    UnmatchedA { remaining: usize },
}

impl Rejection {
    /// Index of the character that triggered the rejection, if one did.
    pub fn index(&self) -> Option<usize> {
        match *self {
            Rejection::ForeignSymbol { index, .. }
            | Rejection::OutOfOrder { index }
            | Rejection::UnmatchedB { index } => Some(index),
            Rejection::UnmatchedA { .. } => None,
        }
    }

    /// Where in `input` to point a diagnostic. End-of-input rejections point past the last char.
    pub fn span_in(&self, input: &str) -> SourceSpan {
        match self.index() {
            Some(index) => char_span(input, index),
            None => SourceSpan::from(input.len()..input.len()),
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Rejection::ForeignSymbol { .. } => "not in {a, b}",
            Rejection::OutOfOrder { .. } => "'a' after a 'b'",
            Rejection::UnmatchedB { .. } => "no 'a' left to match",
            Rejection::UnmatchedA { .. } => "input ends with unmatched 'a'",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::ForeignSymbol { index, found } => {
                write!(f, "{found:?} at position {index} is not in the alphabet {{a, b}}")
            }
            Rejection::OutOfOrder { index } => {
                write!(f, "'a' after a 'b' at position {index}")
            }
            Rejection::UnmatchedB { index } => {
                write!(f, "'b' at position {index} has no matching 'a'")
            }
            Rejection::UnmatchedA { remaining } => {
                write!(f, "{remaining} unmatched 'a' left at end of input")
            }
        }
    }
}

/// Outcome of one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Accepted { pairs: usize },
    Rejected { rejection: Rejection },
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }

    pub fn pairs(&self) -> Option<usize> {
        match *self {
            Verdict::Accepted { pairs } => Some(pairs),
            Verdict::Rejected { .. } => None,
        }
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match *self {
            Verdict::Accepted { .. } => None,
            Verdict::Rejected { rejection } => Some(rejection),
        }
    }
}

impl From<Rejection> for Verdict {
    fn from(rejection: Rejection) -> Self {
        Verdict::Rejected { rejection }
    }
}

// ============================================================================
// AUTOMATON
// ============================================================================

/// What a single step did to the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Push,
    Pop,
    Reject,
}

/// One run of the automaton: a private stack and the b-phase flag.
///
/// Once [`Pda::step`] returns a rejection the run is over; feeding more input afterwards
/// is meaningless.
#[derive(Debug, Default)]
pub struct Pda {
    stack: Vec<Symbol>,
    b_phase: bool,
    pushed: usize,
    index: usize,
}

impl Pda {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one character.
    pub fn step(&mut self, c: char) -> Result<Action, Rejection> {
        let index = self.index;
        self.index += 1;

        match Symbol::from_char(c) {
            Some(Symbol::A) => {
                if self.b_phase {
                    return Err(Rejection::OutOfOrder { index });
                }
                self.stack.push(Symbol::A);
                self.pushed += 1;
                Ok(Action::Push)
            }
            Some(Symbol::B) => {
                self.b_phase = true;
                match self.stack.pop() {
                    Some(_) => Ok(Action::Pop),
                    None => Err(Rejection::UnmatchedB { index }),
                }
            }
            None => Err(Rejection::ForeignSymbol { index, found: c }),
        }
    }

    /// Current stack height.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn in_b_phase(&self) -> bool {
        self.b_phase
    }

    /// Ends the run: accept iff every marker was popped.
    pub fn finish(self) -> Verdict {
        if self.stack.is_empty() {
            Verdict::Accepted { pairs: self.pushed }
        } else {
            Rejection::UnmatchedA {
                remaining: self.stack.len(),
            }
            .into()
        }
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Decides membership in aⁿbⁿ.
pub fn accepts(input: &str) -> bool {
    scan(input).is_accepted()
}

/// Runs the automaton over `input` and reports the verdict.
pub fn scan(input: &str) -> Verdict {
    scan_chars(input.chars())
}

/// Same as [`scan`] for any character sequence.
pub fn scan_chars<I: IntoIterator<Item = char>>(chars: I) -> Verdict {
    let mut pda = Pda::new();
    for c in chars {
        if let Err(rejection) = pda.step(c) {
            return rejection.into();
        }
    }
    pda.finish()
}

/// A single recorded step of [`trace`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceStep {
    pub index: usize,
    pub symbol: char,
    pub action: Action,
    /// Stack height after the step.
    pub depth: usize,
    pub b_phase: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trace {
    pub input: String,
    pub steps: Vec<TraceStep>,
    pub verdict: Verdict,
}

/// Runs the automaton and records each step. The rejecting step, if any, is the last one.
pub fn trace(input: &str) -> Trace {
    let mut pda = Pda::new();
    let mut steps = Vec::new();

    for (index, symbol) in input.chars().enumerate() {
        match pda.step(symbol) {
            Ok(action) => steps.push(TraceStep {
                index,
                symbol,
                action,
                depth: pda.depth(),
                b_phase: pda.in_b_phase(),
            }),
            Err(rejection) => {
                steps.push(TraceStep {
                    index,
                    symbol,
                    action: Action::Reject,
                    depth: pda.depth(),
                    b_phase: pda.in_b_phase(),
                });
                return Trace {
                    input: input.to_string(),
                    steps,
                    verdict: rejection.into(),
                };
            }
        }
    }

    Trace {
        input: input.to_string(),
        steps,
        verdict: pda.finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_accepted() {
        assert!(accepts(""));
        assert_eq!(scan(""), Verdict::Accepted { pairs: 0 });
    }

    #[test]
    fn test_balanced_inputs() {
        assert_eq!(scan("ab"), Verdict::Accepted { pairs: 1 });
        assert_eq!(scan("aaabbb"), Verdict::Accepted { pairs: 3 });
    }

    #[test]
    fn test_rejection_reasons() {
        assert_eq!(
            scan("aab").rejection(),
            Some(Rejection::UnmatchedA { remaining: 1 })
        );
        assert_eq!(
            scan("ba").rejection(),
            Some(Rejection::UnmatchedB { index: 0 })
        );
        assert_eq!(
            scan("abab").rejection(),
            Some(Rejection::OutOfOrder { index: 2 })
        );
        assert_eq!(
            scan("aXbb").rejection(),
            Some(Rejection::ForeignSymbol {
                index: 1,
                found: 'X'
            })
        );
    }

    #[test]
    fn test_b_phase_never_reverts() {
        let mut pda = Pda::new();
        assert_eq!(pda.step('a'), Ok(Action::Push));
        assert_eq!(pda.step('b'), Ok(Action::Pop));
        assert!(pda.in_b_phase());
        assert_eq!(pda.step('a'), Err(Rejection::OutOfOrder { index: 2 }));
        assert!(pda.in_b_phase());
    }

    #[test]
    fn test_trace_records_every_step() {
        let trace = trace("aabb");
        let actions: Vec<_> = trace.steps.iter().map(|s| s.action).collect();
        assert_eq!(
            actions,
            vec![Action::Push, Action::Push, Action::Pop, Action::Pop]
        );
        let depths: Vec<_> = trace.steps.iter().map(|s| s.depth).collect();
        assert_eq!(depths, vec![1, 2, 1, 0]);
        assert!(trace.verdict.is_accepted());
    }

    #[test]
    fn test_trace_stops_at_rejection() {
        let trace = trace("abba");
        assert_eq!(trace.steps.len(), 3);
        assert_eq!(trace.steps[2].action, Action::Reject);
        assert_eq!(
            trace.verdict.rejection(),
            Some(Rejection::UnmatchedB { index: 2 })
        );
    }

    #[test]
    fn test_rejection_span_at_end_of_input() {
        let rejection = Rejection::UnmatchedA { remaining: 2 };
        assert_eq!(rejection.span_in("aa"), SourceSpan::from(2..2));
    }
}
