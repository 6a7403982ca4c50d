//! Pair-count extraction: the n of an accepted aⁿbⁿ.

use crate::errors::{AnbnError, ErrorReporting, PhaseContext};
use crate::recognizer::{scan, Verdict};

/// Counts the leading run of `a`, stopping at the first other character.
///
/// Only meaningful for strings already known to be aⁿbⁿ: no validation happens, so
/// `leading_pairs("aab")` is 2 and `leading_pairs("ba")` is 0. Use [`pair_count`] when the
/// input is untrusted.
pub fn leading_pairs(input: &str) -> usize {
    input.chars().take_while(|&c| c == 'a').count()
}

/// The pair count of a member of the language, or `NotInLanguage` pointing at the first
/// offending character.
pub fn pair_count(input: &str) -> Result<usize, AnbnError> {
    match scan(input) {
        Verdict::Accepted { pairs } => Ok(pairs),
        Verdict::Rejected { rejection } => {
            Err(PhaseContext::for_input(input, "pairs").not_in_language(input, rejection))
        }
    }
}
