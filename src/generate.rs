//! Sample strings: members of aⁿbⁿ and distractors over the same alphabet.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::errors::{unspanned, AnbnError, ErrorReporting, PhaseContext};
use crate::recognizer::accepts;
use crate::symbol::ALPHABET;

// Using a concrete, seedable PRNG for determinism.
type SmallRng = Xoshiro256StarStar;

/// Hand-picked non-members: unequal counts, reversed order, interleaving.
pub const CURATED_INVALID: [&str; 5] = ["aab", "aabbbb", "ba", "abab", "bbbaaaa"];

/// n copies of `a` followed by n copies of `b`.
pub fn pair_string(n: usize) -> String {
    let mut s = String::with_capacity(2 * n);
    s.extend(std::iter::repeat('a').take(n));
    s.extend(std::iter::repeat('b').take(n));
    s
}

/// aⁿbⁿ for every n in `0..=max_n`, in increasing order. Always starts with "".
pub fn valid_strings(max_n: usize) -> Vec<String> {
    (0..=max_n).map(pair_string).collect()
}

/// The curated distractors, in fixed order.
pub fn invalid_strings() -> Vec<String> {
    CURATED_INVALID.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// RANDOM DISTRACTORS
// ============================================================================

/// Random strings over {a, b} that the recognizer rejects.
///
/// Lengths are drawn from `1..=max_len`. Candidates that happen to be members are
/// discarded and redrawn; every odd length is a non-member, so this always terminates.
#[derive(Clone, Debug)]
pub struct DistractorGenerator {
    prng: SmallRng,
    max_len: usize,
}

impl DistractorGenerator {
    /// A reproducible generator: the same seed yields the same sequence.
    pub fn from_seed(seed: u64, max_len: usize) -> Result<Self, AnbnError> {
        Self::with_prng(SmallRng::seed_from_u64(seed), max_len)
    }

    pub fn from_entropy(max_len: usize) -> Result<Self, AnbnError> {
        Self::with_prng(SmallRng::from_entropy(), max_len)
    }

    fn with_prng(prng: SmallRng, max_len: usize) -> Result<Self, AnbnError> {
        if max_len == 0 {
            return Err(PhaseContext::detached("generate").invalid_argument(
                "max_len",
                "distractors need at least one symbol; the only string of length 0 is a member",
                unspanned(),
            ));
        }
        Ok(Self { prng, max_len })
    }

    pub fn next_distractor(&mut self) -> String {
        loop {
            let len = self.prng.gen_range(1..=self.max_len);
            let candidate: String = (0..len)
                .map(|_| ALPHABET[self.prng.gen_range(0..ALPHABET.len())].as_char())
                .collect();
            if !accepts(&candidate) {
                return candidate;
            }
        }
    }

    pub fn generate(&mut self, count: usize) -> Vec<String> {
        (0..count).map(|_| self.next_distractor()).collect()
    }
}

impl Iterator for DistractorGenerator {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        Some(self.next_distractor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_strings() {
        assert_eq!(valid_strings(0), vec![""]);
        assert_eq!(valid_strings(2), vec!["", "ab", "aabb"]);
        assert_eq!(valid_strings(5).len(), 6);
    }

    #[test]
    fn test_curated_strings_are_all_rejected() {
        let invalid = invalid_strings();
        assert!(invalid.len() >= 2);
        assert!(invalid.iter().all(|s| !accepts(s)));
    }

    #[test]
    fn test_distractors_are_reproducible() {
        let a = DistractorGenerator::from_seed(7, 6).unwrap().generate(20);
        let b = DistractorGenerator::from_seed(7, 6).unwrap().generate(20);
        assert_eq!(a, b);
    }

    #[test]
    fn test_distractors_are_rejected_and_bounded() {
        let mut generator = DistractorGenerator::from_seed(42, 4).unwrap();
        for s in generator.by_ref().take(200) {
            assert!(!accepts(&s), "{s:?} should be rejected");
            assert!((1..=4).contains(&s.len()));
            assert!(s.chars().all(|c| c == 'a' || c == 'b'));
        }
    }

    #[test]
    fn test_zero_max_len_is_invalid() {
        assert!(DistractorGenerator::from_seed(1, 0).is_err());
    }
}
