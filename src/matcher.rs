//! The exact multiset matcher: can a word be formed from the query's
//! required letters, a subset of its optional letters, and up to `blanks`
//! wildcard letters?

use crate::letters::word_letter_counts;
use crate::pipeline::{Predicate, Verdict};
use crate::query::Query;

/// Decide whether `word` satisfies `query`.
///
/// `target` starts at the word's length and drops as query letters explain
/// word letters; the word matches when at most `blanks` letters remain
/// unexplained. Required letters are consumed from the working count array
/// first, so an optional copy of the same letter can never double-count an
/// occurrence already claimed as required.
pub fn matches(query: &Query, word: &str) -> bool {
    let (mut counts, mut target) = word_letter_counts(word);

    // Pass 1: required letters. A shortfall rejects outright; matched
    // occurrences are consumed so the optional pass cannot reuse them.
    for (index, required) in query.required.iter_counts() {
        if counts[index] < required {
            return false;
        }
        counts[index] -= required;
        target -= required;
    }

    // Pass 2: optional letters explain whatever is left of them in the word;
    // a shortfall just contributes nothing.
    for (index, optional) in query.optional.iter_counts() {
        target -= optional.min(counts[index]);
    }

    // Pass 3: blanks cover the rest, if they can.
    target <= query.blanks
}

/// Package the exact matcher as a pipeline predicate.
pub fn build_matcher(query: &Query) -> Predicate {
    let query = query.clone();
    Box::new(move |word| Verdict::of(matches(&query, word)))
}
