//! Prime-encoded multiset containment.
//!
//! Each letter maps to a distinct prime (see [`crate::frequency`]), so the
//! product over a string's letters encodes its letter multiset exactly:
//! divisibility of the word product by the query product holds iff every
//! query letter occurs in the word at least as often. This answers plain
//! containment only — no required/optional split, no blanks — and exists as
//! a fast path for scanning very large lists; it is not a replacement for
//! [`crate::matcher`].
//!
//! Products are computed in `u128` with checked multiplication. A query
//! whose product cannot fit is a fail-fast capacity error; a *word* whose
//! product cannot fit falls back to the exact counting containment test,
//! which is always correct, so wraparound is unreachable either way.

use crate::errors::QueryError;
use crate::frequency::FrequencyTable;
use crate::letters::{letter_to_index, word_letter_counts, LetterCounts};
use crate::pipeline::{Predicate, Verdict};

/// Product of the assigned primes over a letter multiset.
/// `None` when the product overflows `u128`.
fn counts_product(table: &FrequencyTable, letters: &LetterCounts) -> Option<u128> {
    let mut product = 1u128;
    for (index, count) in letters.iter_counts() {
        for _ in 0..count {
            product = product.checked_mul(table.prime(index))?;
        }
    }
    Some(product)
}

/// Per-word product outcome.
enum WordProduct {
    Value(u128),
    /// The word holds a character outside `A..=Z`; no containment query can
    /// cover it.
    Unmappable,
    /// The product does not fit `u128` (a pathologically long word).
    Overflow,
}

fn word_product(table: &FrequencyTable, word: &str) -> WordProduct {
    let mut product = 1u128;
    for c in word.chars() {
        let Some(index) = letter_to_index(c) else {
            return WordProduct::Unmappable;
        };
        match product.checked_mul(table.prime(index)) {
            Some(next) => product = next,
            None => return WordProduct::Overflow,
        }
    }
    WordProduct::Value(product)
}

/// Build a predicate answering "does the word contain at least these
/// letters, with multiplicity".
///
/// Words whose product would overflow are routed through the counting
/// containment test instead — slower, but exact, so the filter's accepted
/// set never depends on which path ran.
///
/// # Errors
///
/// `Q004` if the query letters' own product overflows `u128`; such a query
/// is beyond the encoding's capacity and must not be silently wrapped.
pub fn build_subset_filter(
    table: &FrequencyTable,
    letters: &LetterCounts,
) -> Result<Predicate, Box<QueryError>> {
    let n = counts_product(table, letters).ok_or_else(|| {
        Box::new(QueryError::CapacityExceeded { letters: letters.to_uppercase_string() })
    })?;

    let table = table.clone();
    let letters = letters.clone();
    Ok(Box::new(move |word| match word_product(&table, word) {
        WordProduct::Value(m) => Verdict::of(m % n == 0),
        WordProduct::Unmappable => Verdict::Reject,
        WordProduct::Overflow => {
            let (counts, _) = word_letter_counts(word);
            Verdict::of(letters.is_covered_by(&counts))
        }
    }))
}
