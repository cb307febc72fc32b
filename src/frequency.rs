//! Letter-frequency ranking, the prime assignment derived from it, and the
//! cheap pre-filter predicates built on both.
//!
//! The default order was obtained by counting a reference word list and runs
//! rarest-first (`Q` before `E`). A deployment whose dictionary ranks letters
//! differently can build a table from its own order with
//! [`FrequencyTable::from_order`]; everything downstream only depends on the
//! table it is handed.

use std::sync::LazyLock;

use crate::errors::QueryError;
use crate::letters::{letter_to_index, index_to_letter, LetterPool, ALPHABET_SIZE};
use crate::pipeline::{Predicate, Verdict};
use crate::query::Query;

/// Letter order counted from the reference word list, rarest-first.
pub const DEFAULT_FREQUENCY_ORDER: &str = "QJXZWKVFYBHGMPUDCLOTNRAISE";

// The first 26 primes, assigned positionally to the frequency order.
const PRIMES: [u128; ALPHABET_SIZE] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101,
];

static DEFAULT_TABLE: LazyLock<FrequencyTable> = LazyLock::new(|| {
    FrequencyTable::from_order(DEFAULT_FREQUENCY_ORDER)
        .unwrap_or_else(|e| unreachable!("default frequency order is a valid permutation: {e}"))
});

/// Process-wide table shared read-only across queries.
pub fn default_table() -> &'static FrequencyTable {
    &DEFAULT_TABLE
}

/// A fixed ranking of the 26 letters plus the positional prime assignment.
///
/// Immutable after construction; safe to share across threads.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    /// Letter indices in ranking order (rarest-first for the default).
    order: [usize; ALPHABET_SIZE],
    /// Letter index -> position in `order`.
    rank: [usize; ALPHABET_SIZE],
    /// Letter index -> assigned prime (i-th letter of `order` gets the i-th prime).
    primes: [u128; ALPHABET_SIZE],
}

impl FrequencyTable {
    /// Build a table from a 26-letter order string. The order must be a
    /// permutation of the uppercase alphabet; anything else is rejected.
    pub fn from_order(order_str: &str) -> Result<Self, Box<QueryError>> {
        let invalid = || Box::new(QueryError::InvalidFrequencyOrder { order: order_str.to_string() });

        let mut order = [0usize; ALPHABET_SIZE];
        let mut rank = [usize::MAX; ALPHABET_SIZE];
        let mut primes = [0u128; ALPHABET_SIZE];
        let mut seen = 0;

        for (position, c) in order_str.chars().enumerate() {
            if position >= ALPHABET_SIZE {
                return Err(invalid());
            }
            let index = letter_to_index(c).ok_or_else(invalid)?;
            if rank[index] != usize::MAX {
                return Err(invalid()); // repeated letter
            }
            order[position] = index;
            rank[index] = position;
            primes[index] = PRIMES[position];
            seen += 1;
        }

        if seen != ALPHABET_SIZE {
            return Err(invalid());
        }

        Ok(FrequencyTable { order, rank, primes })
    }

    /// Prime assigned to the letter at `index`.
    pub(crate) fn prime(&self, index: usize) -> u128 {
        self.primes[index]
    }

    /// Ranking position of the letter at `index` (0 = first in the order).
    pub fn rank(&self, index: usize) -> usize {
        self.rank[index]
    }

    /// Sort letters by table rank, keeping duplicates. Non-letter characters
    /// are dropped.
    ///
    /// `freq_sort("QUINZHEE")` with the default table yields `"QZHUNIEE"`.
    pub fn freq_sort(&self, letters: &str) -> String {
        let mut indices: Vec<usize> = letters
            .chars()
            .filter_map(|c| letter_to_index(c.to_ascii_uppercase()))
            .collect();
        indices.sort_by_key(|&index| self.rank[index]);
        indices.into_iter().map(index_to_letter).collect()
    }

    /// First letter in table order that is present in `pool`, or `None` when
    /// the pool is empty.
    pub(crate) fn least_common_in(&self, pool: &LetterPool) -> Option<char> {
        self.order
            .iter()
            .find(|&&index| pool[index])
            .map(|&index| index_to_letter(index))
    }

    /// First letter scanning the table in reverse that is absent from `pool`,
    /// or `None` when the pool covers the whole alphabet.
    pub(crate) fn most_common_missing(&self, pool: &LetterPool) -> Option<char> {
        self.order
            .iter()
            .rev()
            .find(|&&index| !pool[index])
            .map(|&index| index_to_letter(index))
    }
}

/// "Word must contain the query's rarest letter."
///
/// `None` when the pool is empty (no letter to pivot on) — the heuristic is
/// simply not applicable, which callers treat as a no-op.
pub fn least_common_letter_included(table: &FrequencyTable, pool: &LetterPool) -> Option<Predicate> {
    let c = table.least_common_in(pool)?;
    Some(Box::new(move |word| Verdict::of(word.contains(c))))
}

/// "Word must not contain the commonest letter the query cannot supply."
///
/// `None` when the pool covers the full alphabet (every letter is available,
/// so no exclusion is decisive).
pub fn most_common_letter_excluded(table: &FrequencyTable, pool: &LetterPool) -> Option<Predicate> {
    let c = table.most_common_missing(pool)?;
    Some(Box::new(move |word| Verdict::of(!word.contains(c))))
}

/// Build the applicable frequency heuristics for a query, cheapest filters
/// for the front of a pipeline. May return fewer than two predicates; an
/// empty result means neither heuristic applies and is not an error.
///
/// These are optimizations only — omitting them never changes the accepted
/// set — which constrains when each applies:
///
/// - the inclusion pivot must be a *required* letter (every match contains
///   each required letter; an optional or blank-covered letter may be
///   absent from a legitimate match);
/// - the exclusion test is sound only when the query has no blanks (a blank
///   can legally cover the excluded letter).
pub fn build_frequency_heuristics(table: &FrequencyTable, query: &Query) -> Vec<Predicate> {
    let mut predicates = Vec::with_capacity(2);

    let mut required_pool = [false; ALPHABET_SIZE];
    query.required.mark_pool(&mut required_pool);
    if let Some(predicate) = least_common_letter_included(table, &required_pool) {
        predicates.push(predicate);
    }

    if query.blanks == 0 {
        if let Some(predicate) = most_common_letter_excluded(table, &query.letter_pool()) {
            predicates.push(predicate);
        }
    }

    predicates
}
