use crate::errors::QueryError;

// Character-set constants
pub(crate) const ALPHABET_SIZE: usize = 26;
pub(crate) const REQUIRED_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub(crate) const OPTIONAL_CHARS: &str = "abcdefghijklmnopqrstuvwxyz";
pub(crate) const DIGIT_CHARS: &str = "0123456789";

/// Set of distinct letters, indexed by letter position (`A` = 0).
pub type LetterPool = [bool; ALPHABET_SIZE];

// 'A' -> 0, 'B' -> 1, ..., 'Z' -> 25; None for anything else
pub(crate) fn letter_to_index(c: char) -> Option<usize> {
    (c as usize)
        .checked_sub('A' as usize)
        .filter(|&diff| diff < ALPHABET_SIZE)
}

// 0 -> 'A', ..., 25 -> 'Z'; caller guarantees index < 26
pub(crate) fn index_to_letter(index: usize) -> char {
    debug_assert!(index < ALPHABET_SIZE);
    (b'A' + index as u8) as char
}

/// A multiset of letters stored as a fixed per-letter count array.
///
/// The 26-letter domain is closed, so counting uses a flat `[u8; 26]` rather
/// than an associative structure; the total length is tracked alongside so
/// callers never re-sum the array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterCounts {
    counts: [u8; ALPHABET_SIZE],
    len: usize,
}

impl LetterCounts {
    /// Build from a string of letters (either case), normalizing to uppercase.
    /// `field` names the source field in the validation error for non-letters.
    pub fn from_letters(s: &str, field: &'static str) -> Result<Self, Box<QueryError>> {
        let mut counts = LetterCounts::default();
        for c in s.chars() {
            let index = letter_to_index(c.to_ascii_uppercase()).ok_or_else(|| {
                Box::new(QueryError::InvalidLetter { field, invalid_char: c })
            })?;
            counts.push(index);
        }
        Ok(counts)
    }

    /// Add one occurrence of the letter at `index`. Saturates at the `u8`
    /// ceiling so incremental construction stays total.
    pub(crate) fn push(&mut self, index: usize) {
        let count = &mut self.counts[index];
        if *count < u8::MAX {
            *count += 1;
            self.len += 1;
        }
    }

    /// Occurrences of the letter at `index`.
    pub fn count(&self, index: usize) -> usize {
        self.counts[index] as usize
    }

    /// Total number of letters, counting multiplicity.
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if the letter at `index` occurs at least once.
    pub fn contains(&self, index: usize) -> bool {
        self.counts[index] > 0
    }

    // Iterate over (letter index, count) pairs with nonzero counts.
    pub(crate) fn iter_counts(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(index, &count)| (index, count as usize))
    }

    /// Mark every letter present here in `pool`.
    pub(crate) fn mark_pool(&self, pool: &mut LetterPool) {
        for (index, _) in self.iter_counts() {
            pool[index] = true;
        }
    }

    /// Multiset containment: every count here is ≤ the corresponding count
    /// in `word_counts`.
    pub(crate) fn is_covered_by(&self, word_counts: &[usize; ALPHABET_SIZE]) -> bool {
        self.iter_counts().all(|(index, count)| word_counts[index] >= count)
    }

    /// Canonical sorted rendering, uppercase (e.g. `"ADEF"`).
    pub fn to_uppercase_string(&self) -> String {
        self.render(false)
    }

    /// Canonical sorted rendering, lowercase (e.g. `"adef"`).
    pub fn to_lowercase_string(&self) -> String {
        self.render(true)
    }

    fn render(&self, lowercase: bool) -> String {
        let mut out = String::with_capacity(self.len);
        for (index, count) in self.iter_counts() {
            let c = index_to_letter(index);
            let c = if lowercase { c.to_ascii_lowercase() } else { c };
            for _ in 0..count {
                out.push(c);
            }
        }
        out
    }
}

/// Count the letters of a candidate word into a fixed array, returning the
/// counts plus the word's total character length. Characters outside `A..=Z`
/// contribute to the length but to no letter bucket, so only blanks can ever
/// account for them.
pub(crate) fn word_letter_counts(word: &str) -> ([usize; ALPHABET_SIZE], usize) {
    let mut counts = [0usize; ALPHABET_SIZE];
    let mut total = 0;
    for c in word.chars() {
        if let Some(index) = letter_to_index(c) {
            counts[index] += 1;
        }
        total += 1;
    }
    (counts, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_to_index_valid() {
        assert_eq!(letter_to_index('A'), Some(0));
        assert_eq!(letter_to_index('B'), Some(1));
        assert_eq!(letter_to_index('Z'), Some(25));
    }

    #[test]
    fn test_letter_to_index_out_of_range() {
        assert_eq!(letter_to_index('@'), None); // one before 'A'
        assert_eq!(letter_to_index('['), None); // one after 'Z'
        assert_eq!(letter_to_index('a'), None); // lowercase
        assert_eq!(letter_to_index('5'), None);
    }

    #[test]
    fn test_index_to_letter_round_trip() {
        for index in 0..ALPHABET_SIZE {
            assert_eq!(letter_to_index(index_to_letter(index)), Some(index));
        }
    }

    #[test]
    fn test_from_letters_counts_multiplicity() {
        let counts = LetterCounts::from_letters("BANANA", "required").unwrap();
        assert_eq!(counts.len(), 6);
        assert_eq!(counts.count(0), 3); // A
        assert_eq!(counts.count(13), 2); // N
        assert_eq!(counts.count(1), 1); // B
        assert_eq!(counts.count(25), 0); // Z
    }

    #[test]
    fn test_from_letters_normalizes_case() {
        let lower = LetterCounts::from_letters("banana", "optional").unwrap();
        let upper = LetterCounts::from_letters("BANANA", "optional").unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_from_letters_rejects_non_letters() {
        let err = LetterCounts::from_letters("AB3", "required").unwrap_err();
        assert_eq!(err.code(), "Q002");
        assert!(err.to_string().contains("required"));
    }

    #[test]
    fn test_canonical_rendering_is_sorted() {
        let counts = LetterCounts::from_letters("FED", "required").unwrap();
        assert_eq!(counts.to_uppercase_string(), "DEF");
        assert_eq!(counts.to_lowercase_string(), "def");
    }

    #[test]
    fn test_is_covered_by() {
        let counts = LetterCounts::from_letters("ALL", "required").unwrap();
        let (word, _) = word_letter_counts("TALLER");
        assert!(counts.is_covered_by(&word));
        let (word, _) = word_letter_counts("TALE"); // only one L
        assert!(!counts.is_covered_by(&word));
    }

    #[test]
    fn test_word_letter_counts_non_letters() {
        let (counts, total) = word_letter_counts("A-B");
        assert_eq!(total, 3);
        assert_eq!(counts[0], 1);
        assert_eq!(counts[1], 1);
        assert_eq!(counts.iter().sum::<usize>(), 2);
    }

    #[test]
    fn test_empty() {
        let counts = LetterCounts::default();
        assert!(counts.is_empty());
        assert_eq!(counts.to_uppercase_string(), "");
    }
}
