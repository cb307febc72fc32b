//! `word_list` — load and preprocess a dictionary word list.
//!
//! The input format is one word per line. Lines are trimmed, blank lines are
//! skipped, and words are normalized to uppercase (the whole engine works in
//! uppercase). The final list is deduplicated and sorted by length first,
//! then alphabetically.
//!
//! That length ordering is a load-bearing guarantee: it is what lets a
//! length-range predicate built with `assume_sorted_by_length` emit
//! [`crate::pipeline::Verdict::Halt`] and cut a scan short without losing
//! matches.

/// A processed, ready-to-scan word list.
#[derive(Debug, Clone)]
pub struct WordList {
    /// Uppercase words, sorted by (length, alphabetical).
    /// Example: `["CAT", "DOG", "APPLE", ...]`
    pub words: Vec<String>,
}

impl WordList {
    /// Parse a raw word list from an in-memory string.
    ///
    /// 1. Splits the input into lines and trims each one.
    /// 2. Skips empty lines.
    /// 3. Normalizes every word to uppercase.
    /// 4. Deduplicates (case-insensitively, since normalization came first).
    /// 5. Sorts by length, then alphabetically.
    pub fn parse_from_str(contents: &str) -> WordList {
        let mut words: Vec<String> = contents
            .lines()
            .filter_map(|raw_line| {
                let line = raw_line.trim();
                if line.is_empty() {
                    None
                } else {
                    Some(line.to_uppercase())
                }
            })
            .collect();

        // Sort alphabetically first: `dedup` only removes *adjacent*
        // duplicates, so equal words must be brought next to each other.
        words.sort();
        words.dedup();

        // Then the (length, alphabetical) order the scan pipeline relies on.
        words.sort_by(|a, b| match a.len().cmp(&b.len()) {
            std::cmp::Ordering::Equal => a.cmp(b),
            other => other,
        });

        WordList { words }
    }

    /// Convenience method: read from a file path and parse.
    ///
    /// # Errors
    ///
    /// Will return an `Error` if unable to read a file at `path`.
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> std::io::Result<WordList> {
        let path_ref = path.as_ref();

        let data = std::fs::read_to_string(path_ref).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("failed to read word list from '{}': {}", path_ref.display(), e),
            )
        })?;

        Ok(Self::parse_from_str(&data))
    }

    /// Borrowing iterator over the words, in (length, alphabetical) order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}
