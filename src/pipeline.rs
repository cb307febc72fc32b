//! Predicate composition and lazy application over word streams.
//!
//! Every filter in the engine is a [`Predicate`]: a pure function from a
//! candidate word to a [`Verdict`]. Early termination against length-sorted
//! streams is an explicit `Halt` verdict consumed by the pipeline driver,
//! not a control-flow exception — the scan loop simply stops pulling.

/// Outcome of testing one candidate word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Word passes this filter.
    Accept,
    /// Word fails this filter; keep scanning.
    Reject,
    /// Word fails and no later word in the stream can pass (only valid when
    /// the stream is sorted by non-decreasing length); stop the scan.
    Halt,
}

impl Verdict {
    /// Lift a plain boolean test into a verdict.
    pub fn of(accept: bool) -> Self {
        if accept { Verdict::Accept } else { Verdict::Reject }
    }
}

/// A single-word filter. Stateless and freely composable; ordering within a
/// pipeline affects throughput, never the accepted set.
pub type Predicate = Box<dyn Fn(&str) -> Verdict + Send + Sync>;

/// Combine an ordered list of predicates into one conjunction.
///
/// Short-circuits on the first non-`Accept` verdict, so cheap filters should
/// come first. `Halt` propagates so composed pipelines keep the
/// early-termination signal of their parts.
pub fn compose(predicates: Vec<Predicate>) -> Predicate {
    Box::new(move |word| {
        for predicate in &predicates {
            match predicate(word) {
                Verdict::Accept => {}
                verdict => return verdict,
            }
        }
        Verdict::Accept
    })
}

/// Bound word length to `lower <= len < upper`.
///
/// With `assume_sorted_by_length`, a word at or beyond the exclusive upper
/// bound yields `Halt` instead of `Reject`: on a stream sorted by
/// non-decreasing length no later word can be shorter, so the scan may stop.
/// Callers must only set the flag when the source guarantees that ordering
/// (see [`crate::word_list::WordList`]); on an unsorted stream it would
/// truncate results.
pub fn length_range(lower: usize, upper: usize, assume_sorted_by_length: bool) -> Predicate {
    Box::new(move |word| {
        let n = word.chars().count();
        if n < lower {
            Verdict::Reject
        } else if n >= upper {
            if assume_sorted_by_length { Verdict::Halt } else { Verdict::Reject }
        } else {
            Verdict::Accept
        }
    })
}

/// Lazy filtering iterator returned by [`apply`].
///
/// Pull-based: no word is tested before the consumer asks for it, and a
/// consumer that stops pulling causes no further scanning. A `Halt` verdict
/// fuses the iterator.
pub struct Filtered<I> {
    words: I,
    predicate: Predicate,
    halted: bool,
}

impl<S: AsRef<str>, I: Iterator<Item = S>> Iterator for Filtered<I> {
    type Item = S;

    fn next(&mut self) -> Option<S> {
        if self.halted {
            return None;
        }
        loop {
            let word = self.words.next()?;
            match (self.predicate)(word.as_ref()) {
                Verdict::Accept => return Some(word),
                Verdict::Reject => {}
                Verdict::Halt => {
                    self.halted = true;
                    return None;
                }
            }
        }
    }
}

/// Apply a predicate lazily over a word stream.
pub fn apply<S: AsRef<str>, I: Iterator<Item = S>>(predicate: Predicate, words: I) -> Filtered<I> {
    Filtered { words, predicate, halted: false }
}
