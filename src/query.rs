//! The query model and the distiller that builds it.
//!
//! A raw letter specification mixes three alphabets: uppercase letters are
//! required, lowercase letters are optional (normalized to uppercase), and
//! decimal digits accumulate into the blank count. Every other character is
//! ignored, so distillation is total — any string, including the empty one,
//! produces a query.
//!
//! Callers that already hold separated fields use [`QuerySpec`] instead;
//! that path validates (negative blanks and non-letters are errors, never
//! silently clamped).

use nom::{
    branch::alt,
    character::complete::{anychar, one_of},
    combinator::map,
    IResult,
    Parser,
};

use crate::errors::QueryError;
use crate::letters::{
    letter_to_index, LetterCounts, LetterPool, ALPHABET_SIZE, DIGIT_CHARS, OPTIONAL_CHARS,
    REQUIRED_CHARS,
};

/// Parser result type: input, output, with our custom `QueryError`
type PResult<'a, O> = IResult<&'a str, O, Box<QueryError>>;

/// A structured letter-pool constraint, immutable once built.
///
/// `required` and `optional` may overlap in letter identity; they are tracked
/// as independent counts and the matcher consumes the required count first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Letters every match must contain, with multiplicity.
    pub required: LetterCounts,
    /// Letters a match may draw on, with multiplicity.
    pub optional: LetterCounts,
    /// Wildcard credits covering letters the pools do not explain.
    pub blanks: usize,
}

/// Already-separated query fields, for callers that do not hold a raw spec
/// string. Absent fields default to empty / zero, matching the string form.
#[derive(Debug, Clone, Default)]
pub struct QuerySpec {
    pub required: Option<String>,
    pub optional: Option<String>,
    pub blanks: Option<i64>,
}

// === Token parsers ===

/// One classified character of a raw spec string.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SpecToken {
    Required(char),
    Optional(char),
    Digit(char),
    Ignored,
}

fn required_letter(input: &'_ str) -> PResult<'_, SpecToken> {
    map(one_of(REQUIRED_CHARS), SpecToken::Required).parse(input)
}
fn optional_letter(input: &'_ str) -> PResult<'_, SpecToken> {
    map(one_of(OPTIONAL_CHARS), SpecToken::Optional).parse(input)
}
fn blank_digit(input: &'_ str) -> PResult<'_, SpecToken> {
    map(one_of(DIGIT_CHARS), SpecToken::Digit).parse(input)
}
fn ignored(input: &'_ str) -> PResult<'_, SpecToken> {
    map(anychar, |_| SpecToken::Ignored).parse(input)
}

fn spec_token(input: &'_ str) -> PResult<'_, SpecToken> {
    alt((required_letter, optional_letter, blank_digit, ignored)).parse(input)
}

/// Distill a raw specification string into a [`Query`].
///
/// Walks the input one classified character at a time. Digits scattered
/// through the string concatenate into a single blank count (`"a1b2"` means
/// 12 blanks, not 3); accumulation saturates so adversarial digit runs stay
/// total rather than erroring.
pub fn distill(raw_spec: &str) -> Query {
    let mut required = LetterCounts::default();
    let mut optional = LetterCounts::default();
    let mut blanks = 0usize;

    let mut rest = raw_spec;
    while !rest.is_empty() {
        match spec_token(rest) {
            Ok((next, token)) => {
                match token {
                    SpecToken::Required(c) => {
                        if let Some(index) = letter_to_index(c) {
                            required.push(index);
                        }
                    }
                    SpecToken::Optional(c) => {
                        if let Some(index) = letter_to_index(c.to_ascii_uppercase()) {
                            optional.push(index);
                        }
                    }
                    SpecToken::Digit(c) => {
                        if let Some(d) = c.to_digit(10) {
                            blanks = blanks.saturating_mul(10).saturating_add(d as usize);
                        }
                    }
                    SpecToken::Ignored => {}
                }
                rest = next;
            }
            // `anychar` consumes any non-empty input, so this arm is only a
            // guard; skip one character and keep going.
            Err(_) => {
                let skip = rest.chars().next().map_or(1, char::len_utf8);
                rest = &rest[skip..];
            }
        }
    }

    Query { required, optional, blanks }
}

impl Query {
    /// Build a query from already-separated fields, validating each one.
    ///
    /// # Errors
    ///
    /// `Q001` for a negative blank count, `Q002` for a non-letter character
    /// in `required` or `optional`.
    pub fn from_spec(spec: &QuerySpec) -> Result<Self, Box<QueryError>> {
        let required = match &spec.required {
            Some(s) => LetterCounts::from_letters(s, "required")?,
            None => LetterCounts::default(),
        };
        let optional = match &spec.optional {
            Some(s) => LetterCounts::from_letters(s, "optional")?,
            None => LetterCounts::default(),
        };
        let blanks = match spec.blanks {
            Some(b) if b < 0 => return Err(Box::new(QueryError::NegativeBlanks { blanks: b })),
            Some(b) => b as usize,
            None => 0,
        };

        Ok(Query { required, optional, blanks })
    }

    /// Canonical spec-string rendering: required letters uppercase sorted,
    /// optional letters lowercase sorted, blank count appended if nonzero.
    /// Distilling this string reproduces the query exactly.
    pub fn to_spec_string(&self) -> String {
        let mut out = self.required.to_uppercase_string();
        out.push_str(&self.optional.to_lowercase_string());
        if self.blanks > 0 {
            out.push_str(&self.blanks.to_string());
        }
        out
    }

    /// The combined letter set of both pools, for the frequency heuristics.
    pub fn letter_pool(&self) -> LetterPool {
        let mut pool = [false; ALPHABET_SIZE];
        self.required.mark_pool(&mut pool);
        self.optional.mark_pool(&mut pool);
        pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(s: &str) -> LetterCounts {
        LetterCounts::from_letters(s, "test").unwrap()
    }

    #[test]
    fn test_distill_mixed_spec() {
        let query = distill("aDbEdF2");
        assert_eq!(query.required, counts("DEF"));
        assert_eq!(query.optional, counts("ABD"));
        assert_eq!(query.blanks, 2);
    }

    #[test]
    fn test_distill_all_optional() {
        let query = distill("rates1");
        assert!(query.required.is_empty());
        assert_eq!(query.optional, counts("AERST"));
        assert_eq!(query.blanks, 1);
    }

    #[test]
    fn test_distill_empty_input() {
        let query = distill("");
        assert!(query.required.is_empty());
        assert!(query.optional.is_empty());
        assert_eq!(query.blanks, 0);
    }

    #[test]
    fn test_distill_ignores_junk() {
        let query = distill("?A_b-!");
        assert_eq!(query.required, counts("A"));
        assert_eq!(query.optional, counts("B"));
        assert_eq!(query.blanks, 0);
    }

    #[test]
    fn test_distill_concatenates_digits() {
        assert_eq!(distill("a1b2").blanks, 12);
        assert_eq!(distill("12").blanks, 12);
        assert_eq!(distill("102").blanks, 102);
    }

    #[test]
    fn test_distill_saturates_absurd_digit_runs() {
        let query = distill("99999999999999999999999999999");
        assert_eq!(query.blanks, usize::MAX);
    }

    #[test]
    fn test_distill_is_total_on_non_ascii() {
        let query = distill("Aé漢b");
        assert_eq!(query.required, counts("A"));
        assert_eq!(query.optional, counts("B"));
    }

    #[test]
    fn test_to_spec_string_canonical_form() {
        let query = distill("aDbEdF2");
        assert_eq!(query.to_spec_string(), "DEFabd2");

        let no_blanks = distill("Cab");
        assert_eq!(no_blanks.to_spec_string(), "Cab");
    }

    #[test]
    fn test_distill_idempotent_on_canonical_form() {
        for raw in ["aDbEdF2", "rates1", "", "zzZZ9", "?A_b-!", "QADI"] {
            let query = distill(raw);
            assert_eq!(distill(&query.to_spec_string()), query, "round trip of {raw:?}");
        }
    }

    #[test]
    fn test_from_spec_defaults() {
        let query = Query::from_spec(&QuerySpec::default()).unwrap();
        assert_eq!(query, distill(""));
    }

    #[test]
    fn test_from_spec_matches_string_form() {
        let spec = QuerySpec {
            required: Some("DEF".to_string()),
            optional: Some("abd".to_string()),
            blanks: Some(2),
        };
        assert_eq!(Query::from_spec(&spec).unwrap(), distill("aDbEdF2"));
    }

    #[test]
    fn test_from_spec_rejects_negative_blanks() {
        let spec = QuerySpec { blanks: Some(-1), ..Default::default() };
        let err = Query::from_spec(&spec).unwrap_err();
        assert_eq!(err.code(), "Q001");
    }

    #[test]
    fn test_from_spec_rejects_non_letters() {
        let spec = QuerySpec { required: Some("AB2".to_string()), ..Default::default() };
        let err = Query::from_spec(&spec).unwrap_err();
        assert_eq!(err.code(), "Q002");
    }

    #[test]
    fn test_letter_pool_unions_both_roles() {
        let query = distill("AbC");
        let pool = query.letter_pool();
        assert!(pool[0]); // A, required
        assert!(pool[1]); // B, optional
        assert!(pool[2]); // C, required
        assert!(!pool[3]);
    }

    #[test]
    fn test_required_and_optional_overlap_kept_separate() {
        let query = distill("AaA");
        assert_eq!(query.required.count(0), 2);
        assert_eq!(query.optional.count(0), 1);
    }
}
