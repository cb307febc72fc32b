//! Error types for query construction with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (Q001-Q006) for documentation lookup:
//!
//! - Q001: `NegativeBlanks` (Structured query supplied a negative blank count)
//! - Q002: `InvalidLetter` (Non-letter character in a structured query field)
//! - Q003: `InvalidFrequencyOrder` (Frequency order is not a 26-letter permutation)
//! - Q004: `CapacityExceeded` (Prime product does not fit the integer width)
//! - Q005: `ContradictoryBounds` (Contradictory length bounds)
//! - Q006: `NomError` (Low-level nom parser error)
//!
//! # Examples
//!
//! ```
//! use anagram::errors::QueryError;
//!
//! fn check_blanks(blanks: i64) -> Result<usize, Box<QueryError>> {
//!     if blanks < 0 {
//!         return Err(Box::new(QueryError::NegativeBlanks { blanks }));
//!     }
//!     Ok(blanks as usize)
//! }
//!
//! match check_blanks(-1) {
//!     Err(e) => {
//!         println!("Error: {}", e);
//!         println!("Code: {}", e.code());
//!         if let Some(help) = e.help() {
//!             println!("Help: {}", help);
//!         }
//!     }
//!     Ok(_) => println!("Success"),
//! }
//! ```

use nom::error::{ErrorKind, ParseError as NomParseError};
use std::io;

/// Custom error type for query construction and filter building.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("negative blank count: {blanks}")]
    NegativeBlanks { blanks: i64 },

    #[error("invalid character '{invalid_char}' in {field} (letters only)")]
    InvalidLetter { field: &'static str, invalid_char: char },

    #[error("invalid frequency order: \"{order}\"")]
    InvalidFrequencyOrder { order: String },

    #[error("letter product for \"{letters}\" exceeds the supported word length")]
    CapacityExceeded { letters: String },

    #[error("contradictory bounds: min={min}, max={max}")]
    ContradictoryBounds { min: usize, max: usize },

    // nom parser error (lowest level)
    #[error("nom parser error: {0:?}")]
    NomError(ErrorKind),
}

impl From<QueryError> for io::Error {
    fn from(qe: QueryError) -> Self {
        // String version is the least fragile (no Send/Sync bounds issues)
        io::Error::new(io::ErrorKind::InvalidInput, qe.to_string())
    }
}

impl<'a> NomParseError<&'a str> for Box<QueryError> {
    fn from_error_kind(_input: &'a str, kind: ErrorKind) -> Self {
        Box::new(QueryError::NomError(kind))
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        // usually just return the existing error unchanged
        other
    }
}

impl QueryError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::NegativeBlanks { .. } => "Q001",
            QueryError::InvalidLetter { .. } => "Q002",
            QueryError::InvalidFrequencyOrder { .. } => "Q003",
            QueryError::CapacityExceeded { .. } => "Q004",
            QueryError::ContradictoryBounds { .. } => "Q005",
            QueryError::NomError(_) => "Q006",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            QueryError::NegativeBlanks { .. } => Some("The blank count must be zero or positive (e.g., blanks=2)"),
            QueryError::InvalidLetter { .. } => Some("Structured query fields may contain only letters A-Z (either case)"),
            QueryError::InvalidFrequencyOrder { .. } => Some("The order must contain each of the 26 uppercase letters exactly once"),
            QueryError::CapacityExceeded { .. } => Some("Shorten the query letters, or use the exact matcher which has no width limit"),
            QueryError::ContradictoryBounds { .. } => Some("The minimum length cannot exceed the maximum length"),
            QueryError::NomError(_) => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_and_help() {
        let err = QueryError::NegativeBlanks { blanks: -3 };
        assert_eq!(err.code(), "Q001");
        assert!(err.help().is_some());
        let detailed = err.display_detailed();
        assert!(detailed.contains("Q001"));
        assert!(detailed.contains("-3"));
    }

    #[test]
    fn test_contradictory_bounds_help() {
        let err = QueryError::ContradictoryBounds { min: 5, max: 3 };
        assert_eq!(err.code(), "Q005");
        let detailed = err.display_detailed();
        assert!(detailed.contains("minimum length cannot exceed"));
    }

    /// Test that all `QueryError` variants have unique error codes
    #[test]
    fn test_all_error_codes_are_unique() {
        let mut codes = std::collections::HashSet::new();

        // Sample one of each variant
        let errors: Vec<QueryError> = vec![
            QueryError::NegativeBlanks { blanks: -1 },
            QueryError::InvalidLetter { field: "required", invalid_char: '3' },
            QueryError::InvalidFrequencyOrder { order: "ABC".to_string() },
            QueryError::CapacityExceeded { letters: "EEEEEEEEEEEEEEEEEEEEEEEE".to_string() },
            QueryError::ContradictoryBounds { min: 5, max: 3 },
            QueryError::NomError(ErrorKind::OneOf),
        ];

        for err in errors {
            let code = err.code();
            assert!(code.starts_with('Q'), "Error code '{}' should start with 'Q'", code);
            assert!(codes.insert(code), "Duplicate error code found: {}", code);
        }

        assert_eq!(codes.len(), 6);
    }

    /// Test that error messages carry the actual offending values
    #[test]
    fn test_error_messages_are_actionable() {
        let err = QueryError::ContradictoryBounds { min: 5, max: 3 };
        let detailed = err.display_detailed();
        assert!(detailed.contains('5') && detailed.contains('3'));

        let err = QueryError::InvalidLetter { field: "optional", invalid_char: '?' };
        let msg = err.to_string();
        assert!(msg.contains("optional"));
        assert!(msg.contains('?'));
    }

    #[test]
    fn test_io_error_bridge() {
        let err = QueryError::NegativeBlanks { blanks: -7 };
        let io_err: std::io::Error = err.into();
        assert_eq!(io_err.kind(), std::io::ErrorKind::InvalidInput);
        assert!(io_err.to_string().contains("-7"));
    }
}
