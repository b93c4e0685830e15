//! Error handling for motionkit
//!
//! Every line handed to the interpreter resolves to exactly one [`StatusCode`].
//! The failing codes are backed by [`GcodeError`], which carries the detail
//! (column, offending statement, geometry) used for logging while the status
//! code carries the terse message reported back over the protocol.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// G-Code error type
///
/// Represents the ways a single line can fail to resolve. Errors are local to
/// the line; none of them is fatal to the interpreter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GcodeError {
    /// A letter was not followed by a parsable number
    #[error("Bad number format at column {column}")]
    BadNumberFormat {
        /// Byte offset where the number was expected.
        column: usize,
    },

    /// The next character of a statement was not an uppercase letter
    #[error("Expected command letter at column {column}, found {found:?}")]
    ExpectedCommandLetter {
        /// Byte offset of the offending character.
        column: usize,
        /// The character that was found instead.
        found: char,
    },

    /// A G, M or `$` statement the interpreter does not implement
    #[error("Unsupported statement: {statement}")]
    UnsupportedStatement {
        /// The statement as written, e.g. `G200` or `$9`.
        statement: String,
    },

    /// Arc geometry could not be resolved to real numbers
    #[error("Floating point error: {reason}")]
    FloatingPointError {
        /// What went wrong in the geometry.
        reason: String,
    },
}

impl GcodeError {
    /// Create an unsupported-statement error for `letter` + `value`
    pub fn unsupported(letter: char, value: f64) -> Self {
        GcodeError::UnsupportedStatement {
            statement: format!("{}{}", letter, value),
        }
    }

    /// The status code reported for this error
    pub fn status(&self) -> StatusCode {
        match self {
            GcodeError::BadNumberFormat { .. } => StatusCode::BadNumberFormat,
            GcodeError::ExpectedCommandLetter { .. } => StatusCode::ExpectedCommandLetter,
            GcodeError::UnsupportedStatement { .. } => StatusCode::UnsupportedStatement,
            GcodeError::FloatingPointError { .. } => StatusCode::FloatingPointError,
        }
    }
}

/// Result type using GcodeError
pub type Result<T> = std::result::Result<T, GcodeError>;

/// Outcome of executing one line
///
/// The numeric values match the firmware's wire codes. Code 4 is reserved for
/// motion-control errors raised downstream and is never produced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum StatusCode {
    /// Line resolved and dispatched
    Ok = 0,
    /// A letter was not followed by a valid number
    BadNumberFormat = 1,
    /// A statement did not start with a letter
    ExpectedCommandLetter = 2,
    /// Unknown G/M code or malformed `$` line
    UnsupportedStatement = 3,
    /// Arc geometry was not a real number
    FloatingPointError = 5,
}

impl StatusCode {
    /// Numeric wire code
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether the line succeeded
    pub fn is_ok(self) -> bool {
        self == StatusCode::Ok
    }

    /// Protocol response line, without line terminator
    pub fn message(self) -> &'static str {
        match self {
            StatusCode::Ok => "ok",
            StatusCode::BadNumberFormat => "error: Bad number format",
            StatusCode::ExpectedCommandLetter => "error: Expected command letter",
            StatusCode::UnsupportedStatement => "error: Unsupported statement",
            StatusCode::FloatingPointError => "error: Floating point error",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<&GcodeError> for StatusCode {
    fn from(err: &GcodeError) -> Self {
        err.status()
    }
}

impl<T> From<&Result<T>> for StatusCode {
    fn from(result: &Result<T>) -> Self {
        match result {
            Ok(_) => StatusCode::Ok,
            Err(e) => e.status(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_match_wire_values() {
        assert_eq!(StatusCode::Ok.code(), 0);
        assert_eq!(StatusCode::BadNumberFormat.code(), 1);
        assert_eq!(StatusCode::ExpectedCommandLetter.code(), 2);
        assert_eq!(StatusCode::UnsupportedStatement.code(), 3);
        assert_eq!(StatusCode::FloatingPointError.code(), 5);
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(StatusCode::Ok.to_string(), "ok");
        assert_eq!(
            StatusCode::UnsupportedStatement.to_string(),
            "error: Unsupported statement"
        );
        assert!(!StatusCode::FloatingPointError.is_ok());
    }

    #[test]
    fn test_error_display() {
        let err = GcodeError::unsupported('G', 200.0);
        assert_eq!(err.to_string(), "Unsupported statement: G200");

        let err = GcodeError::ExpectedCommandLetter {
            column: 3,
            found: '(',
        };
        assert_eq!(
            err.to_string(),
            "Expected command letter at column 3, found '('"
        );
    }

    #[test]
    fn test_error_to_status() {
        let result: Result<()> = Err(GcodeError::BadNumberFormat { column: 2 });
        assert_eq!(StatusCode::from(&result), StatusCode::BadNumberFormat);

        let result: Result<u8> = Ok(1);
        assert_eq!(StatusCode::from(&result), StatusCode::Ok);

        let err = GcodeError::FloatingPointError {
            reason: "radius too small".to_string(),
        };
        assert_eq!(StatusCode::from(&err), StatusCode::FloatingPointError);
    }
}
