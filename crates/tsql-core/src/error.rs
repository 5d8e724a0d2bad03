//! Error types for tsqlscript
//!
//! A parse either produces a whole script or fails with exactly one
//! [`ParseError`]; everything else (I/O, JSON projection, bad options) is
//! folded into [`Error`].

use crate::position::LineIndex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single parse failure: a message and the byte offset of the offending token.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message} at offset {offset}")]
pub struct ParseError {
    pub message: String,
    pub offset: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }

    /// Render the error with a `line:column` position resolved against the source.
    pub fn with_position(&self, index: &LineIndex) -> String {
        let (line, column) = index.line_column(self.offset);
        format!("{}:{}: {}", line, column, self.message)
    }
}

/// The main error type for tsqlscript operations
#[derive(Error, Debug)]
pub enum Error {
    // ========== Parse Errors ==========
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    // ========== IO Errors ==========
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ========== Serialization Errors ==========
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ========== Configuration Errors ==========
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for tsqlscript operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl Error {
    /// Returns true if this error came out of the parser
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse(_))
    }

    /// Byte offset of the failure, when the error carries one
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Parse(err) => Some(err.offset),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new("Expected ')'", 17);
        assert_eq!(err.to_string(), "Expected ')' at offset 17");
    }

    #[test]
    fn test_error_wraps_parse_error() {
        let err: Error = ParseError::new("Unknown statement", 3).into();
        assert!(err.is_parse_error());
        assert_eq!(err.offset(), Some(3));
        assert_eq!(err.to_string(), "Parse error: Unknown statement at offset 3");
    }

    #[test]
    fn test_with_position() {
        let source = "SELECT 1;\nSELECT ?";
        let index = LineIndex::new(source);
        let err = ParseError::new("Unexpected character '?'", 17);
        assert_eq!(err.with_position(&index), "2:8: Unexpected character '?'");
    }

    #[test]
    fn test_io_error_is_not_parse_error() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(!err.is_parse_error());
        assert_eq!(err.offset(), None);
    }
}
