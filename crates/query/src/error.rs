// ABOUTME: Error types for node set queries including the QueryError enum and ErrorKind codes.
// ABOUTME: Errors are values carried through a chain, so they are cheap to clone and compare.

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Result alias used by every extraction operation.
pub type Result<T> = std::result::Result<T, QueryError>;

/// Error codes representing the categories of query failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidScanFormat,
    EmptyText,
    NotFound,
    Ambiguous,
    NotTextNode,
    NoSuchAttribute,
    ParseFailure,
    UnsupportedTag,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::InvalidScanFormat => "invalid scan format",
            ErrorKind::EmptyText => "empty text",
            ErrorKind::NotFound => "not found",
            ErrorKind::Ambiguous => "ambiguous",
            ErrorKind::NotTextNode => "not a text node",
            ErrorKind::NoSuchAttribute => "no such attribute",
            ErrorKind::ParseFailure => "parse failure",
            ErrorKind::UnsupportedTag => "unsupported tag",
        };
        write!(f, "{}", s)
    }
}

/// Errors produced by node set queries and extractions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// The scan format has no `%d`/`%v` placeholder, or the text does not fit it.
    #[error("invalid scan format")]
    InvalidScanFormat,

    /// Text was empty where a value was expected.
    #[error("empty text")]
    EmptyText,

    /// Collapse found no nodes.
    #[error("node not found")]
    NotFound,

    /// Strict collapse found more than one node.
    #[error("ambiguous: {0} nodes matched, expected exactly one")]
    Ambiguous(usize),

    /// The selected node is not a text node.
    #[error("node is not a text node")]
    NotTextNode,

    /// The selected node has no attribute with this key.
    #[error("no such attribute: {0}")]
    NoSuchAttribute(String),

    #[error("invalid integer {text:?}: {source}")]
    ParseInt {
        text: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid number {text:?}: {source}")]
    ParseFloat {
        text: String,
        #[source]
        source: ParseFloatError,
    },

    /// Finite number text whose value does not fit in an f64.
    #[error("number out of range: {0:?}")]
    FloatOverflow(String),

    /// A tag name with no known tag token.
    #[error("unsupported tag: {0}")]
    UnsupportedTag(String),
}

impl QueryError {
    /// Creates a ParseInt error for `text`.
    pub fn parse_int(text: impl Into<String>, source: ParseIntError) -> Self {
        QueryError::ParseInt {
            text: text.into(),
            source,
        }
    }

    /// Creates a ParseFloat error for `text`.
    pub fn parse_float(text: impl Into<String>, source: ParseFloatError) -> Self {
        QueryError::ParseFloat {
            text: text.into(),
            source,
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::InvalidScanFormat => ErrorKind::InvalidScanFormat,
            QueryError::EmptyText => ErrorKind::EmptyText,
            QueryError::NotFound => ErrorKind::NotFound,
            QueryError::Ambiguous(_) => ErrorKind::Ambiguous,
            QueryError::NotTextNode => ErrorKind::NotTextNode,
            QueryError::NoSuchAttribute(_) => ErrorKind::NoSuchAttribute,
            QueryError::ParseInt { .. }
            | QueryError::ParseFloat { .. }
            | QueryError::FloatOverflow(_) => ErrorKind::ParseFailure,
            QueryError::UnsupportedTag(_) => ErrorKind::UnsupportedTag,
        }
    }

    /// Returns true if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Returns true if this is an Ambiguous error.
    pub fn is_ambiguous(&self) -> bool {
        self.kind() == ErrorKind::Ambiguous
    }

    /// Returns true if numeric coercion failed.
    pub fn is_parse_failure(&self) -> bool {
        self.kind() == ErrorKind::ParseFailure
    }

    /// Returns true if this is an InvalidScanFormat error.
    pub fn is_invalid_scan_format(&self) -> bool {
        self.kind() == ErrorKind::InvalidScanFormat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_errors_share_kind() {
        let int_err = "x".parse::<i64>().unwrap_err();
        let float_err = "x".parse::<f64>().unwrap_err();

        assert_eq!(
            QueryError::parse_int("x", int_err).kind(),
            ErrorKind::ParseFailure
        );
        assert_eq!(
            QueryError::parse_float("x", float_err).kind(),
            ErrorKind::ParseFailure
        );
        assert_eq!(
            QueryError::FloatOverflow("1e400".to_string()).kind(),
            ErrorKind::ParseFailure
        );
    }

    #[test]
    fn test_display_includes_context() {
        let err = QueryError::Ambiguous(3);
        assert_eq!(
            err.to_string(),
            "ambiguous: 3 nodes matched, expected exactly one"
        );

        let err = QueryError::parse_int("abc", "abc".parse::<i64>().unwrap_err());
        assert!(err.to_string().contains("\"abc\""));
        assert!(err.is_parse_failure());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::NotTextNode.to_string(), "not a text node");
        assert_eq!(ErrorKind::NotFound.to_string(), "not found");
    }
}
