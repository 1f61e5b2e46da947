//! Error types for AIngle Triples.
//!
//! This module provides a unified `Error` type for all store operations.

use std::fmt;

/// A specialized `Result` type for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Defines the errors that can occur during store operations.
#[derive(Debug)]
pub enum Error {
    /// A statement handed to an operation that requires a storable statement was malformed.
    InvalidStatement(String),

    /// An error originating from the underlying storage backend (e.g., Sled).
    Storage(String),

    /// An error occurred during data serialization or deserialization (bincode).
    Serialization(String),

    /// A query could not be parsed or evaluated.
    Query(String),

    /// An error related to the statement indexes.
    Index(String),

    /// An error from the underlying I/O system.
    Io(std::io::Error),

    /// A required storage backend feature is not enabled.
    BackendUnavailable(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStatement(msg) => write!(f, "invalid statement: {}", msg),
            Self::Storage(msg) => write!(f, "storage error: {}", msg),
            Self::Serialization(msg) => write!(f, "serialization error: {}", msg),
            Self::Query(msg) => write!(f, "query error: {}", msg),
            Self::Index(msg) => write!(f, "index error: {}", msg),
            Self::Io(err) => write!(f, "I/O error: {}", err),
            Self::BackendUnavailable(msg) => write!(f, "backend unavailable: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Query("unexpected token at 12".to_string());
        assert!(err.to_string().contains("query error"));
        assert!(err.to_string().contains("12"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
