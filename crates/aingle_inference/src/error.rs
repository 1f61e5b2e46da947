//! Error types for the AIngle inference engine.

use std::path::PathBuf;
use thiserror::Error;

/// A specialized `Result` type for inference operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Defines the errors that can occur while parsing rules and maintaining inferred statements.
#[derive(Error, Debug)]
pub enum Error {
    /// A statement passed to an operation that needs a storable statement was malformed.
    #[error("Invalid statement: {0}")]
    InvalidStatement(String),

    /// A rule failed validation and was not added.
    #[error("Invalid rule definition: {0}")]
    InvalidRule(String),

    /// A rule file or rule line does not follow the rule grammar.
    #[error("Rule parse error at line {line}, column {column}: {message} in `{content}`")]
    RuleParse {
        line: usize,
        column: usize,
        content: String,
        message: String,
    },

    /// A rule file could not be read.
    #[error("Failed to read rule file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A provenance record in the store's metadata space could not be encoded or decoded.
    #[error("Corrupt provenance record: {0}")]
    Provenance(String),

    /// An error reported by the underlying statement store.
    #[error("Store error: {0}")]
    Store(#[from] aingle_triples::Error),
}
