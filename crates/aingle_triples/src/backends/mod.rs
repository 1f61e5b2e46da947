//! Storage backends for the statement store
//!
//! A backend keeps two keyspaces:
//! - quad rows, keyed by the `StatementId` of the statement they hold
//! - a metadata space of opaque byte entries, where layers built on the
//!   store keep their own state next to the data it describes
//!
//! Two backends are supported:
//! - Memory: hash map rows, gone when the store is dropped
//! - Sled: one tree per keyspace, persistent (default feature)

pub mod memory;

#[cfg(feature = "sled-backend")]
pub mod sled;

use crate::{Error, Node, Result, Statement, StatementId};
use serde::{Deserialize, Serialize};

/// Trait for storage backends
pub trait StorageBackend: Send + Sync {
    /// Stores the row for `statement` under `id`.
    fn put(&self, id: &StatementId, statement: &Statement) -> Result<()>;

    /// Loads the statement stored under `id`.
    fn get(&self, id: &StatementId) -> Result<Option<Statement>>;

    /// Deletes the row under `id`. Returns `false` if there was none.
    fn delete(&self, id: &StatementId) -> Result<bool>;

    /// Checks for a row without decoding it.
    fn exists(&self, id: &StatementId) -> Result<bool>;

    /// Decodes every stored row.
    fn iter_all(&self) -> Result<Vec<Statement>>;

    /// Number of stored rows.
    fn count(&self) -> usize;

    /// Approximate storage size in bytes.
    fn size_bytes(&self) -> usize;

    /// Reads one metadata entry.
    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Writes one metadata entry, replacing any previous value.
    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Deletes one metadata entry.
    fn delete_meta(&self, key: &[u8]) -> Result<()>;

    /// Returns every metadata entry whose key starts with `prefix`, in key order.
    fn scan_meta(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>>;

    /// Flush pending writes to disk
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// On-disk form of a quad. The id travels with the row so a decoded row can
/// be checked against the key it was found under.
#[derive(Serialize, Deserialize)]
struct Row {
    id: StatementId,
    context: Node,
    subject: Node,
    predicate: Node,
    object: Node,
}

/// Encodes the row stored for `statement`.
pub(crate) fn encode_row(id: &StatementId, statement: &Statement) -> Result<Vec<u8>> {
    let row = Row {
        id: *id,
        context: statement.context.clone(),
        subject: statement.subject.clone(),
        predicate: statement.predicate.clone(),
        object: statement.object.clone(),
    };
    bincode::serde::encode_to_vec(&row, bincode::config::standard())
        .map_err(|e| Error::Serialization(format!("row {}: {}", id, e)))
}

/// Decodes a row read under `key`.
///
/// Fails with `Error::Serialization` when the bytes are not a row, or when
/// the row does not hold the statement its key names.
pub(crate) fn decode_row(key: &[u8], bytes: &[u8]) -> Result<Statement> {
    let (row, _): (Row, usize) =
        bincode::serde::decode_from_slice(bytes, bincode::config::standard()).map_err(|e| {
            Error::Serialization(format!("row {}: {}", display_key(key), e))
        })?;

    let statement = Statement::with_context(row.subject, row.predicate, row.object, row.context);
    if row.id.as_bytes().as_slice() != key || statement.id() != row.id {
        return Err(Error::Serialization(format!(
            "row {} holds {} ({})",
            display_key(key),
            statement,
            statement.id()
        )));
    }
    Ok(statement)
}

fn display_key(key: &[u8]) -> String {
    match <[u8; 32]>::try_from(key) {
        Ok(bytes) => StatementId::from(bytes).to_string(),
        Err(_) => format!("<{} byte key>", key.len()),
    }
}

// Re-exports
pub use memory::MemoryBackend;

#[cfg(feature = "sled-backend")]
pub use self::sled::SledBackend;
