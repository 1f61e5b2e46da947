//! Sled storage backend
//!
//! Quad rows go to the `quads` tree keyed by statement id, metadata entries
//! to the `meta` tree. Both trees live in one database, so a store reopened
//! from the same path gets its rows and its metadata back together.

use super::{decode_row, encode_row, StorageBackend};
use crate::{Error, Result, Statement, StatementId};
use std::path::Path;

/// Persistent backend on top of a sled database.
pub struct SledBackend {
    db: sled::Db,
    quads: sled::Tree,
    meta: sled::Tree,
}

fn sled_error(op: &'static str) -> impl FnOnce(sled::Error) -> Error {
    move |e| Error::Storage(format!("sled {}: {}", op, e))
}

impl SledBackend {
    /// Opens the database at `path`, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_db(sled::open(path).map_err(sled_error("open"))?)
    }

    /// Opens a database that is deleted when dropped.
    pub fn temp() -> Result<Self> {
        let db = sled::Config::new()
            .temporary(true)
            .open()
            .map_err(sled_error("open"))?;
        Self::from_db(db)
    }

    fn from_db(db: sled::Db) -> Result<Self> {
        let quads = db.open_tree("quads").map_err(sled_error("open tree"))?;
        let meta = db.open_tree("meta").map_err(sled_error("open tree"))?;
        Ok(Self { db, quads, meta })
    }
}

impl StorageBackend for SledBackend {
    fn put(&self, id: &StatementId, statement: &Statement) -> Result<()> {
        let row = encode_row(id, statement)?;
        self.quads
            .insert(id.as_bytes(), row)
            .map_err(sled_error("insert"))?;
        Ok(())
    }

    fn get(&self, id: &StatementId) -> Result<Option<Statement>> {
        self.quads
            .get(id.as_bytes())
            .map_err(sled_error("get"))?
            .map(|row| decode_row(id.as_bytes(), &row))
            .transpose()
    }

    fn delete(&self, id: &StatementId) -> Result<bool> {
        let removed = self
            .quads
            .remove(id.as_bytes())
            .map_err(sled_error("remove"))?;
        Ok(removed.is_some())
    }

    fn exists(&self, id: &StatementId) -> Result<bool> {
        self.quads
            .contains_key(id.as_bytes())
            .map_err(sled_error("get"))
    }

    fn iter_all(&self) -> Result<Vec<Statement>> {
        self.quads
            .iter()
            .map(|entry| {
                let (key, row) = entry.map_err(sled_error("scan"))?;
                decode_row(&key, &row)
            })
            .collect()
    }

    fn count(&self) -> usize {
        self.quads.len()
    }

    fn size_bytes(&self) -> usize {
        self.db.size_on_disk().unwrap_or(0) as usize
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let value = self.meta.get(key).map_err(sled_error("get"))?;
        Ok(value.map(|v| v.to_vec()))
    }

    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.meta.insert(key, value).map_err(sled_error("insert"))?;
        Ok(())
    }

    fn delete_meta(&self, key: &[u8]) -> Result<()> {
        self.meta.remove(key).map_err(sled_error("remove"))?;
        Ok(())
    }

    fn scan_meta(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        self.meta
            .scan_prefix(prefix)
            .map(|entry| {
                let (key, value) = entry.map_err(sled_error("scan"))?;
                Ok((key.to_vec(), value.to_vec()))
            })
            .collect()
    }

    fn flush(&self) -> Result<()> {
        self.db.flush().map_err(sled_error("flush"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Node;

    fn graph_statement() -> Statement {
        Statement::with_context(
            Node::resource("urn:test:subject"),
            Node::resource("urn:test:predicate"),
            Node::literal("test value"),
            Node::resource("urn:test:graph"),
        )
    }

    #[test]
    fn test_rows_and_meta() {
        let backend = SledBackend::temp().unwrap();
        let statement = graph_statement();
        let id = statement.id();

        backend.put(&id, &statement).unwrap();
        assert!(backend.exists(&id).unwrap());
        assert_eq!(backend.get(&id).unwrap(), Some(statement));

        backend.put_meta(b"k/1", b"one").unwrap();
        backend.put_meta(b"k/2", b"two").unwrap();
        backend.put_meta(b"j/1", b"other").unwrap();
        assert_eq!(backend.scan_meta(b"k/").unwrap().len(), 2);

        assert!(backend.delete(&id).unwrap());
        assert_eq!(backend.count(), 0);
    }

    #[test]
    fn test_corrupt_row_is_a_serialization_error() {
        let backend = SledBackend::temp().unwrap();
        let id = graph_statement().id();
        backend.quads.insert(id.as_bytes(), &[1u8, 2, 3][..]).unwrap();

        assert!(matches!(backend.get(&id), Err(Error::Serialization(_))));
        assert!(matches!(backend.iter_all(), Err(Error::Serialization(_))));
    }

    #[test]
    fn test_reopen_keeps_rows_and_meta() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quads.db");
        let statement = graph_statement();
        let id = statement.id();

        {
            let backend = SledBackend::open(&path).unwrap();
            backend.put(&id, &statement).unwrap();
            backend.put_meta(b"k/1", b"one").unwrap();
            backend.flush().unwrap();
        }

        let backend = SledBackend::open(&path).unwrap();
        assert_eq!(backend.get(&id).unwrap(), Some(statement));
        assert_eq!(backend.get_meta(b"k/1").unwrap(), Some(b"one".to_vec()));
    }
}
