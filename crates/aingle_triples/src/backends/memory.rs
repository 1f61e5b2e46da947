//! In-memory storage backend
//!
//! Rows live in a hash map keyed by statement id; metadata lives in an
//! ordered map so prefix scans come back sorted, as they do from sled.

use super::{decode_row, encode_row, StorageBackend};
use crate::{Error, Result, Statement, StatementId};
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

/// Ephemeral backend used by `TripleStore::memory` and in tests.
#[derive(Default)]
pub struct MemoryBackend {
    quads: RwLock<HashMap<StatementId, Vec<u8>>>,
    meta: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

fn poisoned<T>(_: T) -> Error {
    Error::Storage("memory backend lock poisoned".into())
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend with room for `capacity` rows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            quads: RwLock::new(HashMap::with_capacity(capacity)),
            meta: RwLock::default(),
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn put(&self, id: &StatementId, statement: &Statement) -> Result<()> {
        let row = encode_row(id, statement)?;
        self.quads.write().map_err(poisoned)?.insert(*id, row);
        Ok(())
    }

    fn get(&self, id: &StatementId) -> Result<Option<Statement>> {
        let quads = self.quads.read().map_err(poisoned)?;
        quads
            .get(id)
            .map(|row| decode_row(id.as_bytes(), row))
            .transpose()
    }

    fn delete(&self, id: &StatementId) -> Result<bool> {
        Ok(self.quads.write().map_err(poisoned)?.remove(id).is_some())
    }

    fn exists(&self, id: &StatementId) -> Result<bool> {
        Ok(self.quads.read().map_err(poisoned)?.contains_key(id))
    }

    fn iter_all(&self) -> Result<Vec<Statement>> {
        let quads = self.quads.read().map_err(poisoned)?;
        quads
            .iter()
            .map(|(id, row)| decode_row(id.as_bytes(), row))
            .collect()
    }

    fn count(&self) -> usize {
        self.quads.read().map(|q| q.len()).unwrap_or(0)
    }

    fn size_bytes(&self) -> usize {
        let rows = self
            .quads
            .read()
            .map(|q| q.values().map(Vec::len).sum::<usize>())
            .unwrap_or(0);
        let meta = self
            .meta
            .read()
            .map(|m| m.iter().map(|(k, v)| k.len() + v.len()).sum::<usize>())
            .unwrap_or(0);
        rows + meta
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.meta.read().map_err(poisoned)?.get(key).cloned())
    }

    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.meta
            .write()
            .map_err(poisoned)?
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete_meta(&self, key: &[u8]) -> Result<()> {
        self.meta.write().map_err(poisoned)?.remove(key);
        Ok(())
    }

    fn scan_meta(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let meta = self.meta.read().map_err(poisoned)?;
        Ok(meta
            .range(prefix.to_vec()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Node;

    fn labelled(name: &str) -> Statement {
        Statement::new(
            Node::resource(format!("urn:{}", name)),
            Node::resource("urn:label"),
            Node::literal(name),
        )
    }

    #[test]
    fn test_rows() {
        let backend = MemoryBackend::with_capacity(4);
        let statement = labelled("a");
        let id = statement.id();

        backend.put(&id, &statement).unwrap();
        assert!(backend.exists(&id).unwrap());
        assert_eq!(backend.get(&id).unwrap(), Some(statement));
        assert_eq!(backend.count(), 1);
        assert!(backend.size_bytes() > 0);

        assert!(backend.delete(&id).unwrap());
        assert!(!backend.delete(&id).unwrap());
        assert!(backend.get(&id).unwrap().is_none());
        assert!(backend.iter_all().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_row_is_a_serialization_error() {
        let backend = MemoryBackend::new();
        let statement = labelled("a");
        let id = statement.id();
        backend.quads.write().unwrap().insert(id, vec![7, 7, 7]);

        assert!(matches!(backend.get(&id), Err(Error::Serialization(_))));
        assert!(matches!(backend.iter_all(), Err(Error::Serialization(_))));
        // existence does not decode
        assert!(backend.exists(&id).unwrap());
    }

    #[test]
    fn test_meta_prefix_scan() {
        let backend = MemoryBackend::new();
        backend.put_meta(b"inference/b", b"2").unwrap();
        backend.put_meta(b"inference/a", b"1").unwrap();
        backend.put_meta(b"other/a", b"x").unwrap();

        let scanned = backend.scan_meta(b"inference/").unwrap();
        assert_eq!(
            scanned,
            vec![
                (b"inference/a".to_vec(), b"1".to_vec()),
                (b"inference/b".to_vec(), b"2".to_vec()),
            ]
        );

        backend.delete_meta(b"inference/a").unwrap();
        assert_eq!(backend.get_meta(b"inference/a").unwrap(), None);
        assert_eq!(backend.get_meta(b"other/a").unwrap(), Some(b"x".to_vec()));
    }
}
