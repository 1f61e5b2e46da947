//! The core statement storage engine.
//!
//! `TripleStore` orchestrates operations between the storage backend and the in-memory statement indexes.

use crate::backends::{MemoryBackend, StorageBackend};
use crate::index::StatementIndex;
use crate::model::{Model, QueryResultIter, StatementIter};
use crate::query::{PatternSource, SelectQuery};
use crate::{Error, Result, Statement, StatementId};
use log::trace;
use std::sync::{Arc, RwLock};

/// The main storage engine for RDF statements.
///
/// `TripleStore` keeps statements in a pluggable backend and maintains
/// SPO/POS/OSP indexes over them for pattern lookups. All methods take
/// `&self`; the index is guarded by an `RwLock` and backends are `Send + Sync`.
///
/// # Examples
///
/// ```
/// use aingle_triples::{Model, Node, Statement, TripleStore};
///
/// # fn main() -> Result<(), aingle_triples::Error> {
/// let store = TripleStore::memory()?;
/// let st = Statement::new(
///     Node::resource("urn:alice"),
///     Node::resource("urn:knows"),
///     Node::resource("urn:bob"),
/// );
/// store.add_statement(&st)?;
///
/// let knows = Statement::new(Node::Empty, Node::resource("urn:knows"), Node::Empty);
/// assert!(store.contains_any_statement(&knows)?);
///
/// let results: Vec<_> = store
///     .execute_query("SELECT * WHERE { ?who <urn:knows> <urn:bob> }")?
///     .collect();
/// assert_eq!(results[0].get("who"), Some(&Node::resource("urn:alice")));
/// # Ok(())
/// # }
/// ```
pub struct TripleStore {
    /// The pluggable storage backend (Sled or Memory).
    backend: Box<dyn StorageBackend>,
    /// The in-memory indexes (SPO, POS, OSP) for fast pattern matching.
    index: Arc<RwLock<StatementIndex>>,
}

impl TripleStore {
    /// Creates a new `TripleStore` with the given storage backend.
    ///
    /// This will also build the initial in-memory indexes from the data
    /// already present in the backend.
    pub fn new(backend: Box<dyn StorageBackend>) -> Result<Self> {
        let store = Self {
            backend,
            index: Arc::new(RwLock::new(StatementIndex::new())),
        };
        store.rebuild_indexes()?;
        Ok(store)
    }

    /// Creates an empty in-memory store.
    pub fn memory() -> Result<Self> {
        Self::new(Box::new(MemoryBackend::new()))
    }

    /// Opens (or creates) a persistent store backed by Sled at `path`.
    #[cfg(feature = "sled-backend")]
    pub fn sled(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Self::new(Box::new(crate::backends::SledBackend::open(path)?))
    }

    /// Opens (or creates) a persistent store backed by Sled at `path`.
    #[cfg(not(feature = "sled-backend"))]
    pub fn sled(_path: impl AsRef<std::path::Path>) -> Result<Self> {
        Err(Error::BackendUnavailable(
            "sled backend requires the `sled-backend` feature".into(),
        ))
    }

    /// Rebuilds the in-memory indexes from the storage backend.
    fn rebuild_indexes(&self) -> Result<()> {
        let mut index = self
            .index
            .write()
            .map_err(|_| Error::Index("lock poisoned".into()))?;
        index.clear();

        for statement in self.backend.iter_all()? {
            let id = statement.id();
            index.insert(&statement, id);
        }

        Ok(())
    }

    /// Inserts a single statement.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the statement was added, `Ok(false)` if it was already present.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidStatement` if the statement cannot be stored.
    pub fn insert(&self, statement: &Statement) -> Result<bool> {
        if !statement.is_valid() {
            return Err(Error::InvalidStatement(statement.to_string()));
        }

        let id = statement.id();
        if self.backend.exists(&id)? {
            return Ok(false);
        }

        self.backend.put(&id, statement)?;

        let mut index = self
            .index
            .write()
            .map_err(|_| Error::Index("lock poisoned".into()))?;
        index.insert(statement, id);
        trace!("stored {}", statement);

        Ok(true)
    }

    /// Inserts a batch of statements, skipping those already present.
    ///
    /// Returns the number of statements actually added.
    pub fn insert_batch(&self, statements: Vec<Statement>) -> Result<usize> {
        let mut index = self
            .index
            .write()
            .map_err(|_| Error::Index("lock poisoned".into()))?;
        let mut added = 0;

        for statement in statements {
            if !statement.is_valid() {
                return Err(Error::InvalidStatement(statement.to_string()));
            }

            let id = statement.id();
            if self.backend.exists(&id)? {
                continue;
            }

            self.backend.put(&id, &statement)?;
            index.insert(&statement, id);
            added += 1;
        }

        Ok(added)
    }

    /// Retrieves a statement by its `StatementId`.
    pub fn get(&self, id: &StatementId) -> Result<Option<Statement>> {
        self.backend.get(id)
    }

    /// Deletes a statement by its `StatementId`.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the statement was found and deleted, `Ok(false)` otherwise.
    pub fn delete(&self, id: &StatementId) -> Result<bool> {
        if let Some(statement) = self.backend.get(id)? {
            self.backend.delete(id)?;

            let mut index = self
                .index
                .write()
                .map_err(|_| Error::Index("lock poisoned".into()))?;
            index.remove(&statement, id);
            trace!("deleted {}", statement);

            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Finds all statements that match `pattern`.
    ///
    /// The store uses the most selective index for the bound slots and
    /// filters the remaining slots (including the context) afterwards.
    pub fn find(&self, pattern: &Statement) -> Result<Vec<Statement>> {
        let candidates = {
            let index = self
                .index
                .read()
                .map_err(|_| Error::Index("lock poisoned".into()))?;
            index.candidates(pattern)
        };

        let Some(ids) = candidates else {
            let mut all = self.backend.iter_all()?;
            all.retain(|s| s.matches(pattern));
            return Ok(all);
        };

        let mut statements = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(statement) = self.backend.get(&id)? {
                if statement.matches(pattern) {
                    statements.push(statement);
                }
            }
        }

        Ok(statements)
    }

    /// Returns `true` if this exact statement (including its context) is stored.
    pub fn contains(&self, statement: &Statement) -> Result<bool> {
        self.backend.exists(&statement.id())
    }

    /// Returns the total number of statements in the store.
    pub fn count(&self) -> usize {
        self.backend.count()
    }

    /// Flushes pending writes of the backend.
    pub fn flush(&self) -> Result<()> {
        self.backend.flush()
    }

    /// Returns statistics about the store.
    pub fn stats(&self) -> StoreStats {
        let index = self.index.read().ok();

        StoreStats {
            statement_count: self.count(),
            subject_count: index.as_ref().map(|i| i.subject_count()).unwrap_or(0),
            predicate_count: index.as_ref().map(|i| i.predicate_count()).unwrap_or(0),
            object_count: index.as_ref().map(|i| i.object_count()).unwrap_or(0),
            storage_bytes: self.backend.size_bytes(),
        }
    }
}

impl PatternSource for TripleStore {
    fn find(&self, pattern: &Statement) -> Result<Vec<Statement>> {
        TripleStore::find(self, pattern)
    }
}

impl Model for TripleStore {
    fn add_statement(&self, statement: &Statement) -> Result<()> {
        self.insert(statement).map(|_| ())
    }

    fn remove_all_statements(&self, pattern: &Statement) -> Result<()> {
        for statement in self.find(pattern)? {
            self.delete(&statement.id())?;
        }
        Ok(())
    }

    fn contains_any_statement(&self, pattern: &Statement) -> Result<bool> {
        if pattern.is_valid() && !pattern.context.is_empty() {
            return self.contains(pattern);
        }
        Ok(!self.find(pattern)?.is_empty())
    }

    fn list_statements(&self, pattern: &Statement) -> Result<StatementIter> {
        Ok(self.find(pattern)?.into_iter())
    }

    fn execute_query(&self, query: &str) -> Result<QueryResultIter> {
        let parsed = SelectQuery::parse(query)?;
        Ok(parsed.evaluate(self)?.into_iter())
    }

    fn supports_metadata(&self) -> bool {
        true
    }

    fn metadata(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.backend.get_meta(key)
    }

    fn put_metadata(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.backend.put_meta(key, value)
    }

    fn remove_metadata(&self, key: &[u8]) -> Result<()> {
        self.backend.delete_meta(key)
    }

    fn scan_metadata(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        self.backend.scan_meta(prefix)
    }
}

/// Provides statistics about the contents and size of the store.
#[derive(Debug, Clone, Default)]
pub struct StoreStats {
    /// The total number of statements.
    pub statement_count: usize,
    /// The number of unique subjects.
    pub subject_count: usize,
    /// The number of unique predicates.
    pub predicate_count: usize,
    /// The number of unique objects.
    pub object_count: usize,
    /// The approximate size of the stored data in bytes.
    pub storage_bytes: usize,
}
