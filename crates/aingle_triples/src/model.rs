//! The statement-model interface consumed by layers built on top of a store.

use crate::{BindingSet, Result, Statement};

/// Iterator over the statements returned by [`Model::list_statements`].
pub type StatementIter = std::vec::IntoIter<Statement>;

/// Iterator over the solutions returned by [`Model::execute_query`].
pub type QueryResultIter = std::vec::IntoIter<BindingSet>;

/// A queryable collection of statements.
///
/// In every pattern argument an `Empty` slot matches any value, including the
/// context slot (so `Empty` context means "all graphs").
pub trait Model {
    /// Adds a statement. Adding a statement that is already present is a no-op.
    fn add_statement(&self, statement: &Statement) -> Result<()>;

    /// Removes every statement matching `pattern`.
    fn remove_all_statements(&self, pattern: &Statement) -> Result<()>;

    /// Returns `true` if at least one statement matches `pattern`.
    fn contains_any_statement(&self, pattern: &Statement) -> Result<bool>;

    /// Lists every statement matching `pattern`.
    ///
    /// Each call takes a fresh snapshot; the iterator owns its data.
    fn list_statements(&self, pattern: &Statement) -> Result<StatementIter>;

    /// Executes a SELECT query and returns its solutions.
    fn execute_query(&self, query: &str) -> Result<QueryResultIter>;

    /// Returns `true` if the exact, fully specified statement is present.
    fn contains_statement(&self, statement: &Statement) -> Result<bool> {
        if !statement.is_valid() {
            return Ok(false);
        }
        self.contains_any_statement(statement)
    }

    /// Counts every statement in the model.
    fn statement_count(&self) -> Result<usize> {
        Ok(self.list_statements(&Statement::default())?.count())
    }

    /// Whether entries written with [`Model::put_metadata`] are kept.
    ///
    /// The metadata space holds opaque state of layers built on the model and
    /// is invisible to statement lookups and queries. Models without one keep
    /// the defaults below, which store nothing.
    fn supports_metadata(&self) -> bool {
        false
    }

    /// Reads a metadata entry.
    fn metadata(&self, _key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    /// Writes a metadata entry, replacing any previous value.
    fn put_metadata(&self, _key: &[u8], _value: &[u8]) -> Result<()> {
        Ok(())
    }

    /// Deletes a metadata entry.
    fn remove_metadata(&self, _key: &[u8]) -> Result<()> {
        Ok(())
    }

    /// Returns every metadata entry whose key starts with `prefix`, in key order.
    fn scan_metadata(&self, _prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        Ok(Vec::new())
    }
}
