//! Statement indexes for efficient pattern lookups
//!
//! Implements SPO, POS, and OSP indexes:
//! - SPO: Find all statements for a subject, or subject+predicate
//! - POS: Find all statements for a predicate, or predicate+object
//! - OSP: Find all statements pointing to an object, or object+subject
//!
//! Indexes are graph-agnostic; the context slot is filtered by the store.

use crate::{Node, Statement, StatementId};
use std::collections::{BTreeMap, HashSet};

/// Types of indexes available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexType {
    /// Subject-Predicate-Object index
    SPO,
    /// Predicate-Object-Subject index
    POS,
    /// Object-Subject-Predicate index
    OSP,
}

type Level = BTreeMap<Node, BTreeMap<Node, HashSet<StatementId>>>;

/// A statement index for efficient lookups
#[derive(Debug, Default)]
pub struct StatementIndex {
    /// subject -> predicate -> ids
    spo: Level,
    /// predicate -> object -> ids
    pos: Level,
    /// object -> subject -> ids
    osp: Level,
}

fn insert_into(level: &mut Level, first: &Node, second: &Node, id: StatementId) {
    level
        .entry(first.clone())
        .or_default()
        .entry(second.clone())
        .or_default()
        .insert(id);
}

fn remove_from(level: &mut Level, first: &Node, second: &Node, id: &StatementId) {
    if let Some(inner) = level.get_mut(first) {
        if let Some(ids) = inner.get_mut(second) {
            ids.remove(id);
            if ids.is_empty() {
                inner.remove(second);
            }
        }
        if inner.is_empty() {
            level.remove(first);
        }
    }
}

fn collect_first(level: &Level, first: &Node) -> Vec<StatementId> {
    level
        .get(first)
        .map(|inner| inner.values().flat_map(|ids| ids.iter().copied()).collect())
        .unwrap_or_default()
}

fn collect_pair(level: &Level, first: &Node, second: &Node) -> Vec<StatementId> {
    level
        .get(first)
        .and_then(|inner| inner.get(second))
        .map(|ids| ids.iter().copied().collect())
        .unwrap_or_default()
}

impl StatementIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a statement into all indexes
    pub fn insert(&mut self, statement: &Statement, id: StatementId) {
        let (s, p, o) = (&statement.subject, &statement.predicate, &statement.object);
        insert_into(&mut self.spo, s, p, id);
        insert_into(&mut self.pos, p, o, id);
        insert_into(&mut self.osp, o, s, id);
    }

    /// Remove a statement from all indexes
    pub fn remove(&mut self, statement: &Statement, id: &StatementId) {
        let (s, p, o) = (&statement.subject, &statement.predicate, &statement.object);
        remove_from(&mut self.spo, s, p, id);
        remove_from(&mut self.pos, p, o, id);
        remove_from(&mut self.osp, o, s, id);
    }

    /// Picks the index that best serves `pattern`.
    ///
    /// Returns `None` when no slot is bound and a full scan is needed.
    pub fn best_index(pattern: &Statement) -> Option<IndexType> {
        let bound = (
            !pattern.subject.is_empty(),
            !pattern.predicate.is_empty(),
            !pattern.object.is_empty(),
        );
        match bound {
            (true, true, _) | (true, false, false) => Some(IndexType::SPO),
            (false, true, _) => Some(IndexType::POS),
            (_, false, true) => Some(IndexType::OSP),
            (false, false, false) => None,
        }
    }

    /// Returns candidate ids for `pattern`, or `None` if every statement is a candidate.
    ///
    /// Candidates may still differ from the pattern in the slots the chosen
    /// index does not cover; callers filter with [`Statement::matches`].
    pub fn candidates(&self, pattern: &Statement) -> Option<Vec<StatementId>> {
        let (s, p, o) = (&pattern.subject, &pattern.predicate, &pattern.object);
        let ids = match Self::best_index(pattern)? {
            IndexType::SPO if !p.is_empty() => collect_pair(&self.spo, s, p),
            IndexType::SPO => collect_first(&self.spo, s),
            IndexType::POS if !o.is_empty() => collect_pair(&self.pos, p, o),
            IndexType::POS => collect_first(&self.pos, p),
            IndexType::OSP if !s.is_empty() => collect_pair(&self.osp, o, s),
            IndexType::OSP => collect_first(&self.osp, o),
        };
        Some(ids)
    }

    /// Get count of unique subjects
    pub fn subject_count(&self) -> usize {
        self.spo.len()
    }

    /// Get count of unique predicates
    pub fn predicate_count(&self) -> usize {
        self.pos.len()
    }

    /// Get count of unique objects
    pub fn object_count(&self) -> usize {
        self.osp.len()
    }

    /// Clear all indexes
    pub fn clear(&mut self) {
        self.spo.clear();
        self.pos.clear();
        self.osp.clear();
    }
}
