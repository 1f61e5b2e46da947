//! Query solutions.

use crate::Node;
use indexmap::IndexMap;
use std::fmt;

/// One solution of a query: an assignment of nodes to variable names.
///
/// Variables keep the order in which they were bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingSet {
    values: IndexMap<String, Node>,
}

impl BindingSet {
    /// Creates an empty binding set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `node`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, node: Node) {
        self.values.insert(name.into(), node);
    }

    /// Returns the value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.values.get(name)
    }

    /// Returns `true` if `name` has a value.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the bound variable names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterates over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copies every binding of `other` that is not bound here.
    pub fn merge(&mut self, other: &BindingSet) {
        for (name, node) in other.iter() {
            if !self.contains(name) {
                self.insert(name, node.clone());
            }
        }
    }
}

impl FromIterator<(String, Node)> for BindingSet {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for BindingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, node)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "?{} = {}", name, node)?;
        }
        write!(f, "}}")
    }
}
