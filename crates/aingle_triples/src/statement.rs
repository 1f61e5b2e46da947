//! Statements (quads) and their content-addressed identifiers.

use crate::Node;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A subject-predicate-object fact, optionally placed in a named graph.
///
/// `context == Node::Empty` means the default graph. When a statement is used
/// as a pattern every `Empty` slot matches any value.
///
/// # Examples
///
/// ```
/// use aingle_triples::{Node, Statement};
///
/// let st = Statement::new(
///     Node::resource("urn:alice"),
///     Node::resource("urn:knows"),
///     Node::resource("urn:bob"),
/// );
/// assert!(st.is_valid());
///
/// let pattern = Statement::new(Node::Empty, Node::resource("urn:knows"), Node::Empty);
/// assert!(st.matches(&pattern));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Statement {
    pub subject: Node,
    pub predicate: Node,
    pub object: Node,
    pub context: Node,
}

impl Statement {
    /// Creates a statement in the default graph.
    pub fn new(subject: Node, predicate: Node, object: Node) -> Self {
        Self {
            subject,
            predicate,
            object,
            context: Node::Empty,
        }
    }

    /// Creates a statement placed in the given graph.
    pub fn with_context(subject: Node, predicate: Node, object: Node, context: Node) -> Self {
        Self {
            subject,
            predicate,
            object,
            context,
        }
    }

    /// Returns `true` if the statement can be stored.
    ///
    /// The subject must be a resource or blank node, the predicate a resource,
    /// the object any non-empty node and the context empty or a resource.
    pub fn is_valid(&self) -> bool {
        (self.subject.is_resource() || self.subject.is_blank())
            && self.subject.is_valid()
            && self.predicate.is_resource()
            && self.object.is_valid()
            && (self.context.is_empty() || self.context.is_resource())
    }

    /// Returns `true` if this statement matches `pattern`, treating `Empty` slots as wildcards.
    pub fn matches(&self, pattern: &Statement) -> bool {
        fn slot(value: &Node, pattern: &Node) -> bool {
            pattern.is_empty() || value == pattern
        }

        slot(&self.subject, &pattern.subject)
            && slot(&self.predicate, &pattern.predicate)
            && slot(&self.object, &pattern.object)
            && slot(&self.context, &pattern.context)
    }

    /// Returns a copy of this statement in the default graph.
    pub fn without_context(&self) -> Statement {
        Statement::new(
            self.subject.clone(),
            self.predicate.clone(),
            self.object.clone(),
        )
    }

    /// Returns a copy of this statement placed in `context`.
    pub fn in_context(&self, context: Node) -> Statement {
        Statement {
            context,
            ..self.without_context()
        }
    }

    /// Returns the content-addressed identifier of this statement.
    pub fn id(&self) -> StatementId {
        StatementId::from_statement(self)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)?;
        if !self.context.is_empty() {
            write!(f, " {}", self.context)?;
        }
        Ok(())
    }
}

/// A 32-byte blake3 digest identifying a statement by its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StatementId([u8; 32]);

impl StatementId {
    /// Computes the identifier of a statement.
    pub fn from_statement(statement: &Statement) -> Self {
        let mut hasher = blake3::Hasher::new();
        for node in [
            &statement.subject,
            &statement.predicate,
            &statement.object,
            &statement.context,
        ] {
            let term = node.to_sparql();
            hasher.update(&(term.len() as u64).to_le_bytes());
            hasher.update(term.as_bytes());
        }
        Self(*hasher.finalize().as_bytes())
    }

    /// Returns the raw bytes of the identifier.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the identifier as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }
}

impl From<[u8; 32]> for StatementId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for StatementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}
