//! Node and statement patterns used in rule preconditions and effects.
//!
//! A pattern slot is either a bound node or a named variable. Patterns render
//! themselves as SELECT graph-pattern fragments, substituting any variable
//! that already has a value in a `BindingSet`.

use aingle_triples::{BindingSet, Node, Statement};
use std::fmt;

/// A single matchable slot: a constant node or a named variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodePattern {
    /// A constant node that must be matched exactly.
    Bound(Node),
    /// A variable matching any node.
    Variable(String),
}

impl NodePattern {
    /// Creates a variable slot.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Creates a bound slot.
    pub fn bound(node: Node) -> Self {
        Self::Bound(node)
    }

    /// Creates a slot bound to a resource.
    pub fn resource(uri: impl Into<String>) -> Self {
        Self::Bound(Node::resource(uri))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }

    /// Returns the variable name of a variable slot.
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Self::Variable(name) => Some(name),
            Self::Bound(_) => None,
        }
    }

    /// Returns the node of a bound slot.
    pub fn node(&self) -> Option<&Node> {
        match self {
            Self::Bound(node) => Some(node),
            Self::Variable(_) => None,
        }
    }

    /// A variable needs a name; a bound slot needs a non-empty node.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Variable(name) => !name.is_empty(),
            Self::Bound(node) => node.is_valid(),
        }
    }

    /// Returns `true` if `node` can occupy this slot.
    pub fn matches(&self, node: &Node) -> bool {
        match self {
            Self::Variable(_) => true,
            Self::Bound(bound) => bound == node,
        }
    }

    /// Returns the node this slot stands for under `bindings`, if known.
    pub fn resolve(&self, bindings: &BindingSet) -> Option<Node> {
        match self {
            Self::Bound(node) => Some(node.clone()),
            Self::Variable(name) => bindings.get(name).cloned(),
        }
    }

    /// Renders this slot as a graph-pattern term.
    ///
    /// Variables with a value in `bindings` render as that value; unbound
    /// variables render as `?name`.
    pub fn to_graph_fragment(&self, bindings: &BindingSet) -> String {
        match self.resolve(bindings) {
            Some(node) => node.to_sparql(),
            None => format!("?{}", self.variable_name().unwrap_or_default()),
        }
    }
}

impl fmt::Display for NodePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(name) => write!(f, "?{}", name),
            Self::Bound(node) => write!(f, "{}", node.to_sparql()),
        }
    }
}

/// Three node patterns forming a matchable triple.
///
/// Patterns are graph-agnostic: the context of a statement is never matched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatementPattern {
    pub subject: NodePattern,
    pub predicate: NodePattern,
    pub object: NodePattern,
}

impl StatementPattern {
    pub fn new(subject: NodePattern, predicate: NodePattern, object: NodePattern) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    fn slots(&self) -> [&NodePattern; 3] {
        [&self.subject, &self.predicate, &self.object]
    }

    pub fn is_valid(&self) -> bool {
        self.slots().iter().all(|slot| slot.is_valid())
    }

    /// Returns `true` if every bound slot equals the corresponding node of `statement`.
    pub fn matches(&self, statement: &Statement) -> bool {
        self.subject.matches(&statement.subject)
            && self.predicate.matches(&statement.predicate)
            && self.object.matches(&statement.object)
    }

    /// Computes the variable values implied by matching `statement`.
    ///
    /// Returns `None` if the statement does not match, or if a variable used
    /// twice in this pattern would need two different values.
    pub fn bindings_for(&self, statement: &Statement) -> Option<BindingSet> {
        if !self.matches(statement) {
            return None;
        }

        let mut bindings = BindingSet::new();
        for (slot, node) in self.slots().into_iter().zip([
            &statement.subject,
            &statement.predicate,
            &statement.object,
        ]) {
            if let NodePattern::Variable(name) = slot {
                match bindings.get(name) {
                    Some(existing) if existing != node => return None,
                    Some(_) => {}
                    None => bindings.insert(name.clone(), node.clone()),
                }
            }
        }
        Some(bindings)
    }

    /// Renders the pattern as one graph-pattern triple (no trailing punctuation).
    pub fn to_graph_fragment(&self, bindings: &BindingSet) -> String {
        format!(
            "{} {} {}",
            self.subject.to_graph_fragment(bindings),
            self.predicate.to_graph_fragment(bindings),
            self.object.to_graph_fragment(bindings)
        )
    }

    /// Builds the concrete statement this pattern denotes under `bindings`.
    ///
    /// Returns `None` while any slot is still unbound.
    pub fn bind(&self, bindings: &BindingSet) -> Option<Statement> {
        Some(Statement::new(
            self.subject.resolve(bindings)?,
            self.predicate.resolve(bindings)?,
            self.object.resolve(bindings)?,
        ))
    }

    /// Returns the variable names used by this pattern, in slot order.
    pub fn variables(&self) -> Vec<&str> {
        self.slots()
            .into_iter()
            .filter_map(NodePattern::variable_name)
            .collect()
    }
}

impl fmt::Display for StatementPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.subject, self.predicate, self.object)
    }
}
