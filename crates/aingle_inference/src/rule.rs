//! Inference rules.
//!
//! A rule is a list of precondition patterns and one effect pattern. Whenever
//! every precondition is matched by statements in the store under one set of
//! variable values, the effect instantiated with those values is inferred.

use crate::pattern::StatementPattern;
use aingle_triples::{BindingSet, Statement};
use std::fmt;

/// A closure rule: `[p1, p2, ... -> effect]`.
///
/// A rule can be bound to a triggering statement with [`Rule::bind_to`].
/// Binding yields a new value; the trigger is not part of the rule's
/// identity and is ignored by equality.
///
/// # Examples
///
/// ```
/// use aingle_inference::{NodePattern, Rule, StatementPattern};
/// use aingle_triples::{Node, Statement};
///
/// let sco = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
/// let rule = Rule::new(
///     vec![
///         StatementPattern::new(NodePattern::variable("a"), NodePattern::resource(sco), NodePattern::variable("b")),
///         StatementPattern::new(NodePattern::variable("b"), NodePattern::resource(sco), NodePattern::variable("c")),
///     ],
///     StatementPattern::new(NodePattern::variable("a"), NodePattern::resource(sco), NodePattern::variable("c")),
/// );
/// assert!(rule.is_valid());
///
/// let trigger = Statement::new(
///     Node::resource("urn:Cat"),
///     Node::resource(sco),
///     Node::resource("urn:Mammal"),
/// );
/// let query = rule.bind_to(&trigger).create_query(true).unwrap();
/// assert!(query.contains("UNION"));
/// ```
#[derive(Debug, Clone)]
pub struct Rule {
    preconditions: Vec<StatementPattern>,
    effect: StatementPattern,
    bound: Option<Statement>,
}

impl Rule {
    /// Creates an unbound rule.
    pub fn new(preconditions: Vec<StatementPattern>, effect: StatementPattern) -> Self {
        Self {
            preconditions,
            effect,
            bound: None,
        }
    }

    pub fn preconditions(&self) -> &[StatementPattern] {
        &self.preconditions
    }

    pub fn effect(&self) -> &StatementPattern {
        &self.effect
    }

    /// Returns the trigger this rule has been bound to, if any.
    pub fn bound_statement(&self) -> Option<&Statement> {
        self.bound.as_ref()
    }

    /// A rule is valid if it has at least one precondition, all patterns are
    /// valid, and every variable of the effect occurs in some precondition.
    pub fn is_valid(&self) -> bool {
        !self.preconditions.is_empty()
            && self.preconditions.iter().all(StatementPattern::is_valid)
            && self.effect.is_valid()
            && self.effect.variables().iter().all(|var| {
                self.preconditions
                    .iter()
                    .any(|p| p.variables().contains(var))
            })
    }

    /// Returns `true` if `statement` satisfies at least one precondition.
    pub fn matches_any_precondition(&self, statement: &Statement) -> bool {
        self.preconditions.iter().any(|p| p.matches(statement))
    }

    /// Returns a copy of this rule bound to `statement`.
    pub fn bind_to(&self, statement: &Statement) -> Rule {
        Rule {
            bound: Some(statement.clone()),
            ..self.clone()
        }
    }

    /// Builds the SELECT query whose solutions instantiate this rule.
    ///
    /// Without optimization (or without a bound trigger) the query joins all
    /// preconditions. With optimization every precondition satisfied by the
    /// trigger contributes one branch: the remaining preconditions with the
    /// trigger's values substituted. Branches whose values make the effect
    /// unstorable are dropped, and several branches are combined with `UNION`.
    ///
    /// Returns `None` if the rule has no preconditions, if the trigger
    /// satisfies none of them, or if every branch was dropped.
    pub fn create_query(&self, optimize: bool) -> Option<String> {
        if self.preconditions.is_empty() {
            return None;
        }

        let trigger = match (&self.bound, optimize) {
            (Some(trigger), true) => trigger,
            _ => {
                let body = self.conjunction(None, &BindingSet::new());
                return Some(format!("SELECT * WHERE {{ {} }}", body));
            }
        };

        let mut matched = false;
        let mut branches = Vec::new();
        for (i, precondition) in self.preconditions.iter().enumerate() {
            let Some(bindings) = precondition.bindings_for(trigger) else {
                continue;
            };
            matched = true;

            if self.effect_impossible(&bindings) {
                continue;
            }
            branches.push(self.conjunction(Some(i), &bindings));
        }

        if !matched || branches.is_empty() {
            return None;
        }

        let body = if branches.len() == 1 {
            branches.remove(0)
        } else {
            branches
                .iter()
                .map(|b| format!("{{ {} }}", b))
                .collect::<Vec<_>>()
                .join(" UNION ")
        };

        Some(format!("SELECT * WHERE {{ {} }}", body))
    }

    /// Instantiates the effect for one query solution.
    ///
    /// Variables missing from `bindings` are recovered from the bound
    /// trigger. Returns `None` if a slot stays unbound or the resulting
    /// statement could not be stored.
    pub fn bind_effect(&self, bindings: &BindingSet) -> Option<Statement> {
        self.completions(bindings)
            .first()
            .and_then(|complete| self.effect_for(complete))
    }

    /// Instantiates every precondition for one query solution.
    ///
    /// The result is the set of statements justifying the statement returned
    /// by [`Rule::bind_effect`] for the same solution.
    pub fn bind_preconditions(&self, bindings: &BindingSet) -> Option<Vec<Statement>> {
        self.completions(bindings)
            .first()
            .and_then(|complete| self.preconditions_for(complete))
    }

    /// Returns every distinct full assignment of the rule's variables that
    /// extends `bindings` with the values the trigger implies.
    ///
    /// A solution of a `UNION` query does not say which branch produced it,
    /// so more than one completion can exist when several preconditions are
    /// satisfied by the trigger. The branch that produced the solution is
    /// always among them.
    pub fn completions(&self, bindings: &BindingSet) -> Vec<BindingSet> {
        if self.is_complete(bindings) {
            return vec![bindings.clone()];
        }

        let mut completions = Vec::new();
        let Some(trigger) = &self.bound else {
            return completions;
        };

        for precondition in &self.preconditions {
            let Some(implied) = precondition.bindings_for(trigger) else {
                continue;
            };
            let consistent = implied
                .iter()
                .all(|(name, node)| bindings.get(name).is_none_or(|value| value == node));
            if !consistent {
                continue;
            }

            let mut merged = bindings.clone();
            merged.merge(&implied);
            if self.is_complete(&merged) && !completions.contains(&merged) {
                completions.push(merged);
            }
        }

        completions
    }

    /// Instantiates the effect under a complete assignment.
    pub fn effect_for(&self, complete: &BindingSet) -> Option<Statement> {
        self.effect.bind(complete).filter(Statement::is_valid)
    }

    /// Instantiates the preconditions under a complete assignment.
    pub fn preconditions_for(&self, complete: &BindingSet) -> Option<Vec<Statement>> {
        self.preconditions
            .iter()
            .map(|p| p.bind(complete))
            .collect()
    }

    fn is_complete(&self, bindings: &BindingSet) -> bool {
        self.preconditions
            .iter()
            .chain(std::iter::once(&self.effect))
            .flat_map(StatementPattern::variables)
            .all(|var| bindings.contains(var))
    }

    /// Joins every precondition except `skip`, rendered under `bindings`.
    fn conjunction(&self, skip: Option<usize>, bindings: &BindingSet) -> String {
        self.preconditions
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != skip)
            .map(|(_, p)| p.to_graph_fragment(bindings))
            .collect::<Vec<_>>()
            .join(" . ")
    }

    /// Returns `true` if `bindings` already rule out a storable effect.
    fn effect_impossible(&self, bindings: &BindingSet) -> bool {
        let subject = self.effect.subject.resolve(bindings);
        let predicate = self.effect.predicate.resolve(bindings);

        subject.is_some_and(|s| s.is_literal())
            || predicate.is_some_and(|p| p.is_literal() || p.is_blank())
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.preconditions == other.preconditions && self.effect == other.effect
    }
}

impl Eq for Rule {}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, precondition) in self.preconditions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", precondition)?;
        }
        write!(f, " -> {}]", self.effect)
    }
}
