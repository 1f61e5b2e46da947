//! Named collections of rules and the standard rule sets.

use crate::config::RuleSource;
use crate::error::{Error, Result};
use crate::parser::RuleParser;
use crate::rule::Rule;
use indexmap::IndexMap;
use log::debug;

const RDFS_RULES: &str = include_str!("../rules/rdfs.rules");
const NRL_RULES: &str = include_str!("../rules/nrl.rules");

/// The rule sets shipped with this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardRuleSet {
    /// RDF Schema entailment.
    Rdfs,
    /// NRL transitive, symmetric and inverse properties.
    Nrl,
}

impl StandardRuleSet {
    /// Name of the set, also the stem of its rule file.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rdfs => "rdfs",
            Self::Nrl => "nrl",
        }
    }

    fn file_name(&self) -> String {
        format!("{}.rules", self.name())
    }

    fn embedded(&self) -> &'static str {
        match self {
            Self::Rdfs => RDFS_RULES,
            Self::Nrl => NRL_RULES,
        }
    }
}

/// A collection of rules keyed by name.
///
/// Names are unique. Iteration follows insertion order; replacing a rule
/// keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    name: String,
    rules: IndexMap<String, Rule>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: IndexMap::new(),
        }
    }

    /// Loads one of the embedded standard rule sets.
    ///
    /// ```
    /// use aingle_inference::{RuleSet, StandardRuleSet};
    ///
    /// let rdfs = RuleSet::standard(StandardRuleSet::Rdfs)?;
    /// assert_eq!(rdfs.len(), 10);
    /// assert!(rdfs.contains("rdfs9"));
    /// # Ok::<(), aingle_inference::Error>(())
    /// ```
    pub fn standard(which: StandardRuleSet) -> Result<Self> {
        Self::standard_from(which, &RuleSource::Embedded)
    }

    /// Loads a standard rule set from `source`.
    pub fn standard_from(which: StandardRuleSet, source: &RuleSource) -> Result<Self> {
        let mut parser = RuleParser::new();
        let mut rules = match source {
            RuleSource::Embedded => parser.parse_str(which.embedded())?,
            RuleSource::Directory(dir) => parser.parse_file(dir.join(which.file_name()))?,
        };
        rules.set_name(which.name());

        debug!("loaded standard rule set {} ({} rules)", which.name(), rules.len());
        Ok(rules)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Adds a rule, replacing any rule with the same name.
    ///
    /// Returns the replaced rule.
    pub fn insert(&mut self, name: impl Into<String>, rule: Rule) -> Option<Rule> {
        self.rules.insert(name.into(), rule)
    }

    /// Adds a rule after checking it with [`Rule::is_valid`].
    pub fn try_insert(&mut self, name: impl Into<String>, rule: Rule) -> Result<()> {
        let name = name.into();
        if !rule.is_valid() {
            return Err(Error::InvalidRule(format!("{}: {}", name, rule)));
        }
        self.rules.insert(name, rule);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Removes a rule, keeping the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<Rule> {
        self.rules.shift_remove(name)
    }

    /// Returns a copy of every rule, in order.
    pub fn all(&self) -> Vec<Rule> {
        self.rules.values().cloned().collect()
    }

    /// Returns the rule names, in order.
    pub fn names(&self) -> Vec<&str> {
        self.rules.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Copies every rule of `other` into this set, replacing same-named rules.
    pub fn extend(&mut self, other: &RuleSet) {
        for (name, rule) in other.iter() {
            self.rules.insert(name.to_string(), rule.clone());
        }
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = (&'a String, &'a Rule);
    type IntoIter = indexmap::map::Iter<'a, String, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
