//! The forward-chaining inference engine.
//!
//! `InferenceModel` wraps a [`Model`] and keeps it closed under a rule set.
//! Every statement added through the engine is matched against the rules;
//! derived statements are inserted into the store and each derivation is
//! recorded as a [`Justification`]. Removing statements retracts whatever
//! no longer has a derivation made only of present statements.
//!
//! Provenance records are written to the store's metadata space after every
//! mutating call and read back when an engine is created over the store, so
//! retraction keeps working for a persistent store that is reopened.

use crate::config::InferenceConfig;
use crate::error::{Error, Result};
use crate::rule::Rule;
use crate::rule_set::{RuleSet, StandardRuleSet};
use aingle_triples::{BindingSet, Model, Node, Statement};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// Metadata key prefix of persisted provenance records.
pub const PROVENANCE_PREFIX: &[u8] = b"aingle_inference/provenance/";

/// One derivation of an inferred statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Justification {
    /// Name of the rule that produced the statement.
    pub rule: String,
    /// The statements matched by the rule's preconditions, in order.
    pub sources: Vec<Statement>,
}

/// Derivations known for one statement.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Provenance {
    justifications: HashSet<Justification>,
    /// Graphs the statement was also added to directly. While any remain
    /// the statement is kept when every derivation is lost.
    asserted: BTreeSet<Node>,
}

impl Provenance {
    fn is_asserted(&self) -> bool {
        !self.asserted.is_empty()
    }
}

/// Counters describing the work done by an [`InferenceModel`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferenceStats {
    /// Rule queries sent to the store.
    pub queries_executed: usize,
    /// Derived statements inserted into the store.
    pub statements_inferred: usize,
    /// Derived statements removed because their derivations were lost.
    pub statements_retracted: usize,
    /// Passes run by [`InferenceModel::perform_inference`].
    pub fixpoint_passes: usize,
    /// Rule queries answered from the per-generation cache.
    pub cache_hits: usize,
}

type QueryCache = HashMap<String, Vec<BindingSet>>;

/// A rule-driven view over a statement store.
///
/// Provenance is tracked per statement regardless of the graph it lives in:
/// a statement counts as present if it exists in any graph.
///
/// # Examples
///
/// ```
/// use aingle_inference::{InferenceModel, RuleSet, StandardRuleSet};
/// use aingle_triples::{Model, Node, Statement, TripleStore};
///
/// let sco = Node::resource("http://www.w3.org/2000/01/rdf-schema#subClassOf");
/// let st = |a: &str, b: &str| Statement::new(Node::resource(a), sco.clone(), Node::resource(b));
///
/// let mut model = InferenceModel::new(TripleStore::memory()?)?;
/// let rdfs = RuleSet::standard(StandardRuleSet::Rdfs)?;
/// model.add_rule("rdfs9", rdfs.get("rdfs9").cloned().unwrap())?;
///
/// model.add_statement(&st("urn:Cat", "urn:Mammal"))?;
/// model.add_statement(&st("urn:Mammal", "urn:Animal"))?;
/// assert!(model.store().contains_statement(&st("urn:Cat", "urn:Animal"))?);
///
/// model.remove_statement(&st("urn:Mammal", "urn:Animal"))?;
/// assert!(!model.store().contains_statement(&st("urn:Cat", "urn:Animal"))?);
/// # Ok::<(), aingle_inference::Error>(())
/// ```
pub struct InferenceModel<M: Model> {
    store: M,
    rules: RuleSet,
    config: InferenceConfig,
    /// Keyed by the statement without its context.
    provenance: HashMap<Statement, Provenance>,
    /// Source statement -> statements with a justification using it.
    dependents: HashMap<Statement, HashSet<Statement>>,
    /// Records changed since they were last written to the store.
    dirty: HashSet<Statement>,
    stats: InferenceStats,
}

impl<M: Model> InferenceModel<M> {
    /// Creates an engine with the default configuration and no rules.
    pub fn new(store: M) -> Result<Self> {
        Self::with_config(store, InferenceConfig::default())
    }

    /// Creates an engine over `store` and loads the provenance records an
    /// earlier engine left in its metadata space.
    ///
    /// # Errors
    ///
    /// `Error::Store` if the metadata cannot be read, `Error::Provenance` if a
    /// record cannot be decoded.
    pub fn with_config(store: M, config: InferenceConfig) -> Result<Self> {
        let mut model = Self {
            store,
            rules: RuleSet::new("inference"),
            config,
            provenance: HashMap::new(),
            dependents: HashMap::new(),
            dirty: HashSet::new(),
            stats: InferenceStats::default(),
        };
        model.load_provenance()?;
        Ok(model)
    }

    /// Consumes the engine and returns the wrapped store.
    pub fn into_store(self) -> M {
        self.store
    }

    /// Adds a rule, replacing any rule of the same name.
    ///
    /// # Errors
    ///
    /// `Error::InvalidRule` if the rule fails [`Rule::is_valid`].
    pub fn add_rule(&mut self, name: impl Into<String>, rule: Rule) -> Result<()> {
        self.rules.try_insert(name, rule)
    }

    /// Adds every rule of `rules`. Nothing is added if one of them is invalid.
    pub fn add_rule_set(&mut self, rules: &RuleSet) -> Result<()> {
        check_rules(rules)?;
        self.rules.extend(rules);
        debug!("added {} rules from set {}", rules.len(), rules.name());
        Ok(())
    }

    /// Loads a standard rule set from the configured rule source and adds it.
    pub fn add_standard_rules(&mut self, which: StandardRuleSet) -> Result<()> {
        let rules = RuleSet::standard_from(which, &self.config.rule_source)?;
        self.add_rule_set(&rules)
    }

    /// Replaces the whole rule set.
    pub fn set_rules(&mut self, rules: RuleSet) -> Result<()> {
        check_rules(&rules)?;
        self.rules = rules;
        Ok(())
    }

    /// Removes every rule. Already inferred statements stay in the store.
    pub fn clear_rules(&mut self) {
        self.rules.clear();
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn set_optimized_queries(&mut self, enabled: bool) {
        self.config.optimized_queries = enabled;
    }

    pub fn set_compressed_source_statements(&mut self, enabled: bool) {
        self.config.compressed_source_statements = enabled;
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Returns the wrapped store.
    pub fn store(&self) -> &M {
        &self.store
    }

    pub fn stats(&self) -> InferenceStats {
        self.stats.clone()
    }

    pub fn clear_stats(&mut self) {
        self.stats = InferenceStats::default();
    }

    /// Returns `true` if the engine holds at least one derivation of `statement`.
    pub fn is_inferred(&self, statement: &Statement) -> bool {
        self.provenance
            .get(&statement.without_context())
            .is_some_and(|record| !record.justifications.is_empty())
    }

    /// Returns the known derivations of `statement`.
    pub fn justifications(&self, statement: &Statement) -> Vec<Justification> {
        self.provenance
            .get(&statement.without_context())
            .map(|record| record.justifications.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns every statement with at least one recorded derivation, sorted.
    pub fn inferred_statements(&self) -> Vec<Statement> {
        let mut statements: Vec<_> = self.provenance.keys().cloned().collect();
        statements.sort();
        statements
    }

    /// Adds a statement and everything the rules derive from it.
    ///
    /// # Errors
    ///
    /// `Error::InvalidStatement` if the statement cannot be stored; store
    /// errors abort the call and are returned as `Error::Store`.
    pub fn add_statement(&mut self, statement: &Statement) -> Result<()> {
        self.add_statements(std::slice::from_ref(statement))
    }

    /// Adds several statements and runs inference once for all of them.
    ///
    /// Nothing is added if one of the statements is invalid.
    pub fn add_statements(&mut self, statements: &[Statement]) -> Result<()> {
        if let Some(invalid) = statements.iter().find(|s| !s.is_valid()) {
            return Err(Error::InvalidStatement(invalid.to_string()));
        }

        let mut triggers = Vec::with_capacity(statements.len());
        for statement in statements {
            self.store.add_statement(statement)?;

            let key = statement.without_context();
            if let Some(record) = self.provenance.get_mut(&key) {
                if record.asserted.insert(statement.context.clone()) {
                    self.dirty.insert(key.clone());
                }
            }
            triggers.push(key);
        }

        self.propagate(triggers)?;
        self.persist()
    }

    /// Removes a fully specified statement and retracts what depended on it.
    pub fn remove_statement(&mut self, statement: &Statement) -> Result<()> {
        if !statement.is_valid() {
            return Err(Error::InvalidStatement(statement.to_string()));
        }
        self.remove_all_statements(statement)
    }

    /// Removes every statement matching `pattern` and retracts derived
    /// statements that lost all their derivations.
    ///
    /// Statements removed here are not derived again during this call, even
    /// if the rules would still produce them.
    pub fn remove_all_statements(&mut self, pattern: &Statement) -> Result<()> {
        let matching: Vec<Statement> = self.store.list_statements(pattern)?.collect();
        if matching.is_empty() {
            return Ok(());
        }
        self.store.remove_all_statements(pattern)?;

        let mut seen = HashSet::new();
        let mut removed = Vec::new();
        for statement in matching {
            let key = statement.without_context();
            if let Some(record) = self.provenance.get_mut(&key) {
                if record.asserted.remove(&statement.context) {
                    self.dirty.insert(key.clone());
                }
            }
            if seen.insert(key.clone()) && !self.is_present(&key)? {
                removed.push(key);
            }
        }

        if !removed.is_empty() {
            self.retract(removed)?;
        }
        self.persist()
    }

    /// Evaluates every rule against the whole store until nothing new is derived.
    ///
    /// Use this after statements were written to the store directly.
    pub fn perform_inference(&mut self) -> Result<()> {
        let rules = self.rule_snapshot(|_| true);

        loop {
            self.stats.fixpoint_passes += 1;

            let mut inserted = 0;
            for (name, rule) in &rules {
                for (derived, sources) in self.evaluate(rule, None, None)? {
                    if self.record(name, derived, sources)? {
                        inserted += 1;
                    }
                }
            }

            debug!("inference pass inserted {} statements", inserted);
            if inserted == 0 {
                return self.persist();
            }
        }
    }

    /// Removes every inferred statement that was not also asserted and
    /// forgets all derivations.
    pub fn clear_inference(&mut self) -> Result<()> {
        let derived: Vec<Statement> = self
            .provenance
            .iter()
            .filter(|(_, record)| !record.is_asserted())
            .map(|(statement, _)| statement.clone())
            .collect();

        for statement in &derived {
            self.store.remove_all_statements(&self.placed(statement))?;
        }

        self.stats.statements_retracted += derived.len();
        self.dirty.extend(self.provenance.drain().map(|(statement, _)| statement));
        self.dependents.clear();
        debug!("cleared {} inferred statements", derived.len());
        self.persist()
    }

    fn propagate(&mut self, triggers: Vec<Statement>) -> Result<()> {
        if self.rules.is_empty() {
            return Ok(());
        }

        if self.config.compressed_source_statements {
            let mut generation = triggers;
            while !generation.is_empty() {
                generation = self.process_generation(&generation)?;
            }
            return Ok(());
        }

        let mut queue: VecDeque<Statement> = triggers.into();
        while let Some(trigger) = queue.pop_front() {
            for (name, rule) in self.rule_snapshot(|rule| rule.matches_any_precondition(&trigger)) {
                for (derived, sources) in self.evaluate(&rule, Some(&trigger), None)? {
                    if self.record(&name, derived.clone(), sources)? {
                        queue.push_back(derived);
                    }
                }
            }
        }
        Ok(())
    }

    /// Evaluates all triggers of one generation against the same store
    /// contents, then inserts the results. Returns the next generation.
    fn process_generation(&mut self, generation: &[Statement]) -> Result<Vec<Statement>> {
        let mut cache = QueryCache::new();
        let mut pending = Vec::new();

        for trigger in generation {
            for (name, rule) in self.rule_snapshot(|rule| rule.matches_any_precondition(trigger)) {
                for (derived, sources) in self.evaluate(&rule, Some(trigger), Some(&mut cache))? {
                    pending.push((name.clone(), derived, sources));
                }
            }
        }

        let mut next = Vec::new();
        for (name, derived, sources) in pending {
            if self.record(&name, derived.clone(), sources)? {
                next.push(derived);
            }
        }

        trace!(
            "generation of {} triggers ran {} distinct queries, produced {} statements",
            generation.len(),
            cache.len(),
            next.len()
        );
        Ok(next)
    }

    fn rule_snapshot(&self, filter: impl Fn(&Rule) -> bool) -> Vec<(String, Rule)> {
        self.rules
            .iter()
            .filter(|(_, rule)| filter(rule))
            .map(|(name, rule)| (name.to_string(), rule.clone()))
            .collect()
    }

    /// Runs `rule`, bound to `trigger` if given, and returns every derived
    /// statement with the statements it was derived from.
    fn evaluate(
        &mut self,
        rule: &Rule,
        trigger: Option<&Statement>,
        cache: Option<&mut QueryCache>,
    ) -> Result<Vec<(Statement, Vec<Statement>)>> {
        let bound;
        let rule = match trigger {
            Some(trigger) => {
                bound = rule.bind_to(trigger);
                &bound
            }
            None => rule,
        };

        let Some(query) = rule.create_query(self.config.optimized_queries) else {
            return Ok(Vec::new());
        };
        let solutions = self.run_query(&query, cache)?;

        let mut derivations = Vec::new();
        for solution in &solutions {
            let completions = rule.completions(solution);
            // Several completions mean the solution could stem from more than
            // one UNION branch; only those whose sources exist are real.
            let ambiguous = completions.len() > 1;
            for complete in &completions {
                let (Some(effect), Some(sources)) =
                    (rule.effect_for(complete), rule.preconditions_for(complete))
                else {
                    continue;
                };
                if ambiguous && !self.all_present(&sources)? {
                    continue;
                }
                derivations.push((effect, sources));
            }
        }
        Ok(derivations)
    }

    fn run_query(&mut self, query: &str, cache: Option<&mut QueryCache>) -> Result<Vec<BindingSet>> {
        let Some(cache) = cache else {
            return self.execute(query);
        };

        if let Some(solutions) = cache.get(query) {
            self.stats.cache_hits += 1;
            return Ok(solutions.clone());
        }
        let solutions = self.execute(query)?;
        cache.insert(query.to_string(), solutions.clone());
        Ok(solutions)
    }

    fn execute(&mut self, query: &str) -> Result<Vec<BindingSet>> {
        trace!("rule query: {}", query);
        self.stats.queries_executed += 1;
        Ok(self.store.execute_query(query)?.collect())
    }

    /// Records one derivation of `derived` and inserts it if it is new.
    ///
    /// Returns `true` if the statement was inserted. Statements already in
    /// the store without a derivation record are base facts and are left
    /// alone.
    fn record(&mut self, rule: &str, derived: Statement, sources: Vec<Statement>) -> Result<bool> {
        let key = derived.without_context();
        if !self.provenance.contains_key(&key) && self.is_present(&key)? {
            return Ok(false);
        }

        for source in &sources {
            self.dependents
                .entry(source.clone())
                .or_default()
                .insert(key.clone());
        }
        let added = self
            .provenance
            .entry(key.clone())
            .or_default()
            .justifications
            .insert(Justification {
                rule: rule.to_string(),
                sources,
            });
        if added {
            self.dirty.insert(key.clone());
        }

        if self.is_present(&key)? {
            return Ok(false);
        }
        self.store.add_statement(&self.placed(&key))?;
        self.stats.statements_inferred += 1;
        debug!("inferred {} by {}", key, rule);
        Ok(true)
    }

    /// Over-deletes everything derived from `removed`, restores what still
    /// has a derivation from present statements, then drops derivations
    /// that refer to statements which are gone.
    fn retract(&mut self, removed: Vec<Statement>) -> Result<()> {
        let mut visited: HashSet<Statement> = removed.iter().cloned().collect();
        let mut queue: VecDeque<Statement> = removed.iter().cloned().collect();
        let mut overdeleted = Vec::new();

        while let Some(statement) = queue.pop_front() {
            let Some(dependents) = self.dependents.get(&statement) else {
                continue;
            };
            let dependents: Vec<Statement> = dependents.iter().cloned().collect();

            for dependent in dependents {
                let derived_only = self
                    .provenance
                    .get(&dependent)
                    .is_some_and(|record| !record.is_asserted());
                if !derived_only || !visited.insert(dependent.clone()) {
                    continue;
                }
                self.store.remove_all_statements(&self.placed(&dependent))?;
                queue.push_back(dependent.clone());
                overdeleted.push(dependent);
            }
        }

        let mut restored = HashSet::new();
        loop {
            let mut changed = false;
            for statement in &overdeleted {
                if restored.contains(statement) || !self.has_live_justification(statement)? {
                    continue;
                }
                self.store.add_statement(&self.placed(statement))?;
                restored.insert(statement.clone());
                changed = true;
            }
            if !changed {
                break;
            }
        }

        let retracted: Vec<Statement> = overdeleted
            .into_iter()
            .filter(|statement| !restored.contains(statement))
            .collect();
        for statement in &retracted {
            debug!("retracted {}", statement);
        }
        self.stats.statements_retracted += retracted.len();

        let missing: Vec<Statement> = removed.into_iter().chain(retracted).collect();
        self.forget(&missing);
        Ok(())
    }

    /// Drops the records of `missing` statements and every derivation that
    /// uses one of them. Asserted statements left without derivations are
    /// no longer considered inferred.
    fn forget(&mut self, missing: &[Statement]) {
        for statement in missing {
            if let Some(record) = self.provenance.remove(statement) {
                for justification in &record.justifications {
                    unlink(&mut self.dependents, statement, justification);
                }
                self.dirty.insert(statement.clone());
            }
        }

        for statement in missing {
            let Some(dependents) = self.dependents.remove(statement) else {
                continue;
            };

            for dependent in dependents {
                let Some(record) = self.provenance.get_mut(&dependent) else {
                    continue;
                };

                let (lost, kept): (HashSet<_>, HashSet<_>) = record
                    .justifications
                    .drain()
                    .partition(|j| j.sources.contains(statement));
                record.justifications = kept;
                if !lost.is_empty() {
                    self.dirty.insert(dependent.clone());
                }

                for justification in &lost {
                    unlink(&mut self.dependents, &dependent, justification);
                }
                for justification in &record.justifications {
                    for source in &justification.sources {
                        self.dependents
                            .entry(source.clone())
                            .or_default()
                            .insert(dependent.clone());
                    }
                }

                if record.justifications.is_empty() && record.is_asserted() {
                    self.provenance.remove(&dependent);
                    debug!("{} is no longer inferred", dependent);
                }
            }
        }
    }

    /// Reads the records persisted by an earlier engine and rebuilds the
    /// reverse index from them.
    fn load_provenance(&mut self) -> Result<()> {
        for (key, value) in self.store.scan_metadata(PROVENANCE_PREFIX)? {
            let ((statement, record), _): ((Statement, Provenance), usize) =
                bincode::serde::decode_from_slice(&value, bincode::config::standard()).map_err(
                    |e| Error::Provenance(format!("{}: {}", String::from_utf8_lossy(&key), e)),
                )?;

            for justification in &record.justifications {
                for source in &justification.sources {
                    self.dependents
                        .entry(source.clone())
                        .or_default()
                        .insert(statement.clone());
                }
            }
            self.provenance.insert(statement, record);
        }

        if !self.provenance.is_empty() {
            debug!("loaded {} provenance records", self.provenance.len());
        }
        Ok(())
    }

    /// Writes changed records to the store's metadata space and deletes the
    /// entries of records that are gone.
    fn persist(&mut self) -> Result<()> {
        if !self.store.supports_metadata() {
            self.dirty.clear();
            return Ok(());
        }

        let pending: Vec<Statement> = self.dirty.iter().cloned().collect();
        for statement in pending {
            let key = provenance_key(&statement);
            match self.provenance.get(&statement) {
                Some(record) => {
                    let value = bincode::serde::encode_to_vec(
                        (&statement, record),
                        bincode::config::standard(),
                    )
                    .map_err(|e| Error::Provenance(format!("{}: {}", statement, e)))?;
                    self.store.put_metadata(&key, &value)?;
                }
                None => self.store.remove_metadata(&key)?,
            }
            self.dirty.remove(&statement);
        }
        Ok(())
    }

    fn has_live_justification(&self, statement: &Statement) -> Result<bool> {
        let Some(record) = self.provenance.get(statement) else {
            return Ok(false);
        };
        for justification in &record.justifications {
            if self.all_present(&justification.sources)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn all_present(&self, statements: &[Statement]) -> Result<bool> {
        for statement in statements {
            if !self.is_present(statement)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Present in any graph.
    fn is_present(&self, statement: &Statement) -> Result<bool> {
        Ok(self
            .store
            .contains_any_statement(&statement.without_context())?)
    }

    /// Where a derived statement is written.
    fn placed(&self, statement: &Statement) -> Statement {
        match &self.config.inference_graph {
            Some(graph) => statement.in_context(Node::resource(graph.clone())),
            None => statement.without_context(),
        }
    }
}

fn provenance_key(statement: &Statement) -> Vec<u8> {
    let mut key = PROVENANCE_PREFIX.to_vec();
    key.extend_from_slice(statement.id().to_hex().as_bytes());
    key
}

fn check_rules(rules: &RuleSet) -> Result<()> {
    match rules.iter().find(|(_, rule)| !rule.is_valid()) {
        Some((name, rule)) => Err(Error::InvalidRule(format!("{}: {}", name, rule))),
        None => Ok(()),
    }
}

fn unlink(
    dependents: &mut HashMap<Statement, HashSet<Statement>>,
    derived: &Statement,
    justification: &Justification,
) {
    for source in &justification.sources {
        if let Some(set) = dependents.get_mut(source) {
            set.remove(derived);
            if set.is_empty() {
                dependents.remove(source);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{NodePattern, StatementPattern};
    use aingle_triples::TripleStore;

    const SCO: &str = "urn:subClassOf";

    fn st(s: &str, o: &str) -> Statement {
        Statement::new(Node::resource(s), Node::resource(SCO), Node::resource(o))
    }

    fn transitive() -> Rule {
        let var = NodePattern::variable;
        let sco = || NodePattern::resource(SCO);
        Rule::new(
            vec![
                StatementPattern::new(var("a"), sco(), var("b")),
                StatementPattern::new(var("b"), sco(), var("c")),
            ],
            StatementPattern::new(var("a"), sco(), var("c")),
        )
    }

    fn model() -> InferenceModel<TripleStore> {
        let mut model = InferenceModel::new(TripleStore::memory().unwrap()).unwrap();
        model.add_rule("transitive", transitive()).unwrap();
        model
    }

    #[test]
    fn test_derivation_is_recorded() {
        let mut model = model();
        model.add_statement(&st("urn:A", "urn:B")).unwrap();
        model.add_statement(&st("urn:B", "urn:C")).unwrap();

        assert!(model.is_inferred(&st("urn:A", "urn:C")));
        assert!(!model.is_inferred(&st("urn:A", "urn:B")));
        assert_eq!(
            model.justifications(&st("urn:A", "urn:C")),
            vec![Justification {
                rule: "transitive".to_string(),
                sources: vec![st("urn:A", "urn:B"), st("urn:B", "urn:C")],
            }]
        );
        assert_eq!(model.inferred_statements(), vec![st("urn:A", "urn:C")]);
        assert_eq!(model.stats().statements_inferred, 1);
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let mut model = model();
        let literal_subject = Statement::new(
            Node::literal("x"),
            Node::resource(SCO),
            Node::resource("urn:B"),
        );
        assert!(matches!(
            model.add_statement(&literal_subject),
            Err(Error::InvalidStatement(_))
        ));
        assert!(matches!(
            model.remove_statement(&Statement::default()),
            Err(Error::InvalidStatement(_))
        ));

        let no_preconditions = Rule::new(
            Vec::new(),
            StatementPattern::new(
                NodePattern::resource("urn:a"),
                NodePattern::resource(SCO),
                NodePattern::resource("urn:b"),
            ),
        );
        assert!(matches!(
            model.add_rule("empty", no_preconditions),
            Err(Error::InvalidRule(_))
        ));
        assert_eq!(model.rules().len(), 1);
    }

    #[test]
    fn test_asserted_statement_is_demoted() {
        let mut model = model();
        model.add_statement(&st("urn:A", "urn:B")).unwrap();
        model.add_statement(&st("urn:B", "urn:C")).unwrap();
        // already derived, now asserted as well
        model.add_statement(&st("urn:A", "urn:C")).unwrap();

        model.remove_statement(&st("urn:B", "urn:C")).unwrap();

        let store = model.store();
        assert!(store.contains_statement(&st("urn:A", "urn:C")).unwrap());
        assert!(!model.is_inferred(&st("urn:A", "urn:C")));
        assert!(model.inferred_statements().is_empty());
    }

    #[test]
    fn test_base_fact_is_not_recorded() {
        let mut model = model();
        model.add_statement(&st("urn:A", "urn:C")).unwrap();
        model.add_statement(&st("urn:A", "urn:B")).unwrap();
        model.add_statement(&st("urn:B", "urn:C")).unwrap();

        assert!(!model.is_inferred(&st("urn:A", "urn:C")));
        model.remove_statement(&st("urn:A", "urn:B")).unwrap();
        assert!(model
            .store()
            .contains_statement(&st("urn:A", "urn:C"))
            .unwrap());
    }

    #[test]
    fn test_inference_graph() {
        let config = InferenceConfig::default().with_inference_graph("urn:graph:inferred");
        let mut model = InferenceModel::with_config(TripleStore::memory().unwrap(), config).unwrap();
        model.add_rule("transitive", transitive()).unwrap();

        model.add_statement(&st("urn:A", "urn:B")).unwrap();
        model.add_statement(&st("urn:B", "urn:C")).unwrap();

        let in_graph = st("urn:A", "urn:C").in_context(Node::resource("urn:graph:inferred"));
        assert!(model.store().contains_statement(&in_graph).unwrap());

        model.remove_statement(&st("urn:A", "urn:B")).unwrap();
        assert!(!model.store().contains_statement(&in_graph).unwrap());
    }

    #[test]
    fn test_compressed_mode_uses_query_cache() {
        let mut model = model();
        model.set_optimized_queries(false);
        model.set_compressed_source_statements(true);

        model
            .add_statements(&[st("urn:A", "urn:B"), st("urn:B", "urn:C"), st("urn:C", "urn:D")])
            .unwrap();

        assert!(model.stats().cache_hits > 0);
        assert!(model
            .store()
            .contains_statement(&st("urn:A", "urn:D"))
            .unwrap());
    }

    #[test]
    fn test_clear_rules_keeps_inferred() {
        let mut model = model();
        model.add_statement(&st("urn:A", "urn:B")).unwrap();
        model.add_statement(&st("urn:B", "urn:C")).unwrap();
        model.clear_rules();
        model.add_statement(&st("urn:C", "urn:D")).unwrap();

        let store = model.store();
        assert!(store.contains_statement(&st("urn:A", "urn:C")).unwrap());
        assert!(!store.contains_statement(&st("urn:A", "urn:D")).unwrap());
    }

    #[test]
    fn test_assertion_in_another_graph_is_withdrawn() {
        let mut model = model();
        let graph = Node::resource("urn:graph:asserted");
        model.add_statement(&st("urn:A", "urn:B")).unwrap();
        model.add_statement(&st("urn:B", "urn:C")).unwrap();

        let asserted = st("urn:A", "urn:C").in_context(graph);
        model.add_statement(&asserted).unwrap();
        model.remove_statement(&asserted).unwrap();

        // the derived copy stays as long as its derivation does
        assert!(model.is_inferred(&st("urn:A", "urn:C")));
        assert!(model
            .store()
            .contains_statement(&st("urn:A", "urn:C"))
            .unwrap());

        model.remove_statement(&st("urn:B", "urn:C")).unwrap();
        assert!(!model
            .store()
            .contains_any_statement(&st("urn:A", "urn:C"))
            .unwrap());
        assert!(model.inferred_statements().is_empty());
    }

    #[test]
    fn test_clear_inference_after_withdrawn_assertion() {
        let mut model = model();
        let graph = Node::resource("urn:graph:asserted");
        model.add_statement(&st("urn:A", "urn:B")).unwrap();
        model.add_statement(&st("urn:B", "urn:C")).unwrap();
        model
            .add_statement(&st("urn:A", "urn:C").in_context(graph.clone()))
            .unwrap();
        model
            .remove_statement(&st("urn:A", "urn:C").in_context(graph))
            .unwrap();

        model.clear_inference().unwrap();
        assert!(!model
            .store()
            .contains_any_statement(&st("urn:A", "urn:C"))
            .unwrap());
        assert_eq!(model.store().statement_count().unwrap(), 2);
    }

    #[test]
    fn test_provenance_is_written_to_metadata() {
        let mut model = model();
        model.add_statement(&st("urn:A", "urn:B")).unwrap();
        model.add_statement(&st("urn:B", "urn:C")).unwrap();

        let entries = model.store().scan_metadata(PROVENANCE_PREFIX).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, provenance_key(&st("urn:A", "urn:C")));

        model.remove_statement(&st("urn:A", "urn:B")).unwrap();
        assert!(model
            .store()
            .scan_metadata(PROVENANCE_PREFIX)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_provenance_is_reloaded() {
        let mut model = model();
        model.add_statement(&st("urn:A", "urn:B")).unwrap();
        model.add_statement(&st("urn:B", "urn:C")).unwrap();
        model.add_statement(&st("urn:C", "urn:D")).unwrap();
        let justifications = model.justifications(&st("urn:A", "urn:D"));

        let mut reopened = InferenceModel::new(model.into_store()).unwrap();
        reopened.add_rule("transitive", transitive()).unwrap();
        assert_eq!(reopened.inferred_statements().len(), 3);
        assert_eq!(
            reopened.justifications(&st("urn:A", "urn:D")).len(),
            justifications.len()
        );

        reopened.remove_statement(&st("urn:B", "urn:C")).unwrap();
        let store = reopened.store();
        assert!(!store.contains_statement(&st("urn:A", "urn:C")).unwrap());
        assert!(!store.contains_statement(&st("urn:A", "urn:D")).unwrap());
        assert!(!store.contains_statement(&st("urn:B", "urn:D")).unwrap());
        assert_eq!(store.statement_count().unwrap(), 2);
    }

    #[test]
    fn test_corrupt_provenance_is_reported() {
        let store = TripleStore::memory().unwrap();
        let mut key = PROVENANCE_PREFIX.to_vec();
        key.extend_from_slice(b"broken");
        store.put_metadata(&key, &[0xff, 0x00]).unwrap();

        assert!(matches!(
            InferenceModel::new(store),
            Err(Error::Provenance(_))
        ));
    }
}
