//! The knowledge base: storage, assertion and forward chaining.
//!
//! Facts and rules live in an arena of slots addressed by [`FactId`] and
//! [`RuleId`]. Two insertion-ordered indexes map statements (and rule shapes)
//! to their handles; they give structural de-duplication and the pairing order
//! used by forward chaining. Each stored item also keeps the list of items it
//! helps justify, which retraction walks to find what may have lost support.
//!
//! Chaining is driven by an agenda of inserted items that have not been paired
//! yet. An item taken off the agenda is paired only with opposite items that
//! were themselves already taken off, so each fact/rule pair is tried once no
//! matter which side arrived first.

mod explain;
mod retract;

pub use retract::Retraction;

use std::collections::VecDeque;
use std::fmt;

use indexmap::IndexMap;

use crate::bindings::ListOfBindings;
use crate::config::Config;
use crate::engine::InferenceEngine;
use crate::error::{TmsError, TmsResult};
use crate::item::{Fact, FactId, Item, ItemId, Justification, Rule, RuleId, Support};
use crate::term::Statement;
use crate::tracer::Tracer;
use crate::unify::matches;

/// A stored item plus its chaining bookkeeping.
#[derive(Debug, Clone)]
struct Entry<T> {
    item: T,
    /// Set once the item has been paired against the opposite collection.
    chained: bool,
    /// Items that list this one in a justification.
    dependents: Vec<ItemId>,
}

impl<T> Entry<T> {
    fn new(item: T) -> Self {
        Self {
            item,
            chained: false,
            dependents: Vec::new(),
        }
    }
}

/// What happened to an item handed to the internal add path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The item was new; it is stored and queued for chaining.
    Inserted(ItemId),
    /// An equal item was already stored; its support was updated.
    Merged(ItemId),
}

impl Admission {
    /// Handle of the stored item.
    pub fn id(&self) -> ItemId {
        match self {
            Admission::Inserted(id) | Admission::Merged(id) => *id,
        }
    }
}

/// Outcome of [`KnowledgeBase::assert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assertion {
    /// The item was new. `derived` counts the new facts and rules forward
    /// chaining produced from it.
    Inserted {
        /// Handle of the stored item.
        id: ItemId,
        /// Number of items derived while chaining it.
        derived: usize,
    },
    /// The item was already known and is now marked asserted. No chaining
    /// happens for a merge.
    Merged {
        /// Handle of the existing item.
        id: ItemId,
    },
}

impl Assertion {
    /// Handle of the stored item.
    pub fn id(&self) -> ItemId {
        match self {
            Assertion::Inserted { id, .. } | Assertion::Merged { id } => *id,
        }
    }
}

/// Facts, rules, and the justifications connecting them.
///
/// ```
/// use dialog_tms::{Fact, KnowledgeBase, Rule, Statement};
///
/// let mut kb = KnowledgeBase::new();
/// kb.assert(Rule::new(
///     vec![Statement::new("isa", ["?x", "cube"])],
///     Statement::new("isa", ["?x", "block"]),
/// ));
/// kb.assert(Fact::new(Statement::new("isa", ["c1", "cube"])));
///
/// let answers = kb.ask(Statement::new("isa", ["?what", "block"]));
/// assert_eq!(answers.to_string(), "?what : c1");
/// ```
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    facts: Vec<Option<Entry<Fact>>>,
    rules: Vec<Option<Entry<Rule>>>,
    fact_index: IndexMap<Statement, FactId>,
    rule_index: IndexMap<(Vec<Statement>, Statement), RuleId>,
    agenda: VecDeque<ItemId>,
    engine: InferenceEngine,
    tracer: Tracer,
    config: Config,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

impl KnowledgeBase {
    /// An empty knowledge base with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty knowledge base reporting at `config.verbosity`.
    pub fn with_config(config: Config) -> Self {
        let tracer = Tracer::from(&config);
        Self {
            facts: Vec::new(),
            rules: Vec::new(),
            fact_index: IndexMap::new(),
            rule_index: IndexMap::new(),
            agenda: VecDeque::new(),
            engine: InferenceEngine::new(tracer),
            tracer,
            config,
        }
    }

    /// The configuration this knowledge base was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    // --- Lookup ---

    /// The fact behind `id`, if it is still stored.
    pub fn fact(&self, id: FactId) -> Option<&Fact> {
        self.facts.get(id.0)?.as_ref().map(|entry| &entry.item)
    }

    /// The rule behind `id`, if it is still stored.
    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id.0)?.as_ref().map(|entry| &entry.item)
    }

    /// Handle of the fact stating `statement`.
    pub fn fact_id(&self, statement: &Statement) -> Option<FactId> {
        self.fact_index.get(statement).copied()
    }

    /// Handle of the rule structurally equal to `rule`.
    pub fn rule_id(&self, rule: &Rule) -> Option<RuleId> {
        self.rule_index.get(&rule.key()).copied()
    }

    /// The stored fact structurally equal to `statement`.
    pub fn get_fact(&self, statement: &Statement) -> Option<&Fact> {
        self.fact(self.fact_id(statement)?)
    }

    /// The stored rule structurally equal to `rule`.
    pub fn get_rule(&self, rule: &Rule) -> Option<&Rule> {
        self.rule(self.rule_id(rule)?)
    }

    /// Handle of the stored item structurally equal to `item`.
    pub fn lookup(&self, item: &Item) -> Option<ItemId> {
        match item {
            Item::Fact(fact) => self.fact_id(fact.statement()).map(ItemId::Fact),
            Item::Rule(rule) => self.rule_id(rule).map(ItemId::Rule),
        }
    }

    /// Whether an equal item is stored.
    pub fn contains(&self, item: &Item) -> bool {
        self.lookup(item).is_some()
    }

    /// Support record of a stored item.
    pub fn support(&self, id: ItemId) -> Option<&Support> {
        match id {
            ItemId::Fact(id) => self.fact(id).map(Fact::support),
            ItemId::Rule(id) => self.rule(id).map(Rule::support),
        }
    }

    fn support_mut(&mut self, id: ItemId) -> Option<&mut Support> {
        match id {
            ItemId::Fact(id) => self
                .facts
                .get_mut(id.0)?
                .as_mut()
                .map(|entry| entry.item.support_mut()),
            ItemId::Rule(id) => self
                .rules
                .get_mut(id.0)?
                .as_mut()
                .map(|entry| entry.item.support_mut()),
        }
    }

    /// Items that name `id` in one of their justifications.
    pub fn dependents(&self, id: ItemId) -> &[ItemId] {
        let entry = match id {
            ItemId::Fact(id) => self.facts.get(id.0).and_then(|slot| slot.as_ref()).map(|e| &e.dependents),
            ItemId::Rule(id) => self.rules.get(id.0).and_then(|slot| slot.as_ref()).map(|e| &e.dependents),
        };
        entry.map(Vec::as_slice).unwrap_or(&[])
    }

    fn dependents_mut(&mut self, id: ItemId) -> Option<&mut Vec<ItemId>> {
        match id {
            ItemId::Fact(id) => self.facts.get_mut(id.0)?.as_mut().map(|e| &mut e.dependents),
            ItemId::Rule(id) => self.rules.get_mut(id.0)?.as_mut().map(|e| &mut e.dependents),
        }
    }

    fn is_chained(&self, id: ItemId) -> bool {
        match id {
            ItemId::Fact(id) => self.facts.get(id.0).and_then(|s| s.as_ref()).is_some_and(|e| e.chained),
            ItemId::Rule(id) => self.rules.get(id.0).and_then(|s| s.as_ref()).is_some_and(|e| e.chained),
        }
    }

    fn mark_chained(&mut self, id: ItemId) {
        match id {
            ItemId::Fact(id) => {
                if let Some(Some(entry)) = self.facts.get_mut(id.0) {
                    entry.chained = true;
                }
            }
            ItemId::Rule(id) => {
                if let Some(Some(entry)) = self.rules.get_mut(id.0) {
                    entry.chained = true;
                }
            }
        }
    }

    /// Stored facts in insertion order.
    pub fn facts(&self) -> impl Iterator<Item = &Fact> {
        self.fact_index.values().filter_map(|id| self.fact(*id))
    }

    /// Stored rules in insertion order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rule_index.values().filter_map(|id| self.rule(*id))
    }

    /// Number of stored facts.
    pub fn fact_count(&self) -> usize {
        self.fact_index.len()
    }

    /// Number of stored rules.
    pub fn rule_count(&self) -> usize {
        self.rule_index.len()
    }

    // --- Assertion ---

    /// Assert a fact or rule on behalf of a caller.
    ///
    /// A new item is stored and forward chaining runs to a fixed point before
    /// this returns. An item equal to one already stored is not duplicated:
    /// the stored item is marked asserted and nothing is re-derived.
    pub fn assert(&mut self, item: impl Into<Item>) -> Assertion {
        let item = item.into();
        self.tracer.asserting(&item);

        match self.add(item) {
            Admission::Merged(id) => Assertion::Merged { id },
            Admission::Inserted(id) => {
                let derived = self.chain();
                Assertion::Inserted { id, derived }
            }
        }
    }

    /// Store `item` or merge it into its stored equal.
    ///
    /// This is the path derived items take. A merge records the incoming
    /// justifications on the stored item (skipping exact duplicates) and, if
    /// the incoming item is asserted, marks the stored one asserted. A new
    /// item is queued on the agenda; it is paired with the opposite
    /// collection the next time the agenda is drained.
    pub(crate) fn add(&mut self, item: Item) -> Admission {
        self.tracer.adding(&item);

        if let Some(id) = self.lookup(&item) {
            self.tracer.merging(&item);
            self.merge(id, item.support());
            return Admission::Merged(id);
        }

        let id = self.insert(item);
        self.agenda.push_back(id);
        Admission::Inserted(id)
    }

    fn merge(&mut self, id: ItemId, incoming: &Support) {
        let mut added = Vec::new();
        if let Some(support) = self.support_mut(id) {
            if incoming.is_asserted() {
                support.set_asserted(true);
            }
            for justification in incoming.supported_by() {
                if support.add(*justification) {
                    added.push(*justification);
                }
            }
        }
        for justification in added {
            self.link(justification, id);
        }
    }

    fn insert(&mut self, item: Item) -> ItemId {
        let justifications = item.support().supported_by().to_vec();

        let id = match item {
            Item::Fact(fact) => {
                let id = FactId(self.facts.len());
                self.fact_index.insert(fact.statement().clone(), id);
                self.facts.push(Some(Entry::new(fact)));
                ItemId::Fact(id)
            }
            Item::Rule(rule) => {
                let id = RuleId(self.rules.len());
                self.rule_index.insert(rule.key(), id);
                self.rules.push(Some(Entry::new(rule)));
                ItemId::Rule(id)
            }
        };

        for justification in justifications {
            self.link(justification, id);
        }
        id
    }

    /// Record `dependent` on both halves of `justification`.
    fn link(&mut self, justification: Justification, dependent: ItemId) {
        for source in [ItemId::Fact(justification.fact), ItemId::Rule(justification.rule)] {
            if let Some(dependents) = self.dependents_mut(source)
                && !dependents.contains(&dependent)
            {
                dependents.push(dependent);
            }
        }
    }

    /// Drain the agenda, pairing each item with every already-chained item of
    /// the opposite kind. Returns the number of items inserted along the way.
    fn chain(&mut self) -> usize {
        let engine = self.engine;
        let mut derived = 0;

        while let Some(id) = self.agenda.pop_front() {
            match id {
                ItemId::Fact(fact) => {
                    let rules: Vec<RuleId> = self
                        .rule_index
                        .values()
                        .copied()
                        .filter(|rule| self.is_chained(ItemId::Rule(*rule)))
                        .collect();
                    for rule in rules {
                        if let Some(Admission::Inserted(_)) = engine.fc_infer(fact, rule, self) {
                            derived += 1;
                        }
                    }
                }
                ItemId::Rule(rule) => {
                    let facts: Vec<FactId> = self
                        .fact_index
                        .values()
                        .copied()
                        .filter(|fact| self.is_chained(ItemId::Fact(*fact)))
                        .collect();
                    for fact in facts {
                        if let Some(Admission::Inserted(_)) = engine.fc_infer(fact, rule, self) {
                            derived += 1;
                        }
                    }
                }
            }
            self.mark_chained(id);
        }

        derived
    }

    // --- Queries ---

    /// Match `query` against every stored fact.
    ///
    /// Answers come back in fact insertion order. A rule is not a valid
    /// query and yields [`TmsError::InvalidQuery`].
    pub fn try_ask(&self, query: impl Into<Item>) -> TmsResult<ListOfBindings> {
        let statement = match query.into() {
            Item::Fact(fact) => fact.statement().clone(),
            rule @ Item::Rule(_) => {
                return Err(TmsError::InvalidQuery {
                    query: rule.to_string(),
                });
            }
        };
        self.tracer.asking(&statement);

        let mut answers = ListOfBindings::new();
        for fact in self.facts() {
            if let Some(bindings) = matches(&statement, fact.statement()) {
                answers.add_bindings(bindings, vec![fact.statement().clone()]);
            }
        }
        Ok(answers)
    }

    /// Like [`KnowledgeBase::try_ask`], but an invalid query is reported
    /// through tracing and answered with an empty list.
    pub fn ask(&self, query: impl Into<Item>) -> ListOfBindings {
        self.try_ask(query).unwrap_or_else(|error| {
            self.tracer.rejected(&error);
            ListOfBindings::new()
        })
    }

    /// Remove a stored item, returning it. Used by retraction.
    fn remove(&mut self, id: ItemId) -> Option<Item> {
        match id {
            ItemId::Fact(id) => {
                let entry = self.facts.get_mut(id.0)?.take()?;
                self.fact_index.shift_remove(entry.item.statement());
                Some(Item::Fact(entry.item))
            }
            ItemId::Rule(id) => {
                let entry = self.rules.get_mut(id.0)?.take()?;
                self.rule_index.shift_remove(&entry.item.key());
                Some(Item::Rule(entry.item))
            }
        }
    }

    fn exists(&self, id: ItemId) -> bool {
        self.support(id).is_some()
    }
}

impl fmt::Display for KnowledgeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Knowledge Base:")?;
        for fact in self.facts() {
            writeln!(f, "fact: {fact}")?;
        }
        for rule in self.rules() {
            writeln!(f, "rule: {rule}")?;
        }
        Ok(())
    }
}
