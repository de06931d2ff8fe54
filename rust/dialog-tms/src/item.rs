//! Facts, rules and their justifications.
//!
//! Both kinds of knowledge base item carry the same [`Support`] record: whether
//! a caller asserted the item, and the list of [`Justification`]s that derive
//! it. Justifications refer to other items by handle ([`FactId`], [`RuleId`])
//! rather than by value, so the support graph shares nodes instead of copying
//! statements.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::term::Statement;

/// Stable handle of a fact stored in a [`crate::KnowledgeBase`].
///
/// Handles are never reused, so a handle to a retracted fact simply resolves
/// to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FactId(pub(crate) usize);

/// Stable handle of a rule stored in a [`crate::KnowledgeBase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RuleId(pub(crate) usize);

/// Handle of either kind of item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemId {
    /// A fact handle.
    Fact(FactId),
    /// A rule handle.
    Rule(RuleId),
}

impl From<FactId> for ItemId {
    fn from(id: FactId) -> Self {
        ItemId::Fact(id)
    }
}

impl From<RuleId> for ItemId {
    fn from(id: RuleId) -> Self {
        ItemId::Rule(id)
    }
}

/// One reason an item holds: `fact` matched the first antecedent of `rule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Justification {
    /// The fact that matched.
    pub fact: FactId,
    /// The rule whose first antecedent it matched.
    pub rule: RuleId,
}

impl Justification {
    /// Pair a fact with a rule.
    pub fn new(fact: FactId, rule: RuleId) -> Self {
        Self { fact, rule }
    }

    /// Returns `true` if this justification depends on `item`.
    pub fn mentions(&self, item: ItemId) -> bool {
        match item {
            ItemId::Fact(fact) => self.fact == fact,
            ItemId::Rule(rule) => self.rule == rule,
        }
    }
}

/// Why an item is in the knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Support {
    asserted: bool,
    supported_by: Vec<Justification>,
}

impl Support {
    /// Support of an item given directly by a caller.
    pub fn asserted() -> Self {
        Self {
            asserted: true,
            supported_by: Vec::new(),
        }
    }

    /// Support of an item produced by the inference engine.
    pub fn derived(justification: Justification) -> Self {
        Self {
            asserted: false,
            supported_by: vec![justification],
        }
    }

    /// Whether a caller asserted this item.
    pub fn is_asserted(&self) -> bool {
        self.asserted
    }

    /// Justifications deriving this item, oldest first.
    pub fn supported_by(&self) -> &[Justification] {
        &self.supported_by
    }

    /// Whether any justification is recorded.
    pub fn is_supported(&self) -> bool {
        !self.supported_by.is_empty()
    }

    pub(crate) fn set_asserted(&mut self, asserted: bool) {
        self.asserted = asserted;
    }

    /// Append a justification unless an identical one is already recorded.
    /// Returns `true` if it was added.
    pub(crate) fn add(&mut self, justification: Justification) -> bool {
        if self.supported_by.contains(&justification) {
            false
        } else {
            self.supported_by.push(justification);
            true
        }
    }

    /// Drop every justification for which `dead` returns `true`.
    pub(crate) fn remove_where<F>(&mut self, mut dead: F)
    where
        F: FnMut(&Justification) -> bool,
    {
        self.supported_by.retain(|justification| !dead(justification));
    }
}

/// A statement held in the knowledge base.
///
/// Two facts are equal when their statements are structurally equal; support
/// is bookkeeping and does not take part in equality.
#[derive(Debug, Clone, Serialize)]
pub struct Fact {
    statement: Statement,
    support: Support,
}

impl Fact {
    /// A fact as asserted by a caller.
    pub fn new(statement: Statement) -> Self {
        Self {
            statement,
            support: Support::asserted(),
        }
    }

    pub(crate) fn derived(statement: Statement, justification: Justification) -> Self {
        Self {
            statement,
            support: Support::derived(justification),
        }
    }

    /// The stated relation.
    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    /// Why this item is stored.
    pub fn support(&self) -> &Support {
        &self.support
    }

    pub(crate) fn support_mut(&mut self) -> &mut Support {
        &mut self.support
    }

    /// Whether a caller asserted this item.
    pub fn is_asserted(&self) -> bool {
        self.support.is_asserted()
    }

    /// Justifications deriving this item, oldest first.
    pub fn supported_by(&self) -> &[Justification] {
        self.support.supported_by()
    }
}

impl PartialEq for Fact {
    fn eq(&self, other: &Self) -> bool {
        self.statement == other.statement
    }
}

impl Eq for Fact {}

impl From<Statement> for Fact {
    fn from(statement: Statement) -> Self {
        Fact::new(statement)
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.statement)
    }
}

/// An implication: when every statement in `lhs` holds, `rhs` holds.
///
/// Antecedent order matters. Forward chaining only ever matches the first
/// antecedent; a successful match yields either a fact (if it was the last
/// antecedent) or a shorter rule over the remaining ones.
#[derive(Debug, Clone, Serialize)]
pub struct Rule {
    lhs: Vec<Statement>,
    rhs: Statement,
    support: Support,
}

impl Rule {
    /// A rule as asserted by a caller.
    pub fn new(lhs: Vec<Statement>, rhs: Statement) -> Self {
        Self {
            lhs,
            rhs,
            support: Support::asserted(),
        }
    }

    pub(crate) fn derived(lhs: Vec<Statement>, rhs: Statement, justification: Justification) -> Self {
        Self {
            lhs,
            rhs,
            support: Support::derived(justification),
        }
    }

    /// Antecedents, matched first to last.
    pub fn lhs(&self) -> &[Statement] {
        &self.lhs
    }

    /// Consequent.
    pub fn rhs(&self) -> &Statement {
        &self.rhs
    }

    /// Why this item is stored.
    pub fn support(&self) -> &Support {
        &self.support
    }

    pub(crate) fn support_mut(&mut self) -> &mut Support {
        &mut self.support
    }

    /// Whether a caller asserted this item.
    pub fn is_asserted(&self) -> bool {
        self.support.is_asserted()
    }

    /// Justifications deriving this item, oldest first.
    pub fn supported_by(&self) -> &[Justification] {
        self.support.supported_by()
    }

    /// Key used to find structurally equal rules.
    pub(crate) fn key(&self) -> (Vec<Statement>, Statement) {
        (self.lhs.clone(), self.rhs.clone())
    }

    /// The `((a ?x), (b ?x)) -> (c ?x)` form used in explanations.
    pub fn display_antecedents(&self) -> String {
        let lhs = self
            .lhs
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!("({lhs}) -> {}", self.rhs)
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.lhs == other.lhs && self.rhs == other.rhs
    }
}

impl Eq for Rule {}

/// Source form: `((a ?x) (b ?x)) -> (c ?x)`.
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, statement) in self.lhs.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{statement}")?;
        }
        write!(f, ") -> {}", self.rhs)
    }
}

/// Either kind of knowledge base item.
///
/// Operations that accept "a fact or a rule" take an `Item`; the shared
/// [`Support`] record lets merge, retraction and explanation treat both kinds
/// uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Item {
    /// A fact.
    Fact(Fact),
    /// A rule.
    Rule(Rule),
}

impl Item {
    /// Whether this is a fact.
    pub fn is_fact(&self) -> bool {
        matches!(self, Item::Fact(_))
    }

    /// Whether this is a rule.
    pub fn is_rule(&self) -> bool {
        matches!(self, Item::Rule(_))
    }

    /// Why this item is stored.
    pub fn support(&self) -> &Support {
        match self {
            Item::Fact(fact) => fact.support(),
            Item::Rule(rule) => rule.support(),
        }
    }

    /// `"Fact"` or `"Rule"`, as used in messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Item::Fact(_) => "Fact",
            Item::Rule(_) => "Rule",
        }
    }

    /// The item as written in a script, without its `fact:`/`rule:` keyword.
    pub fn source(&self) -> String {
        match self {
            Item::Fact(fact) => fact.to_string(),
            Item::Rule(rule) => rule.to_string(),
        }
    }
}

impl From<Fact> for Item {
    fn from(fact: Fact) -> Self {
        Item::Fact(fact)
    }
}

impl From<Rule> for Item {
    fn from(rule: Rule) -> Self {
        Item::Rule(rule)
    }
}

impl From<Statement> for Item {
    fn from(statement: Statement) -> Self {
        Item::Fact(Fact::new(statement))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Fact(fact) => write!(f, "fact: {fact}"),
            Item::Rule(rule) => write!(f, "rule: {rule}"),
        }
    }
}
