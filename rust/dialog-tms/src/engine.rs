//! Forward chaining over one fact and one rule.

use crate::item::{Fact, FactId, Item, Justification, Rule, RuleId};
use crate::knowledge_base::{Admission, KnowledgeBase};
use crate::term::Statement;
use crate::tracer::Tracer;
use crate::unify::matches;

/// What a fact and a rule yield when the fact matches the rule's first
/// antecedent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Derivation {
    /// The matched antecedent was the last one; the consequent now holds.
    Fact(Statement),
    /// The remaining antecedents, specialized by the match.
    Rule {
        /// Antecedents still to be matched.
        lhs: Vec<Statement>,
        /// Consequent.
        rhs: Statement,
    },
}

impl Derivation {
    /// Attach the justification that produced this derivation, turning it
    /// into a knowledge base item.
    pub fn justified_by(self, justification: Justification) -> Item {
        match self {
            Derivation::Fact(statement) => Item::Fact(Fact::derived(statement, justification)),
            Derivation::Rule { lhs, rhs } => Item::Rule(Rule::derived(lhs, rhs, justification)),
        }
    }
}

/// Combines facts with rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct InferenceEngine {
    tracer: Tracer,
}

impl InferenceEngine {
    /// An engine reporting through `tracer`.
    pub fn new(tracer: Tracer) -> Self {
        Self { tracer }
    }

    /// Try to match `fact` against the first antecedent of `rule`.
    ///
    /// This is the pure half of [`InferenceEngine::fc_infer`]: it depends on
    /// nothing but its arguments. A rule without antecedents is malformed and
    /// yields nothing.
    pub fn infer(&self, fact: &Fact, rule: &Rule) -> Option<Derivation> {
        self.tracer.inferring(fact, rule);

        let Some((first, rest)) = rule.lhs().split_first() else {
            self.tracer.malformed(rule);
            return None;
        };

        let Some(bindings) = matches(first, fact.statement()) else {
            self.tracer.no_match(first, fact.statement());
            return None;
        };

        let rhs = rule.rhs().instantiate(&bindings);
        if rest.is_empty() {
            Some(Derivation::Fact(rhs))
        } else {
            let lhs = rest
                .iter()
                .map(|statement| statement.instantiate(&bindings))
                .collect();
            Some(Derivation::Rule { lhs, rhs })
        }
    }

    /// Forward-chain the stored `fact` through the stored `rule`, submitting
    /// whatever they derive to `kb`.
    ///
    /// The derived item goes through the knowledge base's internal add path:
    /// it is either inserted (and queued for chaining) or merged as an extra
    /// justification of an equal item already present. Returns `None` when
    /// nothing was derived or either handle is stale.
    pub fn fc_infer(
        &self,
        fact: FactId,
        rule: RuleId,
        kb: &mut KnowledgeBase,
    ) -> Option<Admission> {
        let derivation = self.infer(kb.fact(fact)?, kb.rule(rule)?)?;
        let item = derivation.justified_by(Justification::new(fact, rule));
        Some(kb.add(item))
    }
}
