//! Retraction and the support cascade.
//!
//! Retracting a fact clears its asserted flag and then re-examines everything
//! that depends on it, directly or transitively. Within that affected region
//! an item survives only if it is asserted or has a justification whose fact
//! and rule both survive; items outside the region keep whatever status they
//! had. Computing survivors as a least fixed point means a group of items that
//! only justify each other (as `a -> b` and `b -> a` can produce) does not
//! keep itself alive once the assertion grounding it is gone.

use std::collections::HashSet;

use indexmap::IndexSet;

use super::KnowledgeBase;
use crate::error::{TmsError, TmsResult};
use crate::item::ItemId;
use crate::term::Statement;

/// Outcome of [`KnowledgeBase::retract`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retraction {
    /// The fact is no longer asserted but is still justified by a derivation,
    /// so it stays.
    Unasserted,
    /// The fact was removed. The counts include the fact itself and every
    /// dependent that lost all support with it.
    Removed {
        /// Facts removed, the retracted one included.
        facts: usize,
        /// Derived rules removed.
        rules: usize,
    },
}

impl KnowledgeBase {
    /// Retract a fact previously asserted by a caller.
    ///
    /// Fails with [`TmsError::NotFound`] if no equal fact is stored and with
    /// [`TmsError::NotAsserted`] if the stored fact was only ever derived. In
    /// both cases nothing changes.
    pub fn retract(&mut self, statement: &Statement) -> TmsResult<Retraction> {
        self.tracer.retracting(statement);

        let result = self.retract_fact(statement);
        if let Err(error) = &result {
            self.tracer.rejected(error);
        }
        result
    }

    fn retract_fact(&mut self, statement: &Statement) -> TmsResult<Retraction> {
        let id = self.fact_id(statement).ok_or_else(|| TmsError::NotFound {
            kind: "Fact",
            item: statement.to_string(),
        })?;

        let asserted = self.fact(id).is_some_and(|fact| fact.is_asserted());
        if !asserted {
            return Err(TmsError::NotAsserted {
                statement: statement.to_string(),
            });
        }

        if let Some(support) = self.support_mut(ItemId::Fact(id)) {
            support.set_asserted(false);
        }

        let affected = self.affected_by(ItemId::Fact(id));
        let grounded = self.grounded_within(&affected);
        let doomed: Vec<ItemId> = affected
            .iter()
            .copied()
            .filter(|item| !grounded.contains(item))
            .collect();

        let (facts, rules) = self.remove_all(&doomed);
        for &survivor in affected.iter().filter(|item| grounded.contains(*item)) {
            if let Some(support) = self.support_mut(survivor) {
                support.remove_where(|justification| {
                    doomed.iter().any(|dead| justification.mentions(*dead))
                });
            }
        }

        if grounded.contains(&ItemId::Fact(id)) {
            self.tracer.unasserting(statement);
            Ok(Retraction::Unasserted)
        } else {
            Ok(Retraction::Removed { facts, rules })
        }
    }

    /// `root` and every item that transitively depends on it, breadth first.
    fn affected_by(&self, root: ItemId) -> IndexSet<ItemId> {
        let mut affected = IndexSet::new();
        affected.insert(root);

        let mut cursor = 0;
        while let Some(&id) = affected.get_index(cursor) {
            for &dependent in self.dependents(id) {
                affected.insert(dependent);
            }
            cursor += 1;
        }
        affected
    }

    /// The items of `affected` that still have well-founded support.
    fn grounded_within(&self, affected: &IndexSet<ItemId>) -> HashSet<ItemId> {
        let mut grounded = HashSet::new();

        loop {
            let before = grounded.len();
            for &id in affected {
                if grounded.contains(&id) {
                    continue;
                }
                let Some(support) = self.support(id) else {
                    continue;
                };

                let holds = |item: ItemId| {
                    if affected.contains(&item) {
                        grounded.contains(&item)
                    } else {
                        self.exists(item)
                    }
                };
                let justified = support
                    .supported_by()
                    .iter()
                    .any(|j| holds(ItemId::Fact(j.fact)) && holds(ItemId::Rule(j.rule)));

                if support.is_asserted() || justified {
                    grounded.insert(id);
                }
            }
            if grounded.len() == before {
                return grounded;
            }
        }
    }

    /// Remove `doomed` items, unlinking them from the dependents lists of
    /// whatever justified them. Returns how many facts and rules went.
    fn remove_all(&mut self, doomed: &[ItemId]) -> (usize, usize) {
        let mut facts = 0;
        let mut rules = 0;

        for &id in doomed {
            let Some(item) = self.remove(id) else {
                continue;
            };
            self.tracer.removing(&item);

            for justification in item.support().supported_by() {
                for source in [
                    ItemId::Fact(justification.fact),
                    ItemId::Rule(justification.rule),
                ] {
                    if let Some(dependents) = self.dependents_mut(source) {
                        dependents.retain(|dependent| *dependent != id);
                    }
                }
            }

            match id {
                ItemId::Fact(_) => facts += 1,
                ItemId::Rule(_) => rules += 1,
            }
        }

        (facts, rules)
    }
}
