//! Rendering of justification traces.

use super::KnowledgeBase;
use crate::error::{TmsError, TmsResult};
use crate::item::{Item, ItemId};

const INDENT: &str = "  ";
const ASSERTED: &str = " ASSERTED";
const CYCLE: &str = " (cycle)";

impl KnowledgeBase {
    /// Explain why a fact or rule is in the knowledge base.
    ///
    /// The first line names the item. Each of its justifications follows as
    /// a `SUPPORTED BY` block holding the justifying fact and rule, each
    /// explained the same way one level deeper. Items a caller asserted end in
    /// `ASSERTED`. The support graph can share items, so an item reachable
    /// along several paths is printed once per path. Justifications can also
    /// loop back (two rules deriving each other's antecedent, or a rule
    /// rederiving its own). An item met again on the path that leads to it is
    /// printed with a trailing `(cycle)` and not expanded.
    ///
    /// ```
    /// use dialog_tms::{Fact, KnowledgeBase, Rule, Statement};
    ///
    /// let mut kb = KnowledgeBase::new();
    /// kb.assert(Rule::new(vec![Statement::new("a", ["?x"])], Statement::new("b", ["?x"])));
    /// kb.assert(Fact::new(Statement::new("a", ["one"])));
    ///
    /// let explanation = kb.explain(Statement::new("b", ["one"])).unwrap();
    /// assert_eq!(
    ///     explanation,
    ///     "fact: (b one)\n  SUPPORTED BY\n    fact: (a one) ASSERTED\n    rule: ((a ?x)) -> (b ?x) ASSERTED\n"
    /// );
    /// ```
    pub fn explain(&self, item: impl Into<Item>) -> TmsResult<String> {
        let item = item.into();
        let id = self.lookup(&item).ok_or_else(|| TmsError::NotFound {
            kind: item.kind(),
            item: item.source(),
        })?;

        let mut out = String::new();
        self.describe(id, 0, &mut Vec::new(), &mut out);
        Ok(out)
    }

    /// Append `id` and its support tree to `out`. `path` holds the items
    /// being expanded above this one.
    fn describe(&self, id: ItemId, depth: usize, path: &mut Vec<ItemId>, out: &mut String) {
        let indent = INDENT.repeat(depth);
        let line = match id {
            ItemId::Fact(id) => self.fact(id).map(|fact| {
                let marker = if fact.is_asserted() { ASSERTED } else { "" };
                format!("{indent}fact: {}{marker}\n", fact.statement())
            }),
            ItemId::Rule(id) => self.rule(id).map(|rule| {
                let marker = if rule.is_asserted() { ASSERTED } else { "" };
                format!("{indent}rule: {}{marker}\n", rule.display_antecedents())
            }),
        };
        let (Some(line), Some(support)) = (line, self.support(id)) else {
            return;
        };
        if path.contains(&id) {
            out.push_str(line.trim_end());
            out.push_str(CYCLE);
            out.push('\n');
            return;
        }
        out.push_str(&line);

        path.push(id);
        let header = INDENT.repeat(depth + 1);
        for justification in support.supported_by() {
            out.push_str(&format!("{header}SUPPORTED BY\n"));
            self.describe(ItemId::Fact(justification.fact), depth + 2, path, out);
            self.describe(ItemId::Rule(justification.rule), depth + 2, path, out);
        }
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Fact, Rule};
    use crate::term::Statement;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_explain_asserted_fact() {
        let mut kb = KnowledgeBase::new();
        kb.assert(Fact::new(Statement::new("a", ["one"])));

        let explanation = kb.explain(Statement::new("a", ["one"])).unwrap();
        assert_eq!(explanation, "fact: (a one) ASSERTED\n");
        assert!(!explanation.contains("SUPPORTED BY"));
    }

    #[test]
    fn test_explain_nests_derived_rules() {
        let mut kb = KnowledgeBase::new();
        kb.assert(Rule::new(
            vec![Statement::new("a", ["?y"]), Statement::new("b", ["?y"])],
            Statement::new("c", ["?y"]),
        ));
        kb.assert(Fact::new(Statement::new("a", ["x"])));
        kb.assert(Fact::new(Statement::new("b", ["x"])));

        let explanation = kb.explain(Statement::new("c", ["x"])).unwrap();
        assert_eq!(
            explanation,
            "\
fact: (c x)
  SUPPORTED BY
    fact: (b x) ASSERTED
    rule: ((b x)) -> (c x)
      SUPPORTED BY
        fact: (a x) ASSERTED
        rule: ((a ?y), (b ?y)) -> (c ?y) ASSERTED
"
        );
    }

    #[test]
    fn test_explain_rule() {
        let mut kb = KnowledgeBase::new();
        let rule = Rule::new(vec![Statement::new("a", ["?y"])], Statement::new("c", ["?y"]));
        kb.assert(rule.clone());

        assert_eq!(
            kb.explain(rule).unwrap(),
            "rule: ((a ?y)) -> (c ?y) ASSERTED\n"
        );
    }

    #[test]
    fn test_explain_missing_item() {
        let kb = KnowledgeBase::new();
        let error = kb.explain(Statement::new("a", ["one"])).unwrap_err();
        assert_eq!(error.to_string(), "Fact is not in the KB: (a one)");

        let rule = Rule::new(vec![Statement::new("a", ["?y"])], Statement::new("c", ["?y"]));
        let error = kb.explain(rule).unwrap_err();
        assert_eq!(error.to_string(), "Rule is not in the KB: ((a ?y)) -> (c ?y)");
    }

    #[test]
    fn test_explain_lists_every_justification() {
        let mut kb = KnowledgeBase::new();
        kb.assert(Rule::new(vec![Statement::new("a", ["?x"])], Statement::new("c", ["?x"])));
        kb.assert(Rule::new(vec![Statement::new("b", ["?x"])], Statement::new("c", ["?x"])));
        kb.assert(Fact::new(Statement::new("a", ["one"])));
        kb.assert(Fact::new(Statement::new("b", ["one"])));

        let explanation = kb.explain(Statement::new("c", ["one"])).unwrap();
        assert_eq!(explanation.matches("SUPPORTED BY").count(), 2);
        assert!(explanation.contains("fact: (a one) ASSERTED"));
        assert!(explanation.contains("fact: (b one) ASSERTED"));
    }

    #[test]
    fn test_explain_stops_at_mutual_support() {
        let mut kb = KnowledgeBase::new();
        kb.assert(Rule::new(vec![Statement::new("a", ["?x"])], Statement::new("b", ["?x"])));
        kb.assert(Rule::new(vec![Statement::new("b", ["?x"])], Statement::new("a", ["?x"])));
        kb.assert(Fact::new(Statement::new("a", ["x"])));

        assert_eq!(
            kb.explain(Statement::new("a", ["x"])).unwrap(),
            "\
fact: (a x) ASSERTED
  SUPPORTED BY
    fact: (b x)
      SUPPORTED BY
        fact: (a x) ASSERTED (cycle)
        rule: ((a ?x)) -> (b ?x) ASSERTED
    rule: ((b ?x)) -> (a ?x) ASSERTED
"
        );
        assert_eq!(
            kb.explain(Statement::new("b", ["x"])).unwrap(),
            "\
fact: (b x)
  SUPPORTED BY
    fact: (a x) ASSERTED
      SUPPORTED BY
        fact: (b x) (cycle)
        rule: ((b ?x)) -> (a ?x) ASSERTED
    rule: ((a ?x)) -> (b ?x) ASSERTED
"
        );
    }

    #[test]
    fn test_explain_stops_at_self_derivation() {
        let mut kb = KnowledgeBase::new();
        kb.assert(Rule::new(vec![Statement::new("a", ["?x"])], Statement::new("a", ["?x"])));
        kb.assert(Fact::new(Statement::new("a", ["x"])));

        assert_eq!(
            kb.explain(Statement::new("a", ["x"])).unwrap(),
            "\
fact: (a x) ASSERTED
  SUPPORTED BY
    fact: (a x) ASSERTED (cycle)
    rule: ((a ?x)) -> (a ?x) ASSERTED
"
        );
    }
}
