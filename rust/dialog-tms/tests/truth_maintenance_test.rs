//! Knowledge base behaviour across assertion, chaining, retraction and
//! explanation.

use dialog_tms::{
    Assertion, Config, Fact, KnowledgeBase, Retraction, Rule, Statement, Term, TmsError,
    Verbosity,
};
use pretty_assertions::assert_eq;
use testresult::TestResult;

fn statement(text: &str) -> Statement {
    let mut words = text.split_whitespace();
    let predicate = words.next().unwrap_or_default();
    Statement::new(predicate, words)
}

fn fact(text: &str) -> Fact {
    Fact::new(statement(text))
}

fn rule(lhs: &[&str], rhs: &str) -> Rule {
    Rule::new(lhs.iter().map(|text| statement(text)).collect(), statement(rhs))
}

fn fact_set(kb: &KnowledgeBase) -> Vec<String> {
    let mut facts: Vec<String> = kb.facts().map(|fact| fact.to_string()).collect();
    facts.sort();
    facts
}

/// A small blocks world: transitive `isa`, `covered` and `buried`.
fn blocks_world() -> KnowledgeBase {
    let mut kb = KnowledgeBase::with_config(Config::new(Verbosity::Debug));
    kb.assert(rule(&["isa ?x ?y", "isa ?y ?z"], "isa ?x ?z"));
    kb.assert(rule(&["on ?x ?y"], "covered ?y"));
    kb.assert(rule(&["isa ?x block", "covered ?x"], "buried ?x"));
    kb.assert(fact("isa cube block"));
    kb.assert(fact("isa cube1 cube"));
    kb.assert(fact("on cube1 table"));
    kb.assert(fact("on pyramid1 cube1"));
    kb
}

#[test_log::test]
fn it_asserts_the_same_fact_once() {
    let mut kb = KnowledgeBase::new();
    kb.assert(fact("color bigbox red"));
    let second = kb.assert(fact("color bigbox red"));

    assert!(matches!(second, Assertion::Merged { .. }));
    assert_eq!(kb.fact_count(), 1);
    assert_eq!(kb.ask(statement("color bigbox ?c")).len(), 1);
}

#[test_log::test]
fn it_chains_two_antecedents_to_a_fixed_point() -> TestResult {
    let mut kb = KnowledgeBase::new();
    kb.assert(rule(&["a ?x", "b ?x"], "c ?x"));
    kb.assert(fact("a one"));
    kb.assert(fact("b one"));

    let c = kb.get_fact(&statement("c one")).ok_or("c was not derived")?;
    assert!(!c.is_asserted());
    assert!(!c.supported_by().is_empty());

    let answers = kb.ask(statement("c ?x"));
    assert_eq!(answers.len(), 1);
    assert_eq!(
        answers.get(0).and_then(|answer| answer.bindings.get("x")),
        Some(&Term::constant("one"))
    );
    Ok(())
}

#[test_log::test]
fn it_derives_the_same_facts_in_either_order() {
    let mut forward = KnowledgeBase::new();
    forward.assert(rule(&["a ?x", "b ?x"], "c ?x"));
    forward.assert(fact("a one"));
    forward.assert(fact("b one"));

    let mut backward = KnowledgeBase::new();
    backward.assert(fact("b one"));
    backward.assert(fact("a one"));
    backward.assert(rule(&["a ?x", "b ?x"], "c ?x"));

    assert_eq!(fact_set(&forward), fact_set(&backward));
}

#[test_log::test]
fn it_cascades_retraction_to_dependents() -> TestResult {
    let mut kb = KnowledgeBase::new();
    kb.assert(rule(&["a ?x"], "b ?x"));
    kb.assert(fact("a one"));
    assert!(kb.get_fact(&statement("b one")).is_some());

    let retraction = kb.retract(&statement("a one"))?;
    assert_eq!(retraction, Retraction::Removed { facts: 2, rules: 0 });
    assert!(kb.get_fact(&statement("a one")).is_none());
    assert!(kb.get_fact(&statement("b one")).is_none());
    Ok(())
}

#[test_log::test]
fn it_keeps_independently_asserted_conclusions() -> TestResult {
    let mut kb = KnowledgeBase::new();
    kb.assert(rule(&["a ?x"], "b ?x"));
    kb.assert(fact("a one"));
    kb.assert(fact("b one"));

    kb.retract(&statement("a one"))?;

    let b = kb.get_fact(&statement("b one")).ok_or("b should survive")?;
    assert!(b.is_asserted());
    assert!(b.supported_by().is_empty());
    assert_eq!(kb.explain(statement("b one"))?, "fact: (b one) ASSERTED\n");
    Ok(())
}

#[test_log::test]
fn it_keeps_facts_with_a_surviving_justification() -> TestResult {
    let mut kb = KnowledgeBase::new();
    kb.assert(rule(&["a ?x"], "c ?x"));
    kb.assert(rule(&["b ?x"], "c ?x"));
    kb.assert(fact("a one"));
    kb.assert(fact("b one"));
    assert_eq!(
        kb.get_fact(&statement("c one")).map(|c| c.supported_by().len()),
        Some(2)
    );

    kb.retract(&statement("a one"))?;

    let c = kb.get_fact(&statement("c one")).ok_or("c should survive")?;
    assert_eq!(c.supported_by().len(), 1);

    kb.retract(&statement("b one"))?;
    assert!(kb.get_fact(&statement("c one")).is_none());
    Ok(())
}

#[test_log::test]
fn it_explains_asserted_and_derived_facts() -> TestResult {
    let mut kb = KnowledgeBase::new();
    kb.assert(rule(&["a ?x"], "b ?x"));
    kb.assert(fact("a one"));

    let asserted = kb.explain(statement("a one"))?;
    assert!(asserted.contains("ASSERTED"));
    assert!(!asserted.contains("SUPPORTED BY"));

    let derived = kb.explain(statement("b one"))?;
    assert!(derived.contains("SUPPORTED BY"));
    assert!(derived.contains("fact: (a one) ASSERTED"));
    assert!(derived.contains("rule: ((a ?x)) -> (b ?x) ASSERTED"));
    Ok(())
}

#[test_log::test]
fn it_answers_unknown_predicates_with_nothing() {
    let kb = blocks_world();
    assert!(kb.ask(statement("flies ?x")).is_empty());
}

#[test_log::test]
fn it_reports_missing_and_derived_retractions_without_change() {
    let mut kb = blocks_world();
    let before = kb.to_string();

    assert!(matches!(
        kb.retract(&statement("isa pyramid1 block")),
        Err(TmsError::NotFound { .. })
    ));
    assert!(matches!(
        kb.retract(&statement("covered table")),
        Err(TmsError::NotAsserted { .. })
    ));
    assert_eq!(kb.to_string(), before);
}

#[test_log::test]
fn it_runs_the_blocks_world() -> TestResult {
    let mut kb = blocks_world();

    let answers = kb.ask(statement("isa cube1 ?what"));
    let kinds: Vec<String> = answers
        .iter()
        .filter_map(|answer| answer.bindings.get("what").map(ToString::to_string))
        .collect();
    assert_eq!(kinds, vec!["cube", "block"]);

    assert_eq!(kb.ask(statement("buried cube1")).len(), 1);

    kb.retract(&statement("on pyramid1 cube1"))?;
    assert!(kb.ask(statement("covered cube1")).is_empty());
    assert!(kb.ask(statement("buried cube1")).is_empty());
    assert_eq!(kb.ask(statement("covered table")).len(), 1);

    kb.retract(&statement("isa cube block"))?;
    assert_eq!(kb.ask(statement("isa cube1 ?what")).to_string(), "?what : cube");
    Ok(())
}

#[test_log::test]
fn it_ignores_rules_without_antecedents() {
    let mut kb = KnowledgeBase::new();
    kb.assert(Rule::new(vec![], statement("c one")));
    let outcome = kb.assert(fact("a one"));

    assert!(matches!(outcome, Assertion::Inserted { derived: 0, .. }));
    assert_eq!(kb.fact_count(), 1);
}

#[test_log::test]
fn it_rejects_rules_as_queries() {
    let kb = blocks_world();
    let query = rule(&["on ?x ?y"], "covered ?y");
    assert!(matches!(kb.try_ask(query), Err(TmsError::InvalidQuery { .. })));
}
