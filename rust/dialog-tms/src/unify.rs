//! Structural matching of statements.
//!
//! Terms are flat (a term is a symbol or a variable, never a compound), so
//! matching reduces to walking argument pairs left to right and extending a
//! single [`Bindings`]. Variables may appear on either side, which lets the
//! same routine serve forward chaining (rule pattern against a stored fact)
//! and queries (query pattern against a stored fact that may itself carry
//! variables).
//!
//! The two sides are scoped separately: `?x` in the pattern and `?x` in the
//! target are different variables. Target variables whose names clash with the
//! pattern's (or with bindings already in force) are renamed apart by priming
//! them (`?x` becomes `?x'`) before matching, and keep the primed name in the
//! result.

use crate::bindings::Bindings;
use crate::term::{Statement, Term};

/// Match `pattern` against `target`.
///
/// Returns the bindings that make the two statements equal, or `None` when no
/// such bindings exist. A successful match of two ground statements returns
/// empty bindings.
///
/// ```
/// use dialog_tms::{Statement, Term, unify::matches};
///
/// let bindings = matches(
///     &Statement::new("likes", ["?x", "?y"]),
///     &Statement::new("likes", ["tom", "jerry"]),
/// )
/// .unwrap();
///
/// assert_eq!(bindings.get("x"), Some(&Term::constant("tom")));
/// assert_eq!(bindings.get("y"), Some(&Term::constant("jerry")));
/// ```
pub fn matches(pattern: &Statement, target: &Statement) -> Option<Bindings> {
    matches_with(pattern, target, Bindings::new())
}

/// Match `pattern` against `target`, extending bindings that are already in
/// force.
pub fn matches_with(
    pattern: &Statement,
    target: &Statement,
    mut bindings: Bindings,
) -> Option<Bindings> {
    if pattern.predicate() != target.predicate() || pattern.arity() != target.arity() {
        return None;
    }

    let target = rename_apart(pattern, target, &bindings);
    for (left, right) in pattern.terms().iter().zip(&target) {
        if !unify_terms(left, right, &mut bindings) {
            return None;
        }
    }

    Some(bindings)
}

/// The target's terms with every variable that clashes with a pattern
/// variable or an existing binding replaced by a fresh primed name.
fn rename_apart(pattern: &Statement, target: &Statement, bindings: &Bindings) -> Vec<Term> {
    let pattern_names = pattern.variables();
    let target_names = target.variables();
    let clashes = |name: &str| pattern_names.contains(&name) || bindings.get(name).is_some();

    let mut renamed: Vec<(&str, String)> = Vec::new();
    for name in target_names.iter().copied().filter(|name| clashes(*name)) {
        let mut fresh = format!("{name}'");
        while clashes(&fresh)
            || target_names.contains(&fresh.as_str())
            || renamed.iter().any(|(_, taken)| *taken == fresh)
        {
            fresh.push('\'');
        }
        renamed.push((name, fresh));
    }

    target
        .terms()
        .iter()
        .map(|term| match term {
            Term::Variable { name } => renamed
                .iter()
                .find(|(original, _)| *original == name.as_str())
                .map_or_else(|| term.clone(), |(_, fresh)| Term::var(fresh.as_str())),
            Term::Constant(_) => term.clone(),
        })
        .collect()
}

/// Unify two terms under `bindings`, recording any new binding.
///
/// On failure `bindings` is left unchanged.
pub fn unify_terms(left: &Term, right: &Term, bindings: &mut Bindings) -> bool {
    let left = bindings.resolve(left);
    let right = bindings.resolve(right);

    match (left, right) {
        (Term::Constant(a), Term::Constant(b)) => a == b,
        (Term::Variable { name: a }, Term::Variable { name: b }) if a == b => true,
        (Term::Variable { name }, other) | (other, Term::Variable { name }) => {
            bindings.bind(name, other)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_binds_pattern_variables_in_order() {
        let bindings = matches(
            &Statement::new("likes", ["?x", "?y"]),
            &Statement::new("likes", ["tom", "jerry"]),
        )
        .unwrap();

        let pairs: Vec<_> = bindings.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("x", &Term::constant("tom")),
                ("y", &Term::constant("jerry"))
            ]
        );
    }

    #[test]
    fn test_constant_mismatch_fails() {
        assert!(matches(&Statement::new("a", ["b"]), &Statement::new("a", ["c"])).is_none());
    }

    #[test]
    fn test_predicate_and_arity_must_agree() {
        assert!(matches(&Statement::new("a", ["b"]), &Statement::new("z", ["b"])).is_none());
        assert!(
            matches(&Statement::new("a", ["b"]), &Statement::new("a", ["b", "c"])).is_none()
        );
    }

    #[test]
    fn test_repeated_variable_must_bind_consistently() {
        let pattern = Statement::new("same", ["?x", "?x"]);
        assert!(matches(&pattern, &Statement::new("same", ["a", "b"])).is_none());

        let bindings = matches(&pattern, &Statement::new("same", ["a", "a"])).unwrap();
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn test_ground_match_gives_empty_bindings() {
        let statement = Statement::new("isa", ["cube", "block"]);
        let bindings = matches(&statement, &statement).unwrap();
        assert!(bindings.is_empty());
    }

    #[test]
    fn test_target_variables_bind_symmetrically() {
        let bindings = matches(
            &Statement::new("on", ["a", "?below"]),
            &Statement::new("on", ["?top", "table"]),
        )
        .unwrap();

        assert_eq!(bindings.get("top"), Some(&Term::constant("a")));
        assert_eq!(bindings.get("below"), Some(&Term::constant("table")));
    }

    #[test]
    fn test_variable_to_variable_bindings_resolve() {
        let bindings = matches(
            &Statement::new("pair", ["?x", "?x"]),
            &Statement::new("pair", ["?y", "tom"]),
        )
        .unwrap();

        assert_eq!(bindings.resolve(&Term::var("x")), Term::constant("tom"));
        assert_eq!(bindings.resolve(&Term::var("y")), Term::constant("tom"));
    }

    #[test]
    fn test_matches_with_respects_existing_bindings() {
        let mut bindings = Bindings::new();
        bindings.bind("x", Term::constant("tom"));

        let pattern = Statement::new("cat", ["?x"]);
        assert!(matches_with(&pattern, &Statement::new("cat", ["felix"]), bindings.clone()).is_none());
        assert!(matches_with(&pattern, &Statement::new("cat", ["tom"]), bindings).is_some());
    }

    #[test]
    fn test_target_variables_are_scoped_apart_from_the_pattern() {
        let pattern = Statement::new("p", ["?x", "?y"]);
        let bindings = matches(&pattern, &Statement::new("p", ["?y", "a"])).unwrap();

        assert_eq!(bindings.resolve(&Term::var("x")), Term::var("y'"));
        assert_eq!(bindings.resolve(&Term::var("y")), Term::constant("a"));
        assert_eq!(
            pattern.instantiate(&bindings),
            Statement::new("p", ["?y'", "a"])
        );
    }

    #[test]
    fn test_shared_variable_names_do_not_constrain_each_other() {
        let bindings = matches(
            &Statement::new("p", ["?x", "b"]),
            &Statement::new("p", ["a", "?x"]),
        )
        .unwrap();

        assert_eq!(bindings.get("x"), Some(&Term::constant("a")));
        assert_eq!(bindings.get("x'"), Some(&Term::constant("b")));
    }

    #[test]
    fn test_renaming_skips_names_already_taken() {
        let bindings = matches(
            &Statement::new("p", ["?x", "?x'"]),
            &Statement::new("p", ["?x", "c"]),
        )
        .unwrap();

        assert_eq!(bindings.resolve(&Term::var("x")), Term::var("x''"));
        assert_eq!(bindings.get("x'"), Some(&Term::constant("c")));
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let pattern = Statement::new("likes", ["?x", "jerry"]);
        let target = Statement::new("likes", ["tom", "jerry"]);
        let before = (pattern.clone(), target.clone());

        let _ = matches(&pattern, &target);
        assert_eq!((pattern, target), before);
    }
}
