//! Variable bindings produced by matching.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::term::{Statement, Term};

/// A substitution from variable names to terms.
///
/// Bindings keep the order in which variables were bound, which makes printed
/// query answers reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bindings {
    variables: IndexMap<String, Term>,
}

impl Bindings {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// The term bound to `variable`, if any. Accepts names with or without
    /// the `?` prefix.
    pub fn get(&self, variable: &str) -> Option<&Term> {
        let name = variable.strip_prefix('?').unwrap_or(variable);
        self.variables.get(name)
    }

    /// Bind `variable` to `term`.
    ///
    /// Returns `false` without changing anything when the variable is already
    /// bound to a different term. Rebinding to the same term is a no-op that
    /// succeeds.
    pub fn bind<N: Into<String>>(&mut self, variable: N, term: Term) -> bool {
        let variable = variable.into();
        match self.variables.get(&variable) {
            Some(existing) => *existing == term,
            None => {
                self.variables.insert(variable, term);
                true
            }
        }
    }

    /// Follow variable bindings until reaching a constant or an unbound
    /// variable.
    ///
    /// Chains only form through variable-to-variable bindings made while
    /// matching two partially ground statements; the matcher never binds a
    /// variable to itself, so the walk terminates.
    pub fn resolve(&self, term: &Term) -> Term {
        let mut current = term;
        while let Term::Variable { name } = current {
            match self.variables.get(name) {
                Some(bound) => current = bound,
                None => break,
            }
        }
        current.clone()
    }

    /// Variable names (without `?`) and their terms, in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.variables.iter().map(|(name, term)| (name.as_str(), term))
    }
}

impl fmt::Display for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, term)) in self.variables.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "?{name} : {}", self.resolve(term))?;
        }
        Ok(())
    }
}

/// One answer to a query: the bindings that made it match and the stored
/// facts that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Values of the query variables.
    pub bindings: Bindings,
    /// Stored statements the query matched.
    pub facts: Vec<Statement>,
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bindings.is_empty() {
            write!(f, "TRUE")?;
        } else {
            write!(f, "{}", self.bindings)?;
        }
        Ok(())
    }
}

/// All answers to a query, in the order the matching facts are stored.
///
/// The facts carried by each answer are owned copies of the statements that
/// matched, so a `ListOfBindings` stays valid after later retractions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListOfBindings {
    answers: Vec<Answer>,
}

impl ListOfBindings {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an answer.
    pub fn add_bindings(&mut self, bindings: Bindings, facts: Vec<Statement>) {
        self.answers.push(Answer { bindings, facts });
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// The answer at `index`.
    pub fn get(&self, index: usize) -> Option<&Answer> {
        self.answers.get(index)
    }

    /// Answers in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Answer> {
        self.answers.iter()
    }
}

impl IntoIterator for ListOfBindings {
    type Item = Answer;
    type IntoIter = std::vec::IntoIter<Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.answers.into_iter()
    }
}

impl<'a> IntoIterator for &'a ListOfBindings {
    type Item = &'a Answer;
    type IntoIter = std::slice::Iter<'a, Answer>;

    fn into_iter(self) -> Self::IntoIter {
        self.answers.iter()
    }
}

impl fmt::Display for ListOfBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, answer) in self.answers.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{answer}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_is_consistent() {
        let mut bindings = Bindings::new();
        assert!(bindings.bind("x", Term::constant("tom")));
        assert!(bindings.bind("x", Term::constant("tom")));
        assert!(!bindings.bind("x", Term::constant("jerry")));
        assert_eq!(bindings.get("?x"), Some(&Term::constant("tom")));
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn test_resolve_follows_variable_chains() {
        let mut bindings = Bindings::new();
        bindings.bind("x", Term::var("y"));
        bindings.bind("y", Term::constant("tom"));

        assert_eq!(bindings.resolve(&Term::var("x")), Term::constant("tom"));
        assert_eq!(bindings.resolve(&Term::var("z")), Term::var("z"));
    }

    #[test]
    fn test_bindings_display_in_binding_order() {
        let mut bindings = Bindings::new();
        bindings.bind("y", Term::constant("jerry"));
        bindings.bind("x", Term::constant("tom"));
        assert_eq!(bindings.to_string(), "?y : jerry, ?x : tom");
    }

    #[test]
    fn test_list_of_bindings_display() {
        let mut list = ListOfBindings::new();
        let mut bindings = Bindings::new();
        bindings.bind("x", Term::constant("tom"));
        list.add_bindings(bindings, vec![Statement::new("cat", ["tom"])]);
        list.add_bindings(Bindings::new(), vec![Statement::new("cat", ["felix"])]);

        assert_eq!(list.len(), 2);
        assert_eq!(list.to_string(), "?x : tom\nTRUE");
    }
}
