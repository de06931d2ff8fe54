//! Terms and statements
//!
//! A [`Term`] is either a constant symbol or a variable. Variables are written
//! with a leading `?` (`?x`) but stored without it. A [`Statement`] is a
//! predicate applied to an ordered list of terms, written `(likes ?x jerry)`.
//!
//! Equality on both types is purely structural: `?x` equals `?x` and nothing
//! else. Whether two statements *unify* is a different question answered by
//! [`crate::unify`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bindings::Bindings;

/// Prefix that marks a symbol as a variable in textual form.
pub const VARIABLE_PREFIX: char = '?';

/// Term represents either a constant symbol or a variable placeholder
///
/// # JSON Serialization
/// - Variables: `{ "?": { "name": "x" } }`
/// - Constants: plain JSON strings (e.g. `"tom"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    /// A named variable, stored without its `?` prefix
    #[serde(rename = "?")]
    Variable {
        /// Name without the prefix.
        name: String,
    },

    /// An atomic symbol
    #[serde(untagged)]
    Constant(String),
}

impl Term {
    /// Create a variable term. A leading `?` in `name` is accepted and dropped.
    pub fn var<N: Into<String>>(name: N) -> Self {
        let name = name.into();
        let name = match name.strip_prefix(VARIABLE_PREFIX) {
            Some(stripped) => stripped.to_string(),
            None => name,
        };
        Term::Variable { name }
    }

    /// Create a constant term
    pub fn constant<S: Into<String>>(symbol: S) -> Self {
        Term::Constant(symbol.into())
    }

    /// Read a symbol the way it is written in source text: `?x` is a
    /// variable, anything else is a constant.
    pub fn symbol(text: &str) -> Self {
        if text.starts_with(VARIABLE_PREFIX) {
            Term::var(text)
        } else {
            Term::constant(text)
        }
    }

    /// Whether this is a variable.
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable { .. })
    }

    /// Whether this is a constant.
    pub fn is_constant(&self) -> bool {
        matches!(self, Term::Constant(_))
    }

    /// Get the variable name if this is a variable term
    pub fn name(&self) -> Option<&str> {
        match self {
            Term::Variable { name } => Some(name),
            Term::Constant(_) => None,
        }
    }

    /// Get the symbol if this is a constant term
    pub fn as_constant(&self) -> Option<&str> {
        match self {
            Term::Constant(symbol) => Some(symbol),
            Term::Variable { .. } => None,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Constant(symbol) => write!(f, "{symbol}"),
            Term::Variable { name } => write!(f, "{VARIABLE_PREFIX}{name}"),
        }
    }
}

impl From<&str> for Term {
    fn from(text: &str) -> Self {
        Term::symbol(text)
    }
}

impl From<String> for Term {
    fn from(text: String) -> Self {
        Term::symbol(&text)
    }
}

impl From<&Term> for Term {
    fn from(term: &Term) -> Self {
        term.clone()
    }
}

/// A predicate applied to an ordered sequence of terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Statement {
    predicate: String,
    terms: Vec<Term>,
}

impl Statement {
    /// Create a statement. Terms convert through [`Term::from`], so plain
    /// strings work and `?`-prefixed strings become variables:
    ///
    /// ```
    /// use dialog_tms::{Statement, Term};
    ///
    /// let statement = Statement::new("likes", ["?x", "jerry"]);
    /// assert_eq!(statement.terms()[0], Term::var("x"));
    /// assert_eq!(statement.to_string(), "(likes ?x jerry)");
    /// ```
    pub fn new<P, I, T>(predicate: P, terms: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        Self {
            predicate: predicate.into(),
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }

    /// The predicate name.
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    /// Arguments in order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Number of arguments.
    pub fn arity(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if no term is a variable.
    pub fn is_ground(&self) -> bool {
        self.terms.iter().all(Term::is_constant)
    }

    /// Variable names in order of first occurrence.
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.terms.iter().filter_map(Term::name) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Substitute every bound variable with its value. Unbound variables are
    /// left in place.
    pub fn instantiate(&self, bindings: &Bindings) -> Statement {
        Statement {
            predicate: self.predicate.clone(),
            terms: self.terms.iter().map(|term| bindings.resolve(term)).collect(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.predicate)?;
        for term in &self.terms {
            write!(f, " {term}")?;
        }
        write!(f, ")")
    }
}
