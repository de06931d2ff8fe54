//! Dialog TMS
//!
//! A forward-chaining inference engine with justification-based truth
//! maintenance. Facts and rules asserted into a [`KnowledgeBase`] are chained
//! to a fixed point; every derived fact or rule remembers the fact/rule pairs
//! that justify it. Those justifications drive retraction (a conclusion goes
//! away when its last well-founded justification does) and explanation.
//!
//! ```
//! use dialog_tms::{Fact, KnowledgeBase, Retraction, Rule, Statement};
//!
//! let mut kb = KnowledgeBase::new();
//! kb.assert(Rule::new(
//!     vec![Statement::new("a", ["?x"]), Statement::new("b", ["?x"])],
//!     Statement::new("c", ["?x"]),
//! ));
//! kb.assert(Fact::new(Statement::new("a", ["one"])));
//! kb.assert(Fact::new(Statement::new("b", ["one"])));
//!
//! assert_eq!(kb.ask(Statement::new("c", ["?x"])).to_string(), "?x : one");
//!
//! let retraction = kb.retract(&Statement::new("a", ["one"])).unwrap();
//! assert_eq!(retraction, Retraction::Removed { facts: 2, rules: 1 });
//! assert!(kb.ask(Statement::new("c", ["?x"])).is_empty());
//! ```

#![warn(missing_docs)]

/// Variable bindings and query answers.
pub mod bindings;
/// Knowledge base configuration.
pub mod config;
/// Forward chaining over a single fact and rule.
pub mod engine;
/// Error types for knowledge base operations.
pub mod error;
/// Facts, rules and justifications.
pub mod item;
/// Storage, assertion, retraction, queries and explanation.
pub mod knowledge_base;
/// Terms and statements.
pub mod term;
/// Verbosity-gated tracing.
pub mod tracer;
/// Statement matching.
pub mod unify;

pub use bindings::{Answer, Bindings, ListOfBindings};
pub use config::{Config, Verbosity};
pub use engine::{Derivation, InferenceEngine};
pub use error::{TmsError, TmsResult};
pub use item::{Fact, FactId, Item, ItemId, Justification, Rule, RuleId, Support};
pub use knowledge_base::{Admission, Assertion, KnowledgeBase, Retraction};
pub use term::{Statement, Term};
pub use tracer::Tracer;
