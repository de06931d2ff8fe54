//! # dialog-tms-syntax
//!
//! A small line-oriented language for feeding facts and rules to a
//! [`dialog_tms::KnowledgeBase`] and querying it.
//!
//! ## Syntax
//!
//! **Facts**:
//! ```text
//! fact: (isa cube block)
//! ```
//!
//! **Rules** (antecedents on the left, one consequent on the right):
//! ```text
//! rule: ((isa ?x block) (on ?y ?x)) -> (covered ?x)
//! ```
//!
//! **Queries**, **retractions** and **explanations**:
//! ```text
//! ask: (covered ?what)
//! retract: (on pyramid1 cube1)
//! explain: fact: (covered cube1)
//! explain: rule: ((on ?y cube1)) -> (covered cube1)
//! ```
//!
//! Variables start with `?`. Commas between antecedents are optional and `#`
//! starts a comment.
//!
//! ## Example
//!
//! ```
//! use dialog_tms_syntax::parse;
//!
//! let doc = parse("fact: (isa cube block)\nrule: ((isa ?x block)) -> (solid ?x)").unwrap();
//! assert_eq!(doc.len(), 2);
//!
//! // Roundtrip back to source
//! assert_eq!(
//!     doc.to_string(),
//!     "fact: (isa cube block)\nrule: ((isa ?x block)) -> (solid ?x)"
//! );
//! ```

pub mod ast;
pub mod error;
pub mod parser;
pub mod tokenizer;

pub use ast::{Command, Document, Located};
pub use error::ParseError;
pub use parser::{parse, parse_command};
