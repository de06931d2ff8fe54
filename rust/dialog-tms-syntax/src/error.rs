//! Error types for the dialog-tms-syntax parser.

use thiserror::Error;

/// Errors that can occur during tokenizing or parsing. Every variant carries
/// the 1-based number of the offending line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A character that cannot start any token.
    #[error("line {line}: unexpected character '{character}'")]
    UnexpectedCharacter { line: usize, character: char },

    /// A `?` with no name after it.
    #[error("line {line}: variable has no name")]
    EmptyVariable { line: usize },

    /// A word ending in `:` that is not one of the command keywords.
    #[error("line {line}: unknown command '{keyword}:'")]
    UnknownCommand { line: usize, keyword: String },

    /// Expected a particular token or construct but found something else.
    #[error("line {line}: expected {expected}, found {found}")]
    Expected {
        line: usize,
        expected: String,
        found: String,
    },

    /// A statement with no predicate, `()`.
    #[error("line {line}: statement has no predicate")]
    EmptyStatement { line: usize },

    /// The line ended inside a statement or rule.
    #[error("line {line}: unterminated {construct}")]
    Unterminated { line: usize, construct: &'static str },
}

impl ParseError {
    /// The line the error was found on.
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnexpectedCharacter { line, .. }
            | ParseError::EmptyVariable { line }
            | ParseError::UnknownCommand { line, .. }
            | ParseError::Expected { line, .. }
            | ParseError::EmptyStatement { line }
            | ParseError::Unterminated { line, .. } => *line,
        }
    }
}
