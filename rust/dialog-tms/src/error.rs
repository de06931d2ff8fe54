//! Error types for the knowledge base

use thiserror::Error;

/// Errors reported by knowledge base operations.
///
/// None of these are fatal: an operation that returns one of them has left
/// the knowledge base exactly as it found it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TmsError {
    /// The fact or rule named by a retraction or explanation is not stored
    #[error("{kind} is not in the KB: {item}")]
    NotFound {
        /// Either `"Fact"` or `"Rule"`
        kind: &'static str,
        /// Rendering of the missing item
        item: String,
    },

    /// Only facts that were asserted by a caller can be retracted
    #[error("Fact {statement} was derived, not asserted, and cannot be retracted")]
    NotAsserted {
        /// Rendering of the derived fact's statement
        statement: String,
    },

    /// Queries must be facts; rules cannot be asked
    #[error("Invalid ask: {query}")]
    InvalidQuery {
        /// Rendering of the rejected query
        query: String,
    },

    /// A verbosity name that is not one of the known levels
    #[error("Unknown verbosity level {0:?}")]
    UnknownVerbosity(String),
}

/// Result type for knowledge base operations
pub type TmsResult<T> = Result<T, TmsError>;
