//! Knowledge base configuration.
//!
//! The only tunable today is how chatty the engine is. Levels are ordered, so
//! a level enables everything the levels below it enable:
//!
//! ```text
//! quiet    nothing
//! normal   assertions, retractions and queries
//! verbose  also insertions and inference attempts
//! debug    also match failures and retraction cascade steps
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TmsError;

/// How much the knowledge base reports through `tracing`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// No events.
    Quiet,
    #[default]
    /// Assertions, retractions, queries and rejections.
    Normal,
    /// Also insertions, merges and inference attempts.
    Verbose,
    /// Also match failures and retraction cascade steps.
    Debug,
}

impl Verbosity {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::Debug => "debug",
        }
    }

    /// The tracing level directive that lets every event this verbosity
    /// emits through a subscriber filter.
    pub fn filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "off",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
            Verbosity::Debug => "trace",
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verbosity {
    type Err = TmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quiet" | "q" | "0" => Ok(Verbosity::Quiet),
            "normal" | "n" | "1" => Ok(Verbosity::Normal),
            "verbose" | "v" | "2" => Ok(Verbosity::Verbose),
            "debug" | "d" | "3" => Ok(Verbosity::Debug),
            _ => Err(TmsError::UnknownVerbosity(s.to_string())),
        }
    }
}

/// Construction-time settings for a [`crate::KnowledgeBase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How much the knowledge base reports.
    pub verbosity: Verbosity,
}

impl Config {
    /// A configuration with the given verbosity.
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}
