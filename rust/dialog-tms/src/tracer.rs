//! Verbosity-gated `tracing` events.
//!
//! The knowledge base and its inference engine share a [`Tracer`] built from
//! the [`Config`]. Each event checks the configured [`Verbosity`] before it
//! reaches `tracing`, so a quiet knowledge base stays quiet even under a
//! permissive subscriber.

use tracing::{debug, info, trace, warn};

use crate::config::{Config, Verbosity};
use crate::error::TmsError;
use crate::item::{Fact, Item, Rule};
use crate::term::Statement;

/// Emits knowledge base events through `tracing`, filtered by verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tracer {
    verbosity: Verbosity,
}

impl Tracer {
    /// A tracer that reports events up to `verbosity`.
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// The configured verbosity.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    fn enabled(&self, level: Verbosity) -> bool {
        self.verbosity >= level
    }

    pub(crate) fn asserting(&self, item: &Item) {
        if self.enabled(Verbosity::Normal) {
            info!(%item, "Asserting");
        }
    }

    pub(crate) fn retracting(&self, statement: &Statement) {
        if self.enabled(Verbosity::Normal) {
            info!(%statement, "Retracting");
        }
    }

    pub(crate) fn asking(&self, query: &Statement) {
        if self.enabled(Verbosity::Normal) {
            info!(%query, "Asking");
        }
    }

    pub(crate) fn rejected(&self, error: &TmsError) {
        if self.enabled(Verbosity::Normal) {
            warn!(%error, "Rejected");
        }
    }

    pub(crate) fn adding(&self, item: &Item) {
        if self.enabled(Verbosity::Verbose) {
            debug!(%item, "Adding");
        }
    }

    pub(crate) fn merging(&self, item: &Item) {
        if self.enabled(Verbosity::Verbose) {
            debug!(%item, "Merging support");
        }
    }

    pub(crate) fn inferring(&self, fact: &Fact, rule: &Rule) {
        if self.enabled(Verbosity::Verbose) {
            debug!(
                fact = %fact.statement(),
                rule = %rule,
                "Attempting to infer"
            );
        }
    }

    pub(crate) fn malformed(&self, rule: &Rule) {
        if self.enabled(Verbosity::Normal) {
            warn!(%rule, "Rule has no antecedents, skipping");
        }
    }

    pub(crate) fn no_match(&self, pattern: &Statement, statement: &Statement) {
        if self.enabled(Verbosity::Debug) {
            trace!(%pattern, %statement, "No match");
        }
    }

    pub(crate) fn removing(&self, item: &Item) {
        if self.enabled(Verbosity::Debug) {
            trace!(%item, "Removing unsupported item");
        }
    }

    pub(crate) fn unasserting(&self, statement: &Statement) {
        if self.enabled(Verbosity::Debug) {
            trace!(%statement, "Still supported, keeping as derived");
        }
    }
}

impl From<&Config> for Tracer {
    fn from(config: &Config) -> Self {
        Tracer::new(config.verbosity)
    }
}
