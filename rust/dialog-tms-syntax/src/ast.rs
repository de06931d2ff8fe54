//! Parsed commands.
//!
//! Facts, rules and statements are the knowledge base's own types; this
//! module only adds the command layer around them.

use std::fmt;

use dialog_tms::{Fact, Item, Rule, Statement};

/// One line of a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `fact: (...)` or `rule: (...) -> (...)`
    Assert(Item),
    /// `retract: (...)`
    Retract(Statement),
    /// `ask: (...)`. Rules parse here too so that running them can report
    /// the invalid query.
    Ask(Item),
    /// `explain: fact: (...)` or `explain: rule: (...) -> (...)`
    Explain(Item),
}

impl Command {
    /// The keyword the command is written with.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Assert(Item::Fact(_)) => "fact",
            Command::Assert(Item::Rule(_)) => "rule",
            Command::Retract(_) => "retract",
            Command::Ask(_) => "ask",
            Command::Explain(_) => "explain",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Assert(item) => write!(f, "{item}"),
            Command::Retract(statement) => write!(f, "retract: {statement}"),
            Command::Ask(query) => write!(f, "ask: {}", query.source()),
            Command::Explain(item) => write!(f, "explain: {item}"),
        }
    }
}

/// A command together with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub line: usize,
    pub command: Command,
}

/// A parsed script.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub commands: Vec<Located>,
}

impl Document {
    pub fn new(commands: Vec<Located>) -> Self {
        Self { commands }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over the commands in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter().map(|located| &located.command)
    }

    /// Facts the script asserts.
    pub fn facts(&self) -> impl Iterator<Item = &Fact> {
        self.iter().filter_map(|command| match command {
            Command::Assert(Item::Fact(fact)) => Some(fact),
            _ => None,
        })
    }

    /// Rules the script asserts.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.iter().filter_map(|command| match command {
            Command::Assert(Item::Rule(rule)) => Some(rule),
            _ => None,
        })
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, located) in self.commands.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", located.command)?;
        }
        Ok(())
    }
}
