//! Executes parsed scripts against a knowledge base.
//!
//! Knowledge base errors (a retraction of an unknown fact, a rule used as a
//! query, ...) are written to the output next to the command that caused
//! them and do not stop the run. Only I/O failures abort.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use dialog_tms::{Config, KnowledgeBase, TmsError};
use dialog_tms_syntax::{Command, Document, Located};
use serde_json::json;

/// How results are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Human readable: answers one per line, explanations as indented trees.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Counts gathered over a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub commands: usize,
    pub errors: usize,
}

pub struct Runner<W> {
    kb: KnowledgeBase,
    format: Format,
    out: W,
    summary: Summary,
}

impl<W: Write> Runner<W> {
    pub fn new(config: Config, format: Format, out: W) -> Self {
        Self {
            kb: KnowledgeBase::with_config(config),
            format,
            out,
            summary: Summary::default(),
        }
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Run every command of `document` in order.
    pub fn run(&mut self, document: &Document) -> Result<()> {
        for located in &document.commands {
            self.execute(located)?;
        }
        Ok(())
    }

    /// Read, parse and run a script file.
    pub fn run_file(&mut self, path: &Path) -> Result<()> {
        let document = read_script(path)?;
        tracing::debug!(path = %path.display(), commands = document.len(), "Running script");
        self.run(&document)
    }

    fn execute(&mut self, located: &Located) -> Result<()> {
        self.summary.commands += 1;
        let line = located.line;

        match &located.command {
            Command::Assert(item) => {
                self.kb.assert(item.clone());
            }
            Command::Retract(statement) => {
                if let Err(error) = self.kb.retract(statement) {
                    self.report(line, &error)?;
                }
            }
            Command::Ask(query) => match self.kb.try_ask(query.clone()) {
                Ok(answers) => match self.format {
                    Format::Text if answers.is_empty() => writeln!(self.out, "FALSE")?,
                    Format::Text => writeln!(self.out, "{answers}")?,
                    Format::Json => {
                        let record = json!({
                            "line": line,
                            "ask": query.source(),
                            "answers": answers,
                        });
                        writeln!(self.out, "{record}")?;
                    }
                },
                Err(error) => self.report(line, &error)?,
            },
            Command::Explain(item) => match self.kb.explain(item.clone()) {
                Ok(explanation) => match self.format {
                    Format::Text => write!(self.out, "{explanation}")?,
                    Format::Json => {
                        let record = json!({
                            "line": line,
                            "explain": item.to_string(),
                            "explanation": explanation.lines().collect::<Vec<_>>(),
                        });
                        writeln!(self.out, "{record}")?;
                    }
                },
                Err(error) => self.report(line, &error)?,
            },
        }
        Ok(())
    }

    fn report(&mut self, line: usize, error: &TmsError) -> Result<()> {
        self.summary.errors += 1;
        match self.format {
            Format::Text => writeln!(self.out, "line {line}: {error}")?,
            Format::Json => {
                let record = json!({ "line": line, "error": error.to_string() });
                writeln!(self.out, "{record}")?;
            }
        }
        Ok(())
    }
}

/// Read and parse a script file.
pub fn read_script(path: &Path) -> Result<Document> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    dialog_tms_syntax::parse(&source).with_context(|| format!("in {}", path.display()))
}
