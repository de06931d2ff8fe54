use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dialog_tms::Verbosity;

#[derive(Debug, Parser)]
#[command(name = "tms")]
#[command(bin_name = "tms")]
#[command(about = "Run fact and rule scripts against a truth-maintaining knowledge base", long_about = None)]
pub struct TmsCli {
    /// How much the knowledge base logs: quiet, normal, verbose or debug
    #[arg(short, long, global = true)]
    pub verbosity: Option<Verbosity>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Execute scripts in order against one knowledge base
    Run {
        /// Script files
        #[arg(required = true)]
        scripts: Vec<PathBuf>,

        /// Print query answers and explanations as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Parse scripts without executing them
    Check {
        /// Script files
        #[arg(required = true)]
        scripts: Vec<PathBuf>,
    },
}
