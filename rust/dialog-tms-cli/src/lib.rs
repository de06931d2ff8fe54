//! # dialog-tms-cli
//!
//! The `tms` command: runs scripts written in the `dialog-tms-syntax`
//! language against a single [`dialog_tms::KnowledgeBase`].
//!
//! ```text
//! tms run blocks.tms --verbosity verbose
//! tms run blocks.tms more.tms --json
//! tms check blocks.tms
//! ```

pub mod cli;
pub mod runner;

pub use cli::{Commands, TmsCli};
pub use runner::{Format, Runner, Summary, read_script};
