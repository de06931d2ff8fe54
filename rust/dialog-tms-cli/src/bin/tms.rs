use std::io;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use dialog_tms::Config;
use dialog_tms_cli::{Commands, Format, Runner, TmsCli, read_script};

fn main() -> Result<()> {
    let cli = TmsCli::parse();
    let config = Config::new(cli.verbosity.unwrap_or_default());

    tracing_subscriber::fmt()
        .with_env_filter(config.verbosity.filter())
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Run { scripts, json } => run(config, scripts, json),
        Commands::Check { scripts } => check(scripts),
    }
}

fn run(config: Config, scripts: Vec<PathBuf>, json: bool) -> Result<()> {
    let format = if json { Format::Json } else { Format::Text };
    let mut runner = Runner::new(config, format, io::stdout().lock());
    for script in &scripts {
        runner.run_file(script)?;
    }

    let summary = runner.summary();
    if summary.errors > 0 {
        bail!("{} of {} commands failed", summary.errors, summary.commands);
    }
    Ok(())
}

fn check(scripts: Vec<PathBuf>) -> Result<()> {
    for script in &scripts {
        let document = read_script(script)?;
        println!("{}: {} commands", script.display(), document.len());
    }
    Ok(())
}
