//! `formulakit` command-line front end.
//!
//! Modules:
//! - `args`   : clap argument model
//! - `config` : TOML configuration and flag overrides
//! - `input`  : CSV/workbook readers
//! - `output` : text/xlsx/csv writers
mod args;
mod config;
mod input;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use formulakit_grid::convert_grid;
use tracing_subscriber::EnvFilter;

use crate::args::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(&cli)
}

fn init_tracing(if_verbose: bool) {
    let level = if if_verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let cfg = config::load_config(cli)?;
    let table = input::read_grid(&cli.input, cli.sheet.as_deref())?;
    let output = convert_grid(&table, &cfg.convert)
        .with_context(|| format!("Failed to convert {}", cli.input.display()))?;

    let l_paths = output::write_outputs(&cli.dir_out, &output, &cfg.output)?;

    println!("{}", output.report.format("[GRID]"));
    for row_error in &output.report.rows_skipped {
        println!("  {row_error}");
    }
    for path in &l_paths {
        println!("  wrote {}", path.display());
    }
    Ok(())
}
