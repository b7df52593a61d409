//! `Paneldeck` CLI - Command-line interface for the paneldeck layout engine
//!
//! Inspects and rearranges the persisted workspace layout: splits, merges,
//! edge moves, resizes, visibility toggles, drops by target id and the
//! mobile slot list.

mod cli;
mod commands;
mod error;
mod format;
mod util;

use clap::Parser;
use cli::Cli;
use paneldeck_core::tracing::{TracingConfig, TracingLevel, TracingOutput, init_tracing};

fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let level = if cli.quiet {
        TracingLevel::Error
    } else {
        TracingLevel::from_verbosity(cli.verbose)
    };
    let mut tracing_config = TracingConfig::new().with_level(level);
    if let Some(path) = &cli.log_file {
        tracing_config = tracing_config.with_output(TracingOutput::File { path: path.clone() });
    }
    if let Err(e) = init_tracing(&tracing_config) {
        eprintln!("Warning: {e}");
    }

    let result = commands::dispatch(config_path, cli.command);

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
