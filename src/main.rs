//! CLI entry point for seedcheck.

mod cli;
mod cmd;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use log::LevelFilter;

use cli::{Cli, Commands};
use cmd::Context;

/// Process exit status for a run that found validation problems
const EXIT_PROBLEMS: i32 = 1;
/// Process exit status for load or configuration failures
const EXIT_ERROR: i32 = 2;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_PROBLEMS),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            std::process::exit(EXIT_ERROR);
        }
    }
}

/// Initialise env_logger. `RUST_LOG` takes precedence over the flags.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

/// Dispatch the parsed command. Returns `Ok(false)` when the seed has
/// validation problems.
fn run(cli: Cli) -> Result<bool> {
    if let Commands::Completion { shell } = cli.command {
        cmd::util::cmd_completion(shell)?;
        return Ok(true);
    }

    let ctx = Context::load(cli.config.as_deref(), cli.format.as_deref(), cli.quiet)?;

    match cli.command {
        Commands::Create { file } => cmd::validate::cmd_create(&ctx, &file),
        Commands::Update { new, old } => cmd::validate::cmd_update(&ctx, &new, &old),
        Commands::StatusUpdate { new, old } => cmd::validate::cmd_status_update(&ctx, &new, &old),
        Commands::Config => {
            cmd::config::cmd_config_show(&ctx, cli.config.as_deref())?;
            Ok(true)
        }
        Commands::Completion { .. } => Ok(true),
    }
}
