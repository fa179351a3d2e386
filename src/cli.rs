//! CLI argument definitions for seedcheck.

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("GIT_SHA"),
    "\nbuilt: ",
    env!("BUILD_DATE")
);

#[derive(Parser)]
#[command(name = "seedcheck")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Validate Seed resources before admission", long_about = None)]
#[command(
    after_help = "EXIT STATUS:\n    0  no problems found\n    1  the seed has validation problems\n    2  the seed or configuration could not be loaded"
)]
pub struct Cli {
    /// Suppress all non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format: text or json (overrides configuration)
    #[arg(long, global = true, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Configuration file layered over the global and project config
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a new seed as on creation
    Create {
        /// Seed manifest (YAML)
        file: PathBuf,
    },
    /// Validate a change from an existing seed to a new one
    Update {
        /// Proposed seed manifest
        new: PathBuf,
        /// Currently stored seed manifest
        old: PathBuf,
    },
    /// Validate a status-only change
    StatusUpdate {
        /// Proposed seed manifest
        new: PathBuf,
        /// Currently stored seed manifest
        old: PathBuf,
    },
    /// Show the effective configuration and where it came from
    Config,
    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
