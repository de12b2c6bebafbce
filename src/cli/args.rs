//! CLI argument parsing structures.

use clap::{ArgAction, Args, Parser};
use std::path::PathBuf;

use super::commands::Commands;

/// Main CLI structure for secret-chain.
#[derive(Parser, Debug)]
#[command(name = "secret-chain")]
#[command(about = "Resolve secrets through configured provider chains", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands.
#[derive(Debug, Default, Args)]
pub struct ConfigArgs {
    /// Config file to use instead of searching the standard locations
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}
