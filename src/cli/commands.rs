//! Command and subcommand definitions.

use clap::Subcommand;
use std::path::PathBuf;

/// Top-level commands available in secret-chain.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a configured secret and print its value
    Get {
        /// Name of the secret block in the config file
        name: String,

        /// Don't print a trailing newline after the value
        #[arg(short, long)]
        no_newline: bool,
    },
    /// List configured secret names (one per line, for scripting)
    List,
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Subcommands of `config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a commented sample config file
    Generate {
        /// Where to write it (default: ~/.config/secret-chain/secret-chain.kdl)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Replace an existing file
        #[arg(long)]
        overwrite: bool,
    },
    /// Show which config file is in use
    Path,
}
