use std::process::ExitCode;

use clap::Parser;

use secret_chain::Config;
use secret_chain::cli::{Cli, Commands, ConfigCommands};
use secret_chain::commands::{handle_config_generate, handle_config_path, handle_get, handle_list};
use secret_chain::error::Result;
use secret_chain::utils::{format_error, init_logging};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.config.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", format_error(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Config commands don't need a parsed config file
    if let Commands::Config { command } = &cli.command {
        match command {
            ConfigCommands::Generate { path, overwrite } => {
                return handle_config_generate(path.clone(), *overwrite);
            }
            ConfigCommands::Path => {
                return handle_config_path(cli.config.config.as_deref(), &mut std::io::stdout());
            }
        }
    }

    let config = match &cli.config.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    let mut stdout = std::io::stdout();
    match cli.command {
        Commands::Get { name, no_newline } => {
            handle_get(&config, &name, no_newline, &mut stdout).await
        }
        Commands::List => handle_list(&config, &mut stdout),
        Commands::Config { .. } => Ok(()),
    }
}
