//! Config command handlers - generating and locating the config file.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;

/// Write a sample config file and report where it went
pub fn handle_config_generate(path: Option<PathBuf>, overwrite: bool) -> Result<()> {
    let config_path = Config::generate_config_file(path, overwrite)?;
    println!("Config file generated at: {}", config_path.display());
    Ok(())
}

/// Print the config file in use: the `--config` override, else the first
/// file found in the standard locations.
pub fn handle_config_path(explicit: Option<&Path>, out: &mut impl Write) -> Result<()> {
    if let Some(path) = explicit {
        if path.exists() {
            writeln!(out, "{}", path.display())?;
        } else {
            writeln!(out, "{} (not found)", path.display())?;
        }
        return Ok(());
    }

    match Config::find_existing_config() {
        Some(path) => writeln!(out, "{}", path.display())?,
        None => {
            writeln!(out, "No config file found.")?;
            writeln!(
                out,
                "Run 'secret-chain config generate' to create one at {}",
                Config::default_config_path().display()
            )?;
        }
    }
    Ok(())
}
