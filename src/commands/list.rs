//! List command handler - listing configured secrets.

use std::io::Write;

use crate::config::Config;
use crate::error::Result;

/// Print all configured secret names, one per line
pub fn handle_list(config: &Config, out: &mut impl Write) -> Result<()> {
    let names = config.names();

    if names.is_empty() {
        eprintln!("No secrets configured. Run 'secret-chain config generate' to create a config file.");
        return Ok(());
    }

    for name in names {
        writeln!(out, "{}", name)?;
    }

    Ok(())
}
