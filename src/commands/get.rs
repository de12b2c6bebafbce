//! Get command handler - resolving one configured secret.

use std::io::Write;

use crate::config::Config;
use crate::error::Result;
use crate::secrets::Secret;

/// Resolve the secret `name` and write its value to `out`.
pub async fn handle_get(
    config: &Config,
    name: &str,
    no_newline: bool,
    out: &mut impl Write,
) -> Result<()> {
    let chain = config.secret(name)?;
    let value = chain.value().await?;

    out.write_all(value.as_bytes())?;
    if !no_newline {
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
