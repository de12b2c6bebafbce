//! Log output for the CLI.

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber. `RUST_LOG` wins over `verbosity`.
///
/// stdout is reserved for secret values, so logs never go there.
pub fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "secret_chain=warn",
        1 => "secret_chain=debug",
        _ => "secret_chain=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
