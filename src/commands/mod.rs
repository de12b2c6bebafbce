//! Command handlers for the secret-chain CLI.

mod config_cmd;
mod get;
mod list;

pub use config_cmd::{handle_config_generate, handle_config_path};
pub use get::handle_get;
pub use list::handle_list;
