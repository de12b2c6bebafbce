//! Utility functions shared across the application.

mod error;
mod logging;

pub use error::format_error;
pub use logging::init_logging;
