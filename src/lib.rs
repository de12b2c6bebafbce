//! secret-chain - resolve secrets from several sources through composable chains.
//!
//! This crate provides:
//! - Leaf providers for environment variables, files, inline base64 values and
//!   AWS Secrets Manager
//! - `ChainedSecret`, which threads a value through literals, secrets,
//!   constructors and transforms to produce one final secret
//! - A KDL config format for declaring named chains, and the `secret-chain` CLI
//!
//! # Example
//!
//! ```no_run
//! use secret_chain::{Base64EncodedSecret, ChainedSecret, EnvironmentVariable, Secret, Step};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let password = ChainedSecret::new(vec![
//!         Step::instance(EnvironmentVariable::new("ADMIN_PASSWORD")),
//!         Step::constructor(Base64EncodedSecret::new),
//!     ])?;
//!
//!     println!("{} characters", password.value().await?.len());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod secrets;
pub mod utils;

// Re-export commonly used types at the crate root
pub use config::Config;
pub use error::{DecodeError, Result, SecretError};
pub use secrets::{
    AwsSecretsManagerSecret, Base64EncodedSecret, ChainedSecret, EnvironmentVariable,
    FileSystemSecret, JsonField, Secret, Step, resolve_blocking,
};
