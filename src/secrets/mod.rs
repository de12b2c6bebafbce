//! The `Secret` capability and everything that implements it.

pub mod chain;
pub mod providers;

pub use chain::{ChainedSecret, Step};
pub use providers::{
    AwsSecretsManagerSecret, Base64EncodedSecret, EnvironmentVariable, FileSystemSecret,
    JsonField,
};

use async_trait::async_trait;

use crate::error::{Result, SecretError};

/// Anything that can produce a secret string on demand.
///
/// Implementations hold only their construction parameters; every call to
/// [`Secret::resolve`] performs a fresh lookup.
#[async_trait]
pub trait Secret: Send + Sync {
    /// Produce the current value of the secret.
    async fn resolve(&self) -> Result<String>;

    /// The secret's value as a string. Same as [`Secret::resolve`].
    async fn value(&self) -> Result<String> {
        self.resolve().await
    }
}

/// Resolve `secret` from synchronous code.
///
/// Builds a private current-thread runtime for the duration of the call.
/// Inside a tokio runtime this fails with [`SecretError::Runtime`]; await
/// [`Secret::resolve`] there instead.
pub fn resolve_blocking(secret: &dyn Secret) -> Result<String> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(SecretError::Runtime(
            "resolve_blocking cannot run inside an async runtime; await resolve() instead"
                .to_string(),
        ));
    }
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(secret.resolve())
}
