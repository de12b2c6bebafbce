use async_trait::async_trait;

use crate::error::{DecodeError, Result, SecretError};
use crate::secrets::Secret;

/// A secret read from a process environment variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentVariable {
    name: String,
}

impl EnvironmentVariable {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl Secret for EnvironmentVariable {
    async fn resolve(&self) -> Result<String> {
        tracing::debug!(name = %self.name, "reading environment variable");
        std::env::var(&self.name).map_err(|e| match e {
            std::env::VarError::NotPresent => SecretError::UndefinedVariable(self.name.clone()),
            std::env::VarError::NotUnicode(_) => SecretError::Decode(DecodeError::NotUnicode {
                name: self.name.clone(),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_set_variable() {
        // SAFETY: the variable name is unique to this test.
        unsafe {
            std::env::set_var("SECRET_CHAIN_TEST_ENV_SET", "value");
        }
        let secret = EnvironmentVariable::new("SECRET_CHAIN_TEST_ENV_SET");
        assert_eq!(secret.resolve().await.unwrap(), "value");
    }

    #[tokio::test]
    async fn test_unset_variable_is_undefined() {
        let secret = EnvironmentVariable::new("SECRET_CHAIN_TEST_ENV_UNSET");
        match secret.resolve().await {
            Err(SecretError::UndefinedVariable(name)) => {
                assert_eq!(name, "SECRET_CHAIN_TEST_ENV_UNSET")
            }
            other => panic!("expected UndefinedVariable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_value_is_not_undefined() {
        // SAFETY: the variable name is unique to this test.
        unsafe {
            std::env::set_var("SECRET_CHAIN_TEST_ENV_EMPTY", "");
        }
        let secret = EnvironmentVariable::new("SECRET_CHAIN_TEST_ENV_EMPTY");
        assert_eq!(secret.resolve().await.unwrap(), "");
    }
}
