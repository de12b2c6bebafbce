use async_trait::async_trait;
use serde_json::Value;

use crate::error::{DecodeError, Result};
use crate::secrets::Secret;

/// One top-level field of a JSON document.
///
/// Cloud secrets are commonly stored as a JSON object of credentials; this is
/// the transform that picks one of them out of the previous step's value.
#[derive(Clone)]
pub struct JsonField {
    document: String,
    key: String,
}

impl JsonField {
    pub fn new(document: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl std::fmt::Debug for JsonField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonField")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Secret for JsonField {
    /// String fields come back unquoted; anything else as compact JSON.
    async fn resolve(&self) -> Result<String> {
        let document: Value = serde_json::from_str(&self.document)?;

        match document.as_object().and_then(|o| o.get(&self.key)) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Ok(other.to_string()),
            None => Err(DecodeError::MissingField {
                key: self.key.clone(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SecretError;

    const DOC: &str = r#"{"username": "admin", "password": "hunter2", "port": 5432}"#;

    #[tokio::test]
    async fn test_string_field() {
        let field = JsonField::new(DOC, "password");
        assert_eq!(field.resolve().await.unwrap(), "hunter2");
    }

    #[tokio::test]
    async fn test_non_string_field() {
        let field = JsonField::new(DOC, "port");
        assert_eq!(field.resolve().await.unwrap(), "5432");
    }

    #[tokio::test]
    async fn test_missing_field() {
        let err = JsonField::new(DOC, "token").resolve().await.unwrap_err();
        assert!(matches!(
            err,
            SecretError::Decode(DecodeError::MissingField { ref key }) if key == "token"
        ));

        let err = JsonField::new("[1, 2]", "token").resolve().await.unwrap_err();
        assert!(matches!(
            err,
            SecretError::Decode(DecodeError::MissingField { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_document() {
        let err = JsonField::new("not json", "password").resolve().await.unwrap_err();
        assert!(matches!(err, SecretError::Decode(DecodeError::Json(_))));
    }
}
