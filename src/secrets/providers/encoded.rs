use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::Result;
use crate::secrets::Secret;

/// A secret given inline as base64 text.
///
/// Usually the constructor step after a source that holds an encoded blob:
/// `Step::constructor(Base64EncodedSecret::new)`.
#[derive(Clone, PartialEq, Eq)]
pub struct Base64EncodedSecret {
    encoded: String,
}

impl Base64EncodedSecret {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self {
            encoded: encoded.into(),
        }
    }
}

impl std::fmt::Debug for Base64EncodedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Base64EncodedSecret([REDACTED])")
    }
}

#[async_trait]
impl Secret for Base64EncodedSecret {
    async fn resolve(&self) -> Result<String> {
        // Values read from files and env vars often carry a trailing newline.
        let compact: String = self
            .encoded
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let bytes = STANDARD.decode(compact)?;
        Ok(String::from_utf8(bytes)?)
    }
}
