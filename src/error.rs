//! Unified error type for secret-chain.
//!
//! All public APIs return `Result<T, SecretError>`. Errors raised by the
//! underlying collaborators (the OS, the base64 decoder, the AWS SDK) are kept
//! as the error `source` so nothing about the original failure is lost.

use std::fmt;
use std::path::PathBuf;

/// The unified error type for all secret-chain operations.
#[derive(Debug)]
pub enum SecretError {
    // ── Leaf providers ─────────────────────────────────────────────────
    /// An environment variable is not set.
    UndefinedVariable(String),

    /// A secret file could not be opened or read.
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Stored bytes could not be decoded into a secret string.
    Decode(DecodeError),

    /// An error raised by an external secrets service, passed through as-is.
    ExternalService {
        provider: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The provider answered, but not with something usable as a secret.
    Provider { provider: String, message: String },

    // ── Chains ─────────────────────────────────────────────────────────
    /// A chain was built without any steps.
    EmptyChain,

    /// A chain was built in a shape that can never resolve.
    InvalidChain(String),

    // ── Configuration ──────────────────────────────────────────────────
    /// A named secret does not exist in the configuration.
    NotFound(String),

    /// KDL config file parsing or validation error.
    Config(String),

    /// Filesystem or runtime I/O outside of secret reads.
    Io(std::io::Error),

    /// A blocking resolution was attempted from inside an async runtime.
    Runtime(String),
}

/// The ways stored bytes can fail to become a secret string.
#[derive(Debug)]
pub enum DecodeError {
    /// Malformed base64 input.
    Base64(base64::DecodeError),
    /// Decoded bytes are not valid UTF-8.
    Utf8(std::string::FromUtf8Error),
    /// An environment variable holds a value that is not valid Unicode.
    NotUnicode { name: String },
    /// A JSON document could not be parsed.
    Json(serde_json::Error),
    /// A JSON document has no such top-level field.
    MissingField { key: String },
}

// ── Display ────────────────────────────────────────────────────────────

impl fmt::Display for SecretError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretError::UndefinedVariable(name) => {
                write!(f, "environment variable '{}' is not set", name)
            }
            SecretError::FileAccess { path, .. } => {
                write!(f, "cannot read secret file '{}'", path.display())
            }
            SecretError::Decode(e) => write!(f, "decode error: {}", e),
            SecretError::ExternalService { provider, .. } => {
                write!(f, "provider '{}' request failed", provider)
            }
            SecretError::Provider { provider, message } => {
                write!(f, "provider '{}': {}", provider, message)
            }
            SecretError::EmptyChain => write!(f, "a secret chain needs at least one step"),
            SecretError::InvalidChain(msg) => write!(f, "invalid chain: {}", msg),
            SecretError::NotFound(name) => write!(f, "secret '{}' is not configured", name),
            SecretError::Config(msg) => write!(f, "config error: {}", msg),
            SecretError::Io(e) => write!(f, "{}", e),
            SecretError::Runtime(msg) => write!(f, "runtime error: {}", msg),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Base64(e) => write!(f, "invalid base64: {}", e),
            DecodeError::Utf8(e) => write!(f, "decoded bytes are not UTF-8: {}", e),
            DecodeError::NotUnicode { name } => {
                write!(f, "environment variable '{}' is not valid Unicode", name)
            }
            DecodeError::Json(e) => write!(f, "invalid JSON: {}", e),
            DecodeError::MissingField { key } => write!(f, "JSON field '{}' not found", key),
        }
    }
}

impl std::error::Error for SecretError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SecretError::FileAccess { source, .. } => Some(source),
            SecretError::Decode(e) => Some(e),
            SecretError::ExternalService { source, .. } => Some(source.as_ref()),
            SecretError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Base64(e) => Some(e),
            DecodeError::Utf8(e) => Some(e),
            DecodeError::Json(e) => Some(e),
            _ => None,
        }
    }
}

// ── From implementations for common error types ────────────────────────

impl From<DecodeError> for SecretError {
    fn from(e: DecodeError) -> Self {
        SecretError::Decode(e)
    }
}

impl From<base64::DecodeError> for SecretError {
    fn from(e: base64::DecodeError) -> Self {
        SecretError::Decode(DecodeError::Base64(e))
    }
}

impl From<std::string::FromUtf8Error> for SecretError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        SecretError::Decode(DecodeError::Utf8(e))
    }
}

impl From<serde_json::Error> for SecretError {
    fn from(e: serde_json::Error) -> Self {
        SecretError::Decode(DecodeError::Json(e))
    }
}

impl From<std::io::Error> for SecretError {
    fn from(e: std::io::Error) -> Self {
        SecretError::Io(e)
    }
}

impl From<knuffel::Error> for SecretError {
    fn from(e: knuffel::Error) -> Self {
        SecretError::Config(e.to_string())
    }
}

// ── Convenience constructors ───────────────────────────────────────────

impl SecretError {
    /// Create a provider-specific error.
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        SecretError::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Wrap an AWS SDK error without altering it.
    pub fn aws(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        SecretError::ExternalService {
            provider: "aws".to_string(),
            source: Box::new(e),
        }
    }

    /// Create a file access error for `path`.
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SecretError::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid chain error.
    pub fn invalid_chain(message: impl Into<String>) -> Self {
        SecretError::InvalidChain(message.into())
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        SecretError::Config(message.into())
    }
}

/// Convenience type alias for Results using SecretError.
pub type Result<T> = std::result::Result<T, SecretError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_file_access_keeps_os_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = SecretError::file_access("/etc/shadow", io);

        assert_eq!(err.to_string(), "cannot read secret file '/etc/shadow'");
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "denied");
    }

    #[test]
    fn test_decode_conversions() {
        let err: SecretError = String::from_utf8(vec![0xff]).unwrap_err().into();
        assert!(matches!(err, SecretError::Decode(DecodeError::Utf8(_))));
        assert!(err.source().is_some());
    }
}
