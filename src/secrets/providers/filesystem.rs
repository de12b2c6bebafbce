use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{Result, SecretError};
use crate::secrets::Secret;

/// A secret stored as the whole contents of a text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSystemSecret {
    path: PathBuf,
}

impl FileSystemSecret {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Secret for FileSystemSecret {
    /// Returns the file contents verbatim, including any trailing newline.
    async fn resolve(&self) -> Result<String> {
        tracing::debug!(path = %self.path.display(), "reading secret file");
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SecretError::file_access(&self.path, e))
    }
}
