//! File storage port interface

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::cards::CardDocument;
use crate::domain::token::SkillsToken;

/// File storage errors
#[derive(Debug, Clone, Error)]
pub enum FileStoreError {
    #[error("Missing {0} access token")]
    MissingToken(&'static str),

    #[error("Authentication failed with status {0}")]
    AuthFailed(u16),

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Downloaded file is empty or does not exist")]
    EmptyDownload,

    #[error("Unexpected response from metadata check: {0}")]
    UnexpectedStatus(u16),

    #[error("Metadata upload rejected: {0}")]
    UploadRejected(String),

    #[error("File I/O failed: {0}")]
    Io(String),
}

/// Port for the content-storage platform: file downloads and Skills
/// metadata writes.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Download a file's content to a local temporary path.
    ///
    /// # Arguments
    /// * `file_id` - The platform file identifier
    /// * `token` - Skills token; the read grant is used
    ///
    /// # Returns
    /// Path to the downloaded file or an error
    async fn download(&self, file_id: &str, token: &SkillsToken)
        -> Result<PathBuf, FileStoreError>;

    /// Write a card document to the file's Skills metadata, creating it
    /// when absent and patching it in place when present.
    async fn upload_cards(
        &self,
        file_id: &str,
        document: &CardDocument,
        token: &SkillsToken,
    ) -> Result<(), FileStoreError>;
}
