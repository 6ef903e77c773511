//! Transcription port interface

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::transcript::Transcript;

/// Transcription errors
#[derive(Debug, Clone, Error)]
pub enum TranscriptionError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Empty transcription response")]
    EmptyResponse,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Port for audio transcription
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file to text with timed segments.
    ///
    /// # Arguments
    /// * `audio_path` - Path to the audio file
    ///
    /// # Returns
    /// The transcript with its segments in playback order, or an error
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcript, TranscriptionError>;

    /// Service name for the diagnostics card
    fn service(&self) -> &str;

    /// Model name for the diagnostics card
    fn model(&self) -> &str;
}
