//! Audio extraction port interface

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

/// Audio extraction errors
#[derive(Debug, Clone, Error)]
pub enum ExtractionError {
    #[error("ffmpeg not found. Install ffmpeg and ensure it is on PATH.")]
    FfmpegNotFound,

    #[error("Input file not found: {0}")]
    InputMissing(String),

    #[error("No audio stream found in the input file")]
    NoAudioStream,

    #[error("Audio conversion failed: {0}")]
    ConversionFailed(String),

    #[error("Failed to create valid audio file")]
    OutputEmpty,
}

/// Port for extracting an audio track from a media file
#[async_trait]
pub trait AudioExtractor: Send + Sync {
    /// Extract the audio track to a transcription-ready file.
    ///
    /// # Arguments
    /// * `media_path` - Path to the downloaded media file
    ///
    /// # Returns
    /// Path to the extracted audio file or a diagnosable error
    async fn extract(&self, media_path: &Path) -> Result<PathBuf, ExtractionError>;
}
