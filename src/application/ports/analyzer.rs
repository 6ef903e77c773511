//! Text analysis port interface

use async_trait::async_trait;
use thiserror::Error;

/// Text analysis errors
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Empty completion response")]
    EmptyResponse,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Port for language-model analysis of transcript text
#[async_trait]
pub trait TextAnalyzer: Send + Sync {
    /// Generate a short summary of the transcript.
    async fn summarize(&self, text: &str) -> Result<String, AnalysisError>;

    /// Extract relevant keywords or phrases, in order of relevance.
    async fn extract_keywords(&self, text: &str) -> Result<Vec<String>, AnalysisError>;

    /// Service name for the diagnostics card
    fn service(&self) -> &str;

    /// Model name for the diagnostics card
    fn model(&self) -> &str;
}
