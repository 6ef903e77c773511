//! OpenAI Whisper transcriber adapter

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{Transcriber, TranscriptionError};
use crate::domain::transcript::{Segment, Transcript};

/// Whisper model to use
const DEFAULT_MODEL: &str = "whisper-1";

/// OpenAI API base URL
const API_BASE_URL: &str = "https://api.openai.com/v1";

// Response types for the transcription API

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
    segments: Option<Vec<ResponseSegment>>,
}

#[derive(Debug, Deserialize)]
struct ResponseSegment {
    start: f64,
    end: f64,
    text: String,
}

/// Whisper API transcriber
pub struct WhisperTranscriber {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl WhisperTranscriber {
    /// Create a new Whisper transcriber with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a new Whisper transcriber with a custom model
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::new(api_key)
        }
    }

    /// Override the API base URL (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn api_url(&self) -> String {
        format!("{}/audio/transcriptions", self.base_url)
    }

    /// Map the API response into the domain transcript
    fn to_transcript(response: TranscriptionResponse) -> Transcript {
        let segments = response
            .segments
            .unwrap_or_default()
            .into_iter()
            .map(|segment| Segment::new(segment.start, segment.end, segment.text))
            .collect();

        Transcript::new(response.text, segments)
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcript, TranscriptionError> {
        let audio = tokio::fs::read(audio_path)
            .await
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        let file_name = audio_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio.mp3".to_string());

        let part = multipart::Part::bytes(audio)
            .file_name(file_name)
            .mime_str("audio/mpeg")
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        let form = multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "segment");

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::RequestFailed(e.to_string()))?;

        let status = response.status();

        // Handle HTTP errors
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(TranscriptionError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TranscriptionError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TranscriptionError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        // Parse response
        let response: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ParseError(e.to_string()))?;

        let transcript = Self::to_transcript(response);

        if transcript.full_text.trim().is_empty() && transcript.segments.is_empty() {
            return Err(TranscriptionError::EmptyResponse);
        }

        Ok(transcript)
    }

    fn service(&self) -> &str {
        "OpenAI Whisper"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
