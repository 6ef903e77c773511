//! OpenAI chat-completions analyzer adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AnalysisError, TextAnalyzer};

/// Chat model to use
const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";

/// OpenAI API base URL
const API_BASE_URL: &str = "https://api.openai.com/v1";

/// Low temperature keeps summaries and keyword lists focused
const TEMPERATURE: f32 = 0.3;

const SUMMARY_SYSTEM_PROMPT: &str = "You are a professional summarization expert. Create clear, \
concise summaries that capture the essential information in 2-4 sentences.";

const KEYWORD_SYSTEM_PROMPT: &str = "You are a keyword extraction specialist. Extract only the \
most relevant and specific keywords or phrases. Return them as a comma-separated list without \
explanations or additional text.";

// Request types for the chat completions API

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

// Response types for the chat completions API

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Option<Vec<Choice>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// OpenAI chat-completions analyzer for summaries and keywords
pub struct OpenAiAnalyzer {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiAnalyzer {
    /// Create a new analyzer with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a new analyzer with a custom model
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
        format!("{}/chat/completions", self.base_url)
    }

    /// Run one completion and return the trimmed assistant message
    async fn complete(&self, system: &str, user: String) -> Result<String, AnalysisError> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AnalysisError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AnalysisError::InvalidApiKey);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AnalysisError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AnalysisError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::ParseError(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(AnalysisError::ApiError(error.message));
        }

        let content = Self::extract_content(&response).ok_or(AnalysisError::EmptyResponse)?;

        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(AnalysisError::EmptyResponse);
        }

        Ok(trimmed.to_string())
    }

    fn extract_content(response: &ChatResponse) -> Option<&str> {
        response
            .choices
            .as_ref()?
            .first()?
            .message
            .as_ref()?
            .content
            .as_deref()
    }

    /// Split a comma-separated model reply into keywords
    fn split_keywords(reply: &str) -> Vec<String> {
        reply
            .split(',')
            .map(|keyword| keyword.trim().to_string())
            .filter(|keyword| !keyword.is_empty())
            .collect()
    }
}

#[async_trait]
impl TextAnalyzer for OpenAiAnalyzer {
    async fn summarize(&self, text: &str) -> Result<String, AnalysisError> {
        let prompt = format!(
            "Please provide a concise 2-4 sentence summary of this transcript.\n\
             Focus on the main points and key information. Keep it clear and professional.\n\n\
             Transcript:\n{}",
            text
        );

        self.complete(SUMMARY_SYSTEM_PROMPT, prompt).await
    }

    async fn extract_keywords(&self, text: &str) -> Result<Vec<String>, AnalysisError> {
        let prompt = format!(
            "Please analyze this transcript and extract 5-10 most relevant keywords or phrases.\n\
             Focus on specific, meaningful terms and proper nouns. Return only the keywords as a \
             comma-separated list.\n\n\
             Transcript:\n{}",
            text
        );

        let reply = self.complete(KEYWORD_SYSTEM_PROMPT, prompt).await?;
        Ok(Self::split_keywords(&reply))
    }

    fn service(&self) -> &str {
        "OpenAI GPT"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
