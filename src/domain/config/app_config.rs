//! Application configuration value object

use serde::{Deserialize, Serialize};

/// Default port the webhook server listens on
pub const DEFAULT_PORT: u16 = 8080;

/// Default bind address
pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Default Whisper model for transcription
pub const DEFAULT_WHISPER_MODEL: &str = "whisper-1";

/// Default chat model for summaries and keyword extraction
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-4-turbo-preview";

/// Which optional cards a pipeline run produces. The transcript and
/// diagnostics cards are always built; these toggles gate the stages
/// that cost an extra model call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSelection {
    pub summary: bool,
    pub keywords: bool,
}

impl Default for CardSelection {
    fn default() -> Self {
        Self {
            summary: true,
            keywords: true,
        }
    }
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub port: Option<u16>,
    pub bind: Option<String>,
    pub whisper_model: Option<String>,
    pub completion_model: Option<String>,
    pub summary: Option<bool>,
    pub keywords: Option<bool>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            api_key: None,
            port: Some(DEFAULT_PORT),
            bind: Some(DEFAULT_BIND.to_string()),
            whisper_model: Some(DEFAULT_WHISPER_MODEL.to_string()),
            completion_model: Some(DEFAULT_COMPLETION_MODEL.to_string()),
            summary: Some(true),
            keywords: Some(true),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            port: other.port.or(self.port),
            bind: other.bind.or(self.bind),
            whisper_model: other.whisper_model.or(self.whisper_model),
            completion_model: other.completion_model.or(self.completion_model),
            summary: other.summary.or(self.summary),
            keywords: other.keywords.or(self.keywords),
        }
    }

    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn bind_or_default(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }

    pub fn whisper_model_or_default(&self) -> &str {
        self.whisper_model.as_deref().unwrap_or(DEFAULT_WHISPER_MODEL)
    }

    pub fn completion_model_or_default(&self) -> &str {
        self.completion_model
            .as_deref()
            .unwrap_or(DEFAULT_COMPLETION_MODEL)
    }

    /// Card toggles with their defaults applied
    pub fn card_selection(&self) -> CardSelection {
        CardSelection {
            summary: self.summary.unwrap_or(true),
            keywords: self.keywords.unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert!(config.api_key.is_none());
        assert_eq!(config.port, Some(8080));
        assert_eq!(config.bind, Some("0.0.0.0".to_string()));
        assert_eq!(config.whisper_model, Some("whisper-1".to_string()));
        assert_eq!(
            config.completion_model,
            Some("gpt-4-turbo-preview".to_string())
        );
        assert_eq!(config.summary, Some(true));
        assert_eq!(config.keywords, Some(true));
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.api_key.is_none());
        assert!(config.port.is_none());
        assert!(config.bind.is_none());
        assert!(config.summary.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            api_key: Some("base_key".to_string()),
            port: Some(9000),
            whisper_model: Some("whisper-1".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            api_key: Some("other_key".to_string()),
            port: None, // Should not override
            whisper_model: Some("whisper-large".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.api_key, Some("other_key".to_string()));
        assert_eq!(merged.port, Some(9000)); // Kept from base
        assert_eq!(merged.whisper_model, Some("whisper-large".to_string()));
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            api_key: Some("key".to_string()),
            summary: Some(false),
            ..Default::default()
        };

        let merged = base.merge(AppConfig::empty());

        assert_eq!(merged.api_key, Some("key".to_string()));
        assert_eq!(merged.summary, Some(false));
    }

    #[test]
    fn accessors_fall_back_to_defaults() {
        let config = AppConfig::empty();
        assert_eq!(config.port_or_default(), 8080);
        assert_eq!(config.bind_or_default(), "0.0.0.0");
        assert_eq!(config.whisper_model_or_default(), "whisper-1");
        assert_eq!(config.completion_model_or_default(), "gpt-4-turbo-preview");
    }

    #[test]
    fn card_selection_defaults_to_all_enabled() {
        let selection = AppConfig::empty().card_selection();
        assert!(selection.summary);
        assert!(selection.keywords);
    }

    #[test]
    fn card_selection_honors_toggles() {
        let config = AppConfig {
            summary: Some(false),
            keywords: Some(true),
            ..Default::default()
        };
        let selection = config.card_selection();
        assert!(!selection.summary);
        assert!(selection.keywords);
    }
}
