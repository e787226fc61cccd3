//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// AI provider configuration
///
/// One OpenRouter API key serves both model tiers; the primary and fallback
/// models are just different model identifiers behind the same endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenRouter API key
    pub openrouter_api_key: Option<String>,

    /// Base URL for the OpenRouter API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model tried first for every request
    #[serde(default = "default_primary_model")]
    pub primary_model: String,

    /// Model tried once when the primary fails
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.openrouter_api_key
            .as_ref()
            .is_some_and(|k| !k.is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("OPENROUTER_API_KEY"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.primary_model.is_empty() || self.fallback_model.is_empty() {
            return Err(ValidationError::EmptyModelId);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 600 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openrouter_api_key: None,
            base_url: default_base_url(),
            primary_model: default_primary_model(),
            fallback_model: default_fallback_model(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_primary_model() -> String {
    "meta-llama/llama-4-scout:free".to_string()
}

fn default_fallback_model() -> String {
    "google/gemma-3-12b-it:free".to_string()
}

fn default_timeout() -> u64 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.primary_model, "meta-llama/llama-4-scout:free");
        assert_eq!(config.fallback_model, "google/gemma-3-12b-it:free");
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 60,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_validation_missing_key() {
        let config = AiConfig::default();
        assert!(config.validate().is_err());

        let config = AiConfig {
            openrouter_api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = AiConfig {
            openrouter_api_key: Some("sk-or-xxx".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_bad_base_url() {
        let config = AiConfig {
            openrouter_api_key: Some("sk-or-xxx".to_string()),
            base_url: "openrouter.ai".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_model() {
        let config = AiConfig {
            openrouter_api_key: Some("sk-or-xxx".to_string()),
            fallback_model: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
