//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is loaded
//! with the `JUPITER_` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use jupiter_theater::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Listening on {}:{}", config.server.host, config.server.port);
//! ```

mod ai;
mod error;
mod prompts;
mod server;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use prompts::PromptConfig;
pub use server::ServerConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the theater box-office backend.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, log filter)
    #[serde(default)]
    pub server: ServerConfig,

    /// AI provider configuration (OpenRouter key, model pair)
    #[serde(default)]
    pub ai: AiConfig,

    /// Prompt source configuration
    #[serde(default)]
    pub prompts: PromptConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `JUPITER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Falls back to a bare `OPENROUTER_API_KEY` variable for the API key
    ///
    /// # Environment Variable Format
    ///
    /// - `JUPITER__SERVER__PORT=65432` -> `server.port = 65432`
    /// - `JUPITER__AI__PRIMARY_MODEL=...` -> `ai.primary_model = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("JUPITER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        // The bare variable is what the OpenRouter docs tell people to export.
        if !config.ai.has_api_key() {
            if let Ok(key) = std::env::var("OPENROUTER_API_KEY") {
                if !key.is_empty() {
                    config.ai.openrouter_api_key = Some(key);
                }
            }
        }

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.prompts.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("JUPITER__SERVER__PORT");
        env::remove_var("JUPITER__AI__OPENROUTER_API_KEY");
        env::remove_var("JUPITER__AI__PRIMARY_MODEL");
        env::remove_var("OPENROUTER_API_KEY");
    }

    #[test]
    fn test_load_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.port, 65432);
        assert_eq!(config.ai.primary_model, "meta-llama/llama-4-scout:free");
        assert!(config.ai.openrouter_api_key.is_none());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("JUPITER__SERVER__PORT", "9000");
        env::set_var("JUPITER__AI__OPENROUTER_API_KEY", "sk-or-prefixed");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(
            config.ai.openrouter_api_key.as_deref(),
            Some("sk-or-prefixed")
        );
    }

    #[test]
    fn test_bare_api_key_fallback() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("OPENROUTER_API_KEY", "sk-or-bare");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.openrouter_api_key.as_deref(), Some("sk-or-bare"));
    }

    #[test]
    fn test_prefixed_key_wins_over_bare() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("JUPITER__AI__OPENROUTER_API_KEY", "sk-or-prefixed");
        env::set_var("OPENROUTER_API_KEY", "sk-or-bare");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.ai.openrouter_api_key.as_deref(),
            Some("sk-or-prefixed")
        );
    }

    #[test]
    fn test_validate_requires_key() {
        let config = AppConfig::default();
        assert!(config.validate().is_err());

        let config = AppConfig {
            ai: AiConfig {
                openrouter_api_key: Some("sk-or-xxx".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
