//! AI provider adapters.

pub mod mock_provider;
pub mod openrouter_provider;

pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openrouter_provider::{OpenRouterConfig, OpenRouterProvider, DEFAULT_BASE_URL};
