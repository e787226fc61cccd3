//! Model Gateway - single entry point to the LLM backends.
//!
//! Routes each prompt to the primary backend and, when that call errors for
//! any reason, retries exactly once on the fallback backend. The recursion
//! is bounded at depth one: a fallback failure surfaces as `None`, never as
//! another retry. A reachable backend that answers with empty content is
//! final for this call — that outcome belongs to the caller's prompt-level
//! retry, not the backend pair.
//!
//! Callers never see provider errors. A classification or extraction that
//! cannot get model text degrades to defaults downstream, so the gateway
//! logs the failure and returns `None`.

use std::sync::Arc;

use crate::ports::{AIProvider, CompletionRequest, MessageRole};

/// Which backend a request starts at.
///
/// `Fallback` is used by callers that have already consumed their primary
/// attempt at the prompt level and want the cheaper model directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    Primary,
    Fallback,
}

/// Gateway over a primary/fallback pair of text-generation backends.
pub struct ModelGateway {
    primary: Arc<dyn AIProvider>,
    fallback: Arc<dyn AIProvider>,
}

impl ModelGateway {
    pub fn new(primary: Arc<dyn AIProvider>, fallback: Arc<dyn AIProvider>) -> Self {
        Self { primary, fallback }
    }

    /// Generate a completion for a (system, user) prompt pair.
    ///
    /// Starting at [`ModelTier::Primary`], an erroring call is retried once
    /// on the fallback backend. Starting at [`ModelTier::Fallback`], an
    /// error is final. Empty content from a reachable backend yields `None`
    /// without a retry.
    pub async fn generate(
        &self,
        system_prompt: &str,
        user_text: &str,
        tier: ModelTier,
        max_tokens: u32,
    ) -> Option<String> {
        let request = CompletionRequest::new()
            .with_system_prompt(system_prompt)
            .with_message(MessageRole::User, user_text)
            .with_max_tokens(max_tokens);

        let content = if tier == ModelTier::Primary {
            match self.complete_on(&self.primary, request.clone()).await {
                Ok(content) => content,
                Err(()) => {
                    tracing::warn!("primary backend failed, retrying on fallback");
                    self.complete_on(&self.fallback, request).await.ok()?
                }
            }
        } else {
            self.complete_on(&self.fallback, request).await.ok()?
        };

        if content.is_empty() {
            tracing::warn!("backend returned empty content");
            None
        } else {
            Some(content)
        }
    }

    async fn complete_on(
        &self,
        provider: &Arc<dyn AIProvider>,
        request: CompletionRequest,
    ) -> Result<String, ()> {
        let info = provider.provider_info();

        match provider.complete(request).await {
            Ok(response) => {
                tracing::debug!(
                    model = %info.model,
                    completion_tokens = response.usage.completion_tokens,
                    "completion succeeded"
                );
                Ok(response.content)
            }
            Err(err) => {
                tracing::warn!(model = %info.model, error = %err, "completion failed");
                Err(())
            }
        }
    }
}
