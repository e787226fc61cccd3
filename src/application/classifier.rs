//! Intent Classifier - maps free-text Greek messages onto the closed
//! category set.
//!
//! Classification is a single short completion: the taxonomy prompt asks for
//! exactly one Greek label, the reply is uppercased and scanned for a known
//! label by substring containment. Anything unrecognizable, including a
//! failed model call, degrades to the default category.

use std::sync::Arc;

use crate::application::gateway::{ModelGateway, ModelTier};
use crate::domain::Intent;

const TAXONOMY_PROMPT: &str = r#"You are a text classifier. Classify the user's message into EXACTLY ONE of these categories:
- ΚΡΑΤΗΣΗ (for reservation requests)
- ΑΚΥΡΩΣΗ (for cancellation requests)
- ΠΛΗΡΟΦΟΡΙΕΣ (for information requests about shows, times, etc.)
- ΑΞΙΟΛΟΓΗΣΕΙΣ & ΣΧΟΛΙΑ (for reviews, comments, feedback)
- ΠΡΟΣΦΟΡΕΣ & ΕΚΠΤΩΣΕΙΣ (for questions about discounts, offers, promotions)
- ΕΞΟΔΟΣ (for exit/quit requests, closing the application)

The ΕΞΟΔΟΣ category should be used for requests to exit, quit, close, or terminate the application.
Phrases like "exit", "quit", "close", "βγες απο την εφαρμογη", "κλεισε", "εξοδος", "τελος" should be classified as ΕΞΟΔΟΣ.

Respond ONLY with the category name in Greek, nothing else."#;

/// Classification needs only a label, so the budget is tiny.
const CLASSIFY_MAX_TOKENS: u32 = 20;

/// Classifies Greek messages into the closed intent set.
pub struct IntentClassifier {
    gateway: Arc<ModelGateway>,
}

impl IntentClassifier {
    pub fn new(gateway: Arc<ModelGateway>) -> Self {
        Self { gateway }
    }

    /// Classify a message. Never fails: an unusable model reply yields
    /// [`Intent::DEFAULT`].
    pub async fn classify(&self, message: &str) -> Intent {
        let reply = self
            .gateway
            .generate(TAXONOMY_PROMPT, message, ModelTier::Primary, CLASSIFY_MAX_TOKENS)
            .await;

        let intent = match reply {
            Some(text) => {
                let normalized = text.trim().to_uppercase();
                Intent::detect(&normalized).unwrap_or_else(|| {
                    tracing::debug!(reply = %text, "no known category in reply, using default");
                    Intent::DEFAULT
                })
            }
            None => {
                tracing::warn!("classification backends unavailable, using default");
                Intent::DEFAULT
            }
        };

        tracing::info!(category = %intent, "message classified");
        intent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};

    fn classifier(primary: MockAIProvider, fallback: MockAIProvider) -> IntentClassifier {
        IntentClassifier::new(Arc::new(ModelGateway::new(
            Arc::new(primary),
            Arc::new(fallback),
        )))
    }

    #[tokio::test]
    async fn exact_label_is_recognized() {
        let c = classifier(
            MockAIProvider::new().with_response("ΚΡΑΤΗΣΗ"),
            MockAIProvider::new(),
        );
        assert_eq!(c.classify("Θέλω να κλείσω εισιτήρια").await, Intent::Booking);
    }

    #[tokio::test]
    async fn label_inside_chatter_is_recognized() {
        let c = classifier(
            MockAIProvider::new().with_response("Η κατηγορία είναι: ΑΚΥΡΩΣΗ."),
            MockAIProvider::new(),
        );
        assert_eq!(c.classify("ακύρωσε την κράτησή μου").await, Intent::Cancellation);
    }

    #[tokio::test]
    async fn lowercase_reply_is_normalized() {
        let c = classifier(
            MockAIProvider::new().with_response("εξοδος"),
            MockAIProvider::new(),
        );
        // Uppercasing unaccented lowercase yields the label.
        assert_eq!(c.classify("τέλος").await, Intent::Exit);
    }

    #[tokio::test]
    async fn unknown_reply_defaults_to_show_info() {
        let c = classifier(
            MockAIProvider::new().with_response("I cannot classify this"),
            MockAIProvider::new(),
        );
        assert_eq!(c.classify("κάτι άσχετο").await, Intent::ShowInfo);
    }

    #[tokio::test]
    async fn backend_failure_falls_back_then_defaults() {
        let c = classifier(
            MockAIProvider::new().with_error(MockError::Network {
                message: "down".to_string(),
            }),
            MockAIProvider::new().with_error(MockError::Network {
                message: "down".to_string(),
            }),
        );
        assert_eq!(c.classify("οτιδήποτε").await, Intent::ShowInfo);
    }

    #[tokio::test]
    async fn classification_uses_small_budget() {
        let primary = MockAIProvider::new().with_response("ΠΛΗΡΟΦΟΡΙΕΣ");
        let c = classifier(primary.clone(), MockAIProvider::new());

        c.classify("τι παίζει το σάββατο;").await;

        let calls = primary.get_calls();
        assert_eq!(calls[0].max_tokens, Some(20));
        assert!(calls[0]
            .system_prompt
            .as_deref()
            .unwrap()
            .contains("text classifier"));
    }
}
