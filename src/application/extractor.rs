//! Slot Extractor - turns a classified message into a schema-complete
//! structure for its intent.
//!
//! Extraction runs a two-stage prompt program: the primary prompt at the
//! primary tier, then the simplified fallback prompt at the fallback tier
//! with a smaller token budget. Each stage's reply goes through the balanced
//! JSON scanner; whatever survives is reconciled into a fresh template clone.
//! An extraction never fails, it degrades to template defaults.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::application::gateway::{ModelGateway, ModelTier};
use crate::application::registry::PromptRegistry;
use crate::domain::payload::{scan_json, ExtractionPayload};
use crate::domain::{Booking, Cancellation, Discount, Intent, Review, ShowInfo};

/// Extracts structured details from classified messages.
pub struct SlotExtractor {
    gateway: Arc<ModelGateway>,
    registry: Arc<PromptRegistry>,
}

impl SlotExtractor {
    pub fn new(gateway: Arc<ModelGateway>, registry: Arc<PromptRegistry>) -> Self {
        Self { gateway, registry }
    }

    /// Show-information filter criteria.
    ///
    /// When both prompt stages fail, a last-resort keyword pass still
    /// recovers weekend and evening-time constraints from the raw message.
    pub async fn extract_show_info(&self, message: &str) -> ShowInfo {
        let mut template = ShowInfo::default();
        let payload = self.run_program(Intent::ShowInfo, message).await;

        match payload {
            Some(payload) => reconcile_object(&mut template, &payload, ShowInfo::reconcile),
            None => {
                if let Some(rescued) = keyword_rescue(message) {
                    tracing::info!("recovered show filters by keyword matching");
                    template.reconcile(&rescued);
                }
            }
        }

        template
    }

    /// Booking details, one [`Booking`] per attendee.
    ///
    /// A single-object payload yields one booking; an array payload yields
    /// one per element. A failed extraction yields an empty list.
    pub async fn extract_booking(&self, message: &str) -> Vec<Booking> {
        match self.run_program(Intent::Booking, message).await {
            Some(ExtractionPayload::Object(map)) => {
                let mut booking = Booking::default();
                booking.reconcile(&map);
                vec![booking]
            }
            Some(ExtractionPayload::Array(items)) => items
                .iter()
                .map(|map| {
                    let mut booking = Booking::default();
                    booking.reconcile(map);
                    booking
                })
                .collect(),
            None => Vec::new(),
        }
    }

    /// Cancellation lookup credentials.
    pub async fn extract_cancellation(&self, message: &str) -> Cancellation {
        let mut template = Cancellation::default();
        if let Some(payload) = self.run_program(Intent::Cancellation, message).await {
            reconcile_object(&mut template, &payload, Cancellation::reconcile);
        }
        template
    }

    /// Discount inquiry details.
    pub async fn extract_discount(&self, message: &str) -> Discount {
        let mut template = Discount::default();
        if let Some(payload) = self.run_program(Intent::Discount, message).await {
            reconcile_object(&mut template, &payload, Discount::reconcile);
        }
        template
    }

    /// Review submission details.
    pub async fn extract_review(&self, message: &str) -> Review {
        let mut template = Review::default();
        if let Some(payload) = self.run_program(Intent::Review, message).await {
            reconcile_object(&mut template, &payload, Review::reconcile);
        }
        template
    }

    /// Runs the two-stage prompt program for `intent`.
    ///
    /// Stage one starts at the primary tier so a provider error already gets
    /// one backend retry; stage two goes straight to the fallback backend
    /// with the simplified prompt.
    async fn run_program(&self, intent: Intent, message: &str) -> Option<ExtractionPayload> {
        let program = self.registry.program(intent)?;

        let reply = self
            .gateway
            .generate(&program.primary, message, ModelTier::Primary, program.primary_budget)
            .await;

        if let Some(payload) = reply.as_deref().and_then(scan_json) {
            return Some(payload);
        }

        tracing::warn!(category = %intent, "primary prompt yielded no payload, retrying simplified");

        let reply = self
            .gateway
            .generate(
                &program.fallback,
                message,
                ModelTier::Fallback,
                program.fallback_budget,
            )
            .await;

        let payload = reply.as_deref().and_then(scan_json);
        if payload.is_none() {
            tracing::warn!(category = %intent, "extraction failed at both stages");
        }
        payload
    }
}

/// Reconciles a payload into a single-object template; an array payload
/// contributes its first object.
fn reconcile_object<T>(
    template: &mut T,
    payload: &ExtractionPayload,
    reconcile: impl Fn(&mut T, &Map<String, Value>),
) {
    match payload {
        ExtractionPayload::Object(map) => reconcile(template, map),
        ExtractionPayload::Array(items) => {
            if let Some(first) = items.first() {
                reconcile(template, first);
            }
        }
    }
}

/// Last-resort keyword matching for show filters when both prompt stages
/// fail. Covers only the weekend and after-seven/after-eight evening
/// patterns.
fn keyword_rescue(message: &str) -> Option<Map<String, Value>> {
    let lower = message.to_lowercase();
    if !lower.contains("σαββατοκυριακο") && !lower.contains("σαββατοκύριακο") {
        return None;
    }

    let mut map = Map::new();
    map.insert("day".to_string(), Value::from(vec!["Saturday", "Sunday"]));

    if lower.contains("μετα") || lower.contains("μετά") {
        if lower.contains('7') || lower.contains("19") || lower.contains("επτα") || lower.contains("επτά")
        {
            map.insert("time".to_string(), Value::from(vec![">19:00"]));
        } else if lower.contains('8')
            || lower.contains("20")
            || lower.contains("οκτω")
            || lower.contains("οκτώ")
        {
            map.insert("time".to_string(), Value::from(vec![">20:00"]));
        }
    }

    Some(map)
}
