//! Wire envelopes for the session protocol.
//!
//! Requests are newline-delimited UTF-8 JSON frames. A frame that fails JSON
//! decoding is not rejected: older clients send bare text, which is treated
//! as a categorisation request for the whole frame.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::Intent;

/// Raw request envelope as decoded off the wire. All fields optional so that
/// validation can answer with a protocol error instead of a decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestEnvelope {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A validated inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Classify the message into the intent set.
    Categorise { message: String },
    /// Extract slots for an already-known intent.
    Extract { category: Intent, message: String },
}

/// Parses one wire frame into a validated request.
///
/// Frames that are not JSON objects take the legacy path: the whole frame is
/// a categorisation request. Frames that are JSON objects must validate.
pub fn parse_frame(frame: &str) -> Result<Request, String> {
    let envelope: RequestEnvelope = match serde_json::from_str(frame) {
        Ok(envelope) => envelope,
        Err(_) => {
            // Legacy plain-text client.
            return validate_message(Some(frame.to_string()))
                .map(|message| Request::Categorise { message });
        }
    };

    let kind = envelope
        .kind
        .ok_or_else(|| "Missing request type.".to_string())?;

    match kind.as_str() {
        "CATEGORISE" => {
            let message = validate_message(envelope.message)?;
            Ok(Request::Categorise { message })
        }
        "EXTRACT" => {
            let message = validate_message(envelope.message)?;
            let label = envelope
                .category
                .filter(|c| !c.is_empty())
                .ok_or_else(|| "EXTRACT requires a category.".to_string())?;
            let category = Intent::from_label(&label)
                .ok_or_else(|| format!("Unknown category: {label}"))?;
            Ok(Request::Extract { category, message })
        }
        other => Err(format!("Unknown request type: {other}")),
    }
}

fn validate_message(message: Option<String>) -> Result<String, String> {
    match message {
        Some(m) if !m.trim().is_empty() => Ok(m),
        _ => Err("Message must be non-empty.".to_string()),
    }
}

/// Response envelope. Exactly one of `details` and `error` is non-null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub category: Option<String>,
    pub details: Option<Value>,
    pub error: Option<String>,
}

impl ResponseEnvelope {
    /// Successful response carrying intent-specific details.
    pub fn ok(category: Intent, details: Value) -> Self {
        Self {
            category: Some(category.label().to_string()),
            details: Some(details),
            error: None,
        }
    }

    /// Protocol error response. The connection stays open.
    pub fn protocol_error(message: impl Into<String>) -> Self {
        Self {
            category: None,
            details: None,
            error: Some(message.into()),
        }
    }
}
