//! Per-connection session handling.
//!
//! Each accepted connection runs its own task: a newline-framed
//! request/response loop that routes validated frames into the pipeline.
//! Protocol violations answer with an error envelope and keep the
//! connection open; only a peer close, a transport error, or server
//! shutdown ends the session.

use std::net::SocketAddr;
use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::watch;

use crate::adapters::tcp::envelope::{parse_frame, Request, ResponseEnvelope};
use crate::application::{IntentClassifier, SlotExtractor};
use crate::domain::Intent;

/// Detail string acknowledging an exit request. The server keeps running;
/// disconnecting is the client's move.
const EXIT_DETAIL: &str = "Client requested to close connection.";

const PROCESSING_ERROR: &str = "Unknown category or unable to process request.";

pub async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    classifier: Arc<IntentClassifier>,
    extractor: Arc<SlotExtractor>,
    mut shutdown: watch::Receiver<()>,
) {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                tracing::debug!(%peer, "closing connection for shutdown");
                break;
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(frame)) => {
                        let response = respond(&frame, &classifier, &extractor).await;
                        let mut payload = match serde_json::to_string(&response) {
                            Ok(payload) => payload,
                            Err(err) => {
                                tracing::error!(%peer, error = %err, "failed to serialize response");
                                continue;
                            }
                        };
                        payload.push('\n');
                        if let Err(err) = writer.write_all(payload.as_bytes()).await {
                            tracing::warn!(%peer, error = %err, "failed to write response");
                            break;
                        }
                    }
                    Ok(None) => {
                        tracing::debug!(%peer, "peer closed connection");
                        break;
                    }
                    Err(err) => {
                        tracing::warn!(%peer, error = %err, "read error");
                        break;
                    }
                }
            }
        }
    }
}

/// Routes one frame through the pipeline and builds the response envelope.
async fn respond(
    frame: &str,
    classifier: &IntentClassifier,
    extractor: &SlotExtractor,
) -> ResponseEnvelope {
    let request = match parse_frame(frame) {
        Ok(request) => request,
        Err(message) => {
            tracing::debug!(error = %message, "rejected malformed frame");
            return ResponseEnvelope::protocol_error(message);
        }
    };

    match request {
        Request::Categorise { message } => {
            let intent = classifier.classify(&message).await;
            let detail = if intent == Intent::Exit {
                EXIT_DETAIL
            } else {
                intent.label()
            };
            ResponseEnvelope::ok(intent, Value::String(detail.to_string()))
        }
        Request::Extract { category, message } => {
            match extract_details(extractor, category, &message).await {
                Ok(details) => ResponseEnvelope::ok(category, details),
                Err(err) => {
                    tracing::error!(category = %category, error = %err, "extraction serialization failed");
                    ResponseEnvelope::protocol_error(PROCESSING_ERROR)
                }
            }
        }
    }
}

async fn extract_details(
    extractor: &SlotExtractor,
    category: Intent,
    message: &str,
) -> Result<Value, serde_json::Error> {
    match category {
        Intent::ShowInfo => serde_json::to_value(extractor.extract_show_info(message).await),
        Intent::Booking => serde_json::to_value(extractor.extract_booking(message).await),
        Intent::Cancellation => serde_json::to_value(extractor.extract_cancellation(message).await),
        Intent::Discount => serde_json::to_value(extractor.extract_discount(message).await),
        Intent::Review => serde_json::to_value(extractor.extract_review(message).await),
        Intent::Exit => Ok(Value::String(EXIT_DETAIL.to_string())),
    }
}
